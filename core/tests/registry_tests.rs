// tests/registry_tests.rs
mod common;

use common::*;
use serial_test::serial;
use stockroom::{ContextData, Flow, FlowError, FlowRegistry, StepDef};

#[derive(Clone, Debug, Default)]
struct OtherContext {
  touched: bool,
}

#[derive(Debug, thiserror::Error)]
enum AppError {
  #[error("flow: {0}")]
  Flow(#[from] FlowError),
  #[error("handler: {0}")]
  Test(#[from] TestError),
}

#[tokio::test]
#[serial]
async fn test_registry_dispatches_by_context_type() {
  setup_tracing();
  let registry = FlowRegistry::<AppError>::new();

  let mut flow = Flow::<TestContext, TestError>::new("test_flow", [StepDef::critical("only")]);
  flow.on_boxed("only", record_step("only"));
  registry.register(flow);

  let mut other = Flow::<OtherContext, FlowError>::new("other_flow", [StepDef::critical("touch")]);
  other.on("touch", |ctx: ContextData<OtherContext>| async move {
    ctx.write().touched = true;
    Ok::<_, FlowError>(stockroom::FlowControl::Continue)
  });
  registry.register(other);

  assert!(registry.is_registered::<TestContext>());
  assert_eq!(registry.flow_names(), ["other_flow", "test_flow"]);

  let ctx = ContextData::new(TestContext::default());
  registry.run(ctx.clone()).await.unwrap();
  assert_eq!(ctx.read().steps_executed, ["only"]);

  let other_ctx = ContextData::new(OtherContext::default());
  registry.run(other_ctx.clone()).await.unwrap();
  assert!(other_ctx.read().touched);
}

#[tokio::test]
#[serial]
async fn test_registry_maps_handler_errors() {
  let registry = FlowRegistry::<AppError>::new();
  let mut flow = Flow::<TestContext, TestError>::new("failing", [StepDef::critical("boom")]);
  flow.on_boxed("boom", failing_step("boom", "exploded"));
  registry.register(flow);

  let err = registry.run(ContextData::new(TestContext::default())).await.unwrap_err();
  assert!(matches!(err, AppError::Test(TestError::Handler(ref m)) if m == "exploded"));
}

#[tokio::test]
#[serial]
async fn test_unregistered_context_type() {
  let registry = FlowRegistry::<FlowError>::default();
  let err = registry.run(ContextData::new(OtherContext::default())).await.unwrap_err();
  match err {
    FlowError::NotRegistered { context_type } => assert!(context_type.contains("OtherContext")),
    other => panic!("Expected NotRegistered, got {:?}", other),
  }
}
