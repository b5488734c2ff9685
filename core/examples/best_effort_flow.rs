// stockroom/examples/best_effort_flow.rs

use stockroom::{ContextData, Flow, FlowControl, FlowError, StepDef};
use tracing::info;

#[derive(Debug, thiserror::Error)]
enum DemoError {
  #[error("Flow: {0}")]
  Flow(#[from] FlowError),
  #[error("{0}")]
  Step(String),
}

#[derive(Debug, Default)]
struct Restock {
  product_id: String,
  quantity: u32,
  submitted: bool,
}

#[tokio::main]
async fn main() -> Result<(), DemoError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  let mut flow = Flow::<Restock, DemoError>::new(
    "restock",
    [
      StepDef::critical("validate"),
      StepDef::critical("submit"),
      StepDef::best_effort("log_activity"),
    ],
  );

  flow
    .on("validate", |ctx: ContextData<Restock>| async move {
      if ctx.read().quantity == 0 {
        return Err(DemoError::Step("Quantity must be at least 1.".to_string()));
      }
      Ok(FlowControl::Continue)
    })
    .on("submit", |ctx: ContextData<Restock>| async move {
      let mut data = ctx.write();
      info!(product_id = %data.product_id, quantity = data.quantity, "Submitting restock.");
      data.submitted = true;
      Ok::<_, DemoError>(FlowControl::Continue)
    })
    // The activity log is down; the restock still counts as done.
    .on("log_activity", |_ctx: ContextData<Restock>| async move {
      Err::<FlowControl, _>(DemoError::Step("activity service unavailable".to_string()))
    });

  let ctx = ContextData::new(Restock {
    product_id: "p-1".to_string(),
    quantity: 12,
    submitted: false,
  });
  let report = flow.run(ctx.clone()).await?;

  println!("outcome: {:?}, submitted: {}", report.outcome, ctx.read().submitted);
  for failure in &report.deferred {
    println!("deferred failure in '{}': {}", failure.step, failure.message);
  }
  Ok(())
}
