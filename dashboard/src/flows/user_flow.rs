// stockroom_dashboard/src/flows/user_flow.rs

use crate::errors::AppError;
use crate::flows::common_steps::{self, require_text};
use crate::flows::contexts::CreateUserCtxData;
use stockroom::model::Activity;
use stockroom::{ContextData, Flow, FlowControl, FlowRegistry, StepDef};
use tracing::{event, info, instrument, warn, Level};

pub const FLOW_NAME: &str = "create_user";

/// Registers the "create staff user" flow.
pub fn register_user_flow(registry: &FlowRegistry<AppError>) {
  registry.register(build_user_flow());
}

pub fn build_user_flow() -> Flow<CreateUserCtxData, AppError> {
  let mut flow = Flow::<CreateUserCtxData, AppError>::new(
    FLOW_NAME,
    [
      StepDef::critical("validate_user"),
      StepDef::critical("submit_user"),
      StepDef::best_effort("refetch_users"),
      StepDef::best_effort("log_activity"),
    ],
  );

  // Step 1: form checks the backend would reject anyway
  flow.on("validate_user", |ctx_data: ContextData<CreateUserCtxData>| async move {
    let (name, email) = {
      let guard = ctx_data.read();
      (guard.request.name.clone(), guard.request.email.trim().to_string())
    };

    event!(Level::DEBUG, %email, "Validating new user input.");
    require_text("name", &name, "Name is required.")?;
    if email.is_empty() || !email.contains('@') {
      warn!("Invalid email format provided for new user.");
      return Err(AppError::Validation("A valid email is required.".to_string()));
    }
    Ok(FlowControl::Continue)
  });

  // Step 2
  flow.on("submit_user", submit_user);

  // Step 3: keep the user list in step with the backend
  flow.on("refetch_users", |ctx_data: ContextData<CreateUserCtxData>| async move {
    let api = ctx_data.read().app_state.api.clone();
    let users = api.list_users().await?;
    ctx_data.write().users_after = Some(users);
    Ok::<_, AppError>(FlowControl::Continue)
  });

  // Step 4
  flow.on("log_activity", |ctx_data: ContextData<CreateUserCtxData>| async move {
    let (app_state, action_id, activity) = {
      let guard = ctx_data.read();
      let subject = guard
        .created
        .as_ref()
        .map(|u| u.id.clone())
        .unwrap_or_else(|| guard.request.email.clone());
      let activity = Activity::new("created_user", subject).with_detail(format!("role {}", guard.request.role.as_str()));
      (guard.app_state.clone(), guard.action_id, activity)
    };
    common_steps::log_activity_step(app_state, action_id, activity).await
  });

  flow
}

#[instrument(name = "user_flow::submit", skip(ctx_data), err(Display))]
async fn submit_user(ctx_data: ContextData<CreateUserCtxData>) -> Result<FlowControl, AppError> {
  let (api, mut request) = {
    let guard = ctx_data.read();
    (guard.app_state.api.clone(), guard.request.clone())
  };
  request.name = request.name.trim().to_string();
  request.email = request.email.trim().to_string();

  let created = api.create_user(&request).await?;
  info!(user_id = %created.id, role = created.role.as_str(), "User created.");
  ctx_data.write().created = Some(created);
  Ok(FlowControl::Continue)
}
