// stockroom_dashboard/src/flows/review_flow.rs

//! Admin decision on a staff-submitted edit or delete.

use crate::errors::AppError;
use crate::flows::common_steps::{self, require_text};
use crate::flows::contexts::ReviewChangeCtxData;
use stockroom::model::{Activity, ChangeDecision};
use stockroom::{ContextData, Flow, FlowControl, FlowRegistry, StepDef};
use tracing::{event, info, instrument, Level};

pub const FLOW_NAME: &str = "review_pending_change";

pub fn build_review_flow() -> Flow<ReviewChangeCtxData, AppError> {
  let mut flow = Flow::<ReviewChangeCtxData, AppError>::new(
    FLOW_NAME,
    [
      StepDef::critical("validate_decision"),
      StepDef::critical("submit_decision"),
      StepDef::best_effort("refetch_pending"),
      // Nothing to log when the backend never accepted the decision.
      StepDef::best_effort("log_activity").skip_if(|data: &ReviewChangeCtxData| !data.decided),
    ],
  );

  flow
    .on("validate_decision", |ctx_data: ContextData<ReviewChangeCtxData>| async move {
      let change_id = ctx_data.read().change_id.clone();
      require_text("changeId", &change_id, "The pending change id is missing.")?;
      Ok::<_, AppError>(FlowControl::Continue)
    })
    .on("submit_decision", submit_decision)
    .on("refetch_pending", |ctx_data: ContextData<ReviewChangeCtxData>| async move {
      let api = ctx_data.read().app_state.api.clone();
      let remaining = api.list_pending_changes().await?;
      event!(Level::DEBUG, remaining = remaining.len(), "Pending changes refetched.");
      ctx_data.write().remaining = Some(remaining);
      Ok::<_, AppError>(FlowControl::Continue)
    })
    .on("log_activity", |ctx_data: ContextData<ReviewChangeCtxData>| async move {
      let (app_state, action_id, activity) = {
        let guard = ctx_data.read();
        let action = match guard.decision {
          ChangeDecision::Approve => "approved_change",
          ChangeDecision::Reject => "rejected_change",
        };
        (guard.app_state.clone(), guard.action_id, Activity::new(action, guard.change_id.clone()))
      };
      common_steps::log_activity_step(app_state, action_id, activity).await
    });

  flow
}

pub fn register_review_flow(registry: &FlowRegistry<AppError>) {
  registry.register(build_review_flow());
}

#[instrument(name = "review_flow::submit", skip(ctx_data), err(Display))]
async fn submit_decision(ctx_data: ContextData<ReviewChangeCtxData>) -> Result<FlowControl, AppError> {
  let (api, change_id, decision) = {
    let guard = ctx_data.read();
    (guard.app_state.api.clone(), guard.change_id.clone(), guard.decision)
  };

  api.decide_pending_change(&change_id, decision).await?;
  info!(%change_id, decision = decision.as_path(), "Pending change decided.");
  ctx_data.write().decided = true;
  Ok(FlowControl::Continue)
}
