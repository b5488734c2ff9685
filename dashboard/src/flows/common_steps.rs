// stockroom_dashboard/src/flows/common_steps.rs

use crate::errors::AppError;
use crate::state::AppState;
use stockroom::model::Activity;
use stockroom::FlowControl;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// Records one activity log entry. Registered as a best-effort step, so a
/// failure here is reported but never undoes the action.
#[instrument(name = "common_step::log_activity", skip(app_state, activity), fields(action = %activity.action), err(Display))]
pub async fn log_activity_step(app_state: AppState, action_id: Uuid, mut activity: Activity) -> Result<FlowControl, AppError> {
  // The action id is appended; the caller's own detail is kept.
  let detail = match activity.detail.take() {
    Some(detail) => format!("{} (action {})", detail, action_id),
    None => format!("action {}", action_id),
  };
  let activity = activity.by(app_state.config.activity_actor.clone()).with_detail(detail);
  match app_state.api.record_activity(&activity).await {
    Ok(()) => {
      info!(subject = %activity.subject, "Activity recorded.");
      Ok(FlowControl::Continue)
    }
    Err(e) => {
      warn!(subject = %activity.subject, error = %e, "Activity could not be recorded.");
      Err(AppError::Api(e))
    }
  }
}

pub(crate) fn require_text(field: &str, value: &str, message: &str) -> Result<(), AppError> {
  if value.trim().is_empty() {
    warn!(field, "Required field missing.");
    return Err(AppError::Validation(message.to_string()));
  }
  Ok(())
}
