// stockroom_dashboard/src/web/handlers/change_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use stockroom::model::ChangeDecision;
use stockroom::ContextData;
use tracing::{instrument, warn};

use crate::errors::AppError;
use crate::flows::contexts::ReviewChangeCtxData;
use crate::flows::{run_action, ActionOutcome};
use crate::state::AppState;

#[instrument(name = "handler::list_pending_changes", skip(app_state))]
pub async fn list_pending_changes_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let changes = app_state.api.list_pending_changes().await?;
  Ok(HttpResponse::Ok().json(json!({ "pendingChanges": changes })))
}

#[instrument(name = "handler::review_pending_change", skip(app_state, path))]
pub async fn review_pending_change_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
  let (change_id, raw_decision) = path.into_inner();
  let Some(decision) = ChangeDecision::parse(&raw_decision) else {
    warn!(%raw_decision, "Unknown review decision.");
    return Err(AppError::Validation(format!(
      "Unknown decision '{}'. Use approve or reject.",
      raw_decision
    )));
  };

  let ctx_data = ContextData::new(ReviewChangeCtxData::new(app_state.get_ref().clone(), change_id, decision));
  let report = run_action(&app_state, ctx_data.clone()).await?;

  let remaining = ctx_data.read().remaining.clone();
  let message = match decision {
    ChangeDecision::Approve => "Change approved.",
    ChangeDecision::Reject => "Change rejected.",
  };
  Ok(HttpResponse::Ok().json(ActionOutcome::new(&app_state, message, report, json!({ "remaining": remaining }))))
}
