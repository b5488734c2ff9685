// stockroom_dashboard/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use stockroom::model::NewUser;
use stockroom::ContextData;
use tracing::instrument;

use crate::errors::AppError;
use crate::flows::contexts::CreateUserCtxData;
use crate::flows::{run_action, ActionOutcome};
use crate::state::AppState;

#[instrument(name = "handler::create_user", skip(app_state, req_body), fields(email = %req_body.email))]
pub async fn create_user_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<NewUser>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(CreateUserCtxData::new(app_state.get_ref().clone(), req_body.into_inner()));
  let report = run_action(&app_state, ctx_data.clone()).await?;

  let (user, users) = {
    let guard = ctx_data.read();
    (guard.created.clone(), guard.users_after.clone())
  };
  Ok(HttpResponse::Created().json(ActionOutcome::new(
    &app_state,
    "User created.",
    report,
    json!({ "user": user, "users": users }),
  )))
}
