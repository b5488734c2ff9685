// stockroom_dashboard/src/web/handlers/assignment_handlers.rs

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use stockroom::model::{Assignment, NewAssignment, Product};
use stockroom::ContextData;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::flows::contexts::AssignProductCtxData;
use crate::flows::{run_action, ActionOutcome};
use crate::state::AppState;
use crate::web::handlers::csv_attachment;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentResult {
  pub assignment: Option<Assignment>,
  pub product: Option<Product>,
}

#[instrument(
  name = "handler::assign_product",
  skip(app_state, req_body),
  fields(product_id = %req_body.product_id, quantity = req_body.quantity)
)]
pub async fn assign_product_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<NewAssignment>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(AssignProductCtxData::new(app_state.get_ref().clone(), req_body.into_inner()));

  let report = run_action(&app_state, ctx_data.clone()).await?;

  let result = {
    let guard = ctx_data.read();
    AssignmentResult {
      assignment: guard.created.clone(),
      product: guard.product_after.clone(),
    }
  };
  info!(assignment_id = ?result.assignment.as_ref().map(|a| a.id.as_str()), "Product assigned.");
  Ok(HttpResponse::Created().json(ActionOutcome::new(&app_state, "Product assigned.", report, result)))
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ExportAssignmentsQuery {
  pub product_id: Option<String>,
}

#[instrument(name = "handler::export_assignments", skip(app_state))]
pub async fn export_assignments_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ExportAssignmentsQuery>,
) -> Result<HttpResponse, AppError> {
  let product_id = query.product_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
  let assignments = app_state.api.list_assignments(product_id).await?;
  let csv_text = stockroom::export::assignments_csv(&assignments)?;
  Ok(csv_attachment("assignments", csv_text))
}
