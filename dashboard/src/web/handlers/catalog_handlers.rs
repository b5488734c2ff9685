// stockroom_dashboard/src/web/handlers/catalog_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use stockroom::export::{self, ImportIssue};
use stockroom::Notification;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;
use crate::web::handlers::csv_attachment;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.api.list_products().await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(json!({ "products": products })))
}

#[instrument(name = "handler::export_products", skip(app_state))]
pub async fn export_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.api.list_products().await?;
  let csv_text = export::products_csv(&products)?;
  Ok(csv_attachment("products", csv_text))
}

pub async fn import_template_handler() -> Result<HttpResponse, AppError> {
  Ok(csv_attachment("product-import-template", export::product_import_template()?))
}

/// Checks the uploaded CSV locally and only forwards it when every row is
/// valid. Rejected files come back with one issue per bad line.
#[instrument(name = "handler::import_products", skip(app_state, body), fields(bytes = body.len()))]
pub async fn import_products_handler(app_state: web::Data<AppState>, body: String) -> Result<HttpResponse, AppError> {
  let preview = export::parse_product_import(&body);

  if !preview.is_clean() {
    let mut issues: Vec<ImportIssue> = preview.issues;
    if issues.is_empty() {
      issues.push(ImportIssue {
        line: 1,
        message: "The import file has no product rows.".to_string(),
      });
    }
    warn!(issues = issues.len(), "Product import rejected before upload.");
    let notification = Notification::error(format!("The import file has {} problem(s).", issues.len()));
    app_state.notifier.notify(&notification);
    return Ok(HttpResponse::BadRequest().json(json!({
      "level": notification.level,
      "message": notification.message,
      "issues": issues,
    })));
  }

  let rows = preview.rows.len();
  let receipt = app_state.api.import_products(preview.to_csv()?).await?;
  let notification = Notification::success(format!(
    "Imported {} of {} products.",
    receipt.imported, rows
  ));
  app_state.notifier.notify(&notification);
  info!(imported = receipt.imported, skipped = receipt.skipped, "Product import uploaded.");
  Ok(HttpResponse::Ok().json(json!({ "notification": notification, "receipt": receipt })))
}
