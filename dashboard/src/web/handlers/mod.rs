// stockroom_dashboard/src/web/handlers/mod.rs

pub mod assignment_handlers;
pub mod catalog_handlers;
pub mod change_handlers;
pub mod order_handlers;
pub mod site_handlers;
pub mod user_handlers;

#[cfg(test)]
mod tests;

use actix_web::http::header;
use actix_web::HttpResponse;
use chrono::Utc;

/// A CSV download named `<stem>-<date>.csv`.
pub(crate) fn csv_attachment(stem: &str, body: String) -> HttpResponse {
  let filename = format!("{}-{}.csv", stem, Utc::now().format("%Y-%m-%d"));
  HttpResponse::Ok()
    .content_type("text/csv; charset=utf-8")
    .insert_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)))
    .body(body)
}
