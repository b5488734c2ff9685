// stockroom_dashboard/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{
  assignment_handlers, catalog_handlers, change_handlers, order_handlers, site_handlers, user_handlers,
};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/status/table", web::get().to(order_handlers::status_table_handler))
      // Fixed paths go before `/{receipt}`.
      .service(
        web::scope("/orders")
          .route("", web::get().to(order_handlers::list_orders_handler))
          .route("/refresh", web::post().to(order_handlers::refresh_orders_handler))
          .route("/breakdown", web::get().to(order_handlers::order_breakdown_handler))
          .route("/export.csv", web::get().to(order_handlers::export_orders_handler))
          .route("/{receipt}", web::get().to(order_handlers::get_order_handler)),
      )
      .service(
        web::scope("/products")
          .route("", web::get().to(catalog_handlers::list_products_handler))
          .route("/export.csv", web::get().to(catalog_handlers::export_products_handler))
          .route("/import-template.csv", web::get().to(catalog_handlers::import_template_handler))
          .route("/import", web::post().to(catalog_handlers::import_products_handler)),
      )
      .route("/sites", web::get().to(site_handlers::list_sites_handler))
      .service(
        web::scope("/assignments")
          .route("", web::post().to(assignment_handlers::assign_product_handler))
          .route("/export.csv", web::get().to(assignment_handlers::export_assignments_handler)),
      )
      .service(
        web::scope("/pending-changes")
          .route("", web::get().to(change_handlers::list_pending_changes_handler))
          .route("/{id}/{decision}", web::post().to(change_handlers::review_pending_change_handler)),
      )
      .route("/users", web::post().to(user_handlers::create_user_handler)),
  );
}
