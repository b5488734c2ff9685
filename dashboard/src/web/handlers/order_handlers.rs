// stockroom_dashboard/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stockroom::model::PaymentStatus;
use stockroom::store::{OrderFilter, StatusCount};
use stockroom::{Notification, Order, OrderStatus, PaymentSummary, StatusBadge, WorkflowView};
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::services::order_sync;
use crate::state::AppState;
use crate::web::handlers::csv_attachment;

#[derive(Deserialize, Debug, Default)]
pub struct ListOrdersQuery {
  pub status: Option<String>,
  pub payment: Option<String>,
  pub q: Option<String>,
}

fn non_blank(raw: &Option<String>) -> Option<&str> {
  raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ListOrdersQuery {
  /// The filter this request asked for. Blank parameters mean "any".
  pub fn filter(&self) -> OrderFilter {
    OrderFilter {
      status: non_blank(&self.status).map(OrderStatus::parse),
      payment_status: non_blank(&self.payment).map(PaymentStatus::parse),
      search: non_blank(&self.q).map(str::to_string),
    }
  }
}

/// Loads the board from the backend if nothing has loaded it yet.
async fn ensure_loaded(app_state: &AppState) -> Result<(), AppError> {
  let never_loaded = {
    let board = app_state.board.read();
    board.loaded_at.is_none() && !board.loading
  };
  if never_loaded {
    order_sync::refresh_orders(app_state).await?;
  }
  Ok(())
}

/// Orders on the board that pass `filter`, in board order.
fn filtered_orders(app_state: &AppState, filter: &OrderFilter) -> Vec<Order> {
  let board = app_state.board.read();
  board.orders.iter().filter(|o| filter.matches(o)).cloned().collect()
}

/// One row of the order table.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
  #[serde(flatten)]
  pub order: Order,
  pub badge: StatusBadge,
  pub payment: PaymentSummary,
}

impl From<&Order> for OrderRow {
  fn from(order: &Order) -> Self {
    Self {
      badge: order.badge(),
      payment: order.payment_summary(),
      order: order.clone(),
    }
  }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
  pub orders: Vec<OrderRow>,
  pub filter: OrderFilter,
  pub loading: bool,
  pub loaded_at: Option<DateTime<Utc>>,
  pub notification: Option<Notification>,
  pub revision: u64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
  pub order: Order,
  pub badge: StatusBadge,
  pub workflow: WorkflowView,
  pub payment: PaymentSummary,
}

/// The filtered order board. Loads it from the backend on first use. The
/// filter comes from this request's query alone and is never stored on the
/// shared board.
#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  ensure_loaded(&app_state).await?;

  let filter = query.filter();
  let view = {
    let board = app_state.board.read();
    BoardView {
      orders: board.orders.iter().filter(|o| filter.matches(o)).map(OrderRow::from).collect(),
      filter,
      loading: board.loading,
      loaded_at: board.loaded_at,
      notification: board.notification.clone(),
      revision: app_state.board.revision(),
    }
  };

  info!(visible = view.orders.len(), "Order board served.");
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::refresh_orders", skip(app_state))]
pub async fn refresh_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let count = order_sync::refresh_orders(&app_state).await?;
  Ok(HttpResponse::Ok().json(serde_json::json!({
    "notification": Notification::info(format!("Loaded {} orders.", count)),
    "count": count,
  })))
}

#[instrument(name = "handler::order_breakdown", skip(app_state))]
pub async fn order_breakdown_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let breakdown: Vec<StatusCount> = app_state.board.read().status_breakdown();
  Ok(HttpResponse::Ok().json(breakdown))
}

/// The board's orders as CSV, filtered by the same query parameters as the
/// order list.
#[instrument(name = "handler::export_orders", skip(app_state))]
pub async fn export_orders_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListOrdersQuery>,
) -> Result<HttpResponse, AppError> {
  ensure_loaded(&app_state).await?;
  let orders = filtered_orders(&app_state, &query.filter());
  let csv_text = stockroom::export::orders_csv(&orders)?;
  info!(rows = orders.len(), "Orders exported.");
  Ok(csv_attachment("orders", csv_text))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(receipt = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let receipt = path.into_inner();
  let order = order_sync::refresh_order(&app_state, &receipt)
    .await
    .map_err(|e| match e {
      AppError::Api(api_err) if api_err.status() == Some(404) => {
        AppError::NotFound(format!("Order {} was not found.", receipt))
      }
      other => other,
    })?;
  Ok(HttpResponse::Ok().json(OrderDetail {
    badge: order.badge(),
    workflow: order.workflow(),
    payment: order.payment_summary(),
    order,
  }))
}

/// Every recognised status with its progress, tone and icon, in lifecycle order.
pub async fn status_table_handler() -> HttpResponse {
  let table: Vec<StatusBadge> = OrderStatus::ALL.iter().map(StatusBadge::for_status).collect();
  HttpResponse::Ok().json(table)
}
