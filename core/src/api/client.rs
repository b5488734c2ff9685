// stockroom/src/api/client.rs

//! Typed calls against the retail backend.
//!
//! Every endpoint answers with the same envelope:
//!
//! ```json
//! { "success": true, "message": "optional text", "data": <payload> }
//! ```
//!
//! `success` defaults to `true` when omitted. A `false` value becomes
//! [`ApiError::Logical`]; a payload that does not match the expected type
//! becomes [`ApiError::Parse`].

use crate::api::error::{ApiError, ApiResult};
use crate::api::transport::{ApiRequest, ApiResponse, Transport};
use crate::model::{
  Activity, Assignment, Category, ChangeDecision, NewAssignment, NewUser, Order, PaymentStatus, PendingChange,
  Product, Shop, User, Warehouse,
};
use crate::status::OrderStatus;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use reqwest::Url;
use tracing::{event, instrument, Level};

#[derive(Debug, Deserialize)]
struct Envelope {
  #[serde(default = "default_success")]
  success: bool,
  #[serde(default)]
  message: Option<String>,
  #[serde(default)]
  data: Option<serde_json::Value>,
}

fn default_success() -> bool {
  true
}

/// Server-side filters for the order list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderQuery {
  pub status: Option<OrderStatus>,
  pub payment_status: Option<PaymentStatus>,
  pub search: Option<String>,
}

/// Result of a bulk product import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReceipt {
  #[serde(default)]
  pub imported: u32,
  #[serde(default)]
  pub skipped: u32,
}

pub struct RetailApi<T: Transport> {
  transport: T,
}

impl<T: Transport> RetailApi<T> {
  pub fn new(transport: T) -> Self {
    Self { transport }
  }

  pub fn transport(&self) -> &T {
    &self.transport
  }

  #[instrument(name = "RetailApi::list_orders", skip(self), err(Display))]
  pub async fn list_orders(&self, query: &OrderQuery) -> ApiResult<Vec<Order>> {
    let mut request = ApiRequest::get("orders");
    if let Some(status) = &query.status {
      request = request.query("status", status.as_str());
    }
    if let Some(payment) = &query.payment_status {
      request = request.query("paymentStatus", payment.as_str());
    }
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
      request = request.query("q", search);
    }
    self.fetch(request).await
  }

  #[instrument(name = "RetailApi::get_order", skip(self), err(Display))]
  pub async fn get_order(&self, receipt: &str) -> ApiResult<Order> {
    let receipt = require("receipt", receipt)?;
    self.fetch(ApiRequest::get(format!("orders/{}", path_segment("receipt", receipt)?))).await
  }

  #[instrument(name = "RetailApi::list_products", skip(self), err(Display))]
  pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
    self.fetch(ApiRequest::get("products")).await
  }

  #[instrument(name = "RetailApi::get_product", skip(self), err(Display))]
  pub async fn get_product(&self, product_id: &str) -> ApiResult<Product> {
    let product_id = require("product", product_id)?;
    self.fetch(ApiRequest::get(format!("products/{}", path_segment("product", product_id)?))).await
  }

  #[instrument(name = "RetailApi::list_categories", skip(self), err(Display))]
  pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
    self.fetch(ApiRequest::get("categories")).await
  }

  #[instrument(name = "RetailApi::list_warehouses", skip(self), err(Display))]
  pub async fn list_warehouses(&self) -> ApiResult<Vec<Warehouse>> {
    self.fetch(ApiRequest::get("warehouses")).await
  }

  #[instrument(name = "RetailApi::list_shops", skip(self), err(Display))]
  pub async fn list_shops(&self) -> ApiResult<Vec<Shop>> {
    self.fetch(ApiRequest::get("shops")).await
  }

  #[instrument(name = "RetailApi::list_users", skip(self), err(Display))]
  pub async fn list_users(&self) -> ApiResult<Vec<User>> {
    self.fetch(ApiRequest::get("users")).await
  }

  #[instrument(name = "RetailApi::list_activities", skip(self), err(Display))]
  pub async fn list_activities(&self, limit: Option<u32>) -> ApiResult<Vec<Activity>> {
    let mut request = ApiRequest::get("activities");
    if let Some(limit) = limit {
      request = request.query("limit", limit.to_string());
    }
    self.fetch(request).await
  }

  #[instrument(name = "RetailApi::list_assignments", skip(self), err(Display))]
  pub async fn list_assignments(&self, product_id: Option<&str>) -> ApiResult<Vec<Assignment>> {
    let mut request = ApiRequest::get("assignments");
    if let Some(product_id) = product_id {
      request = request.query("productId", product_id);
    }
    self.fetch(request).await
  }

  #[instrument(name = "RetailApi::list_pending_changes", skip(self), err(Display))]
  pub async fn list_pending_changes(&self) -> ApiResult<Vec<PendingChange>> {
    self.fetch(ApiRequest::get("pending-changes")).await
  }

  #[instrument(name = "RetailApi::create_assignment", skip(self), err(Display))]
  pub async fn create_assignment(&self, assignment: &NewAssignment) -> ApiResult<Assignment> {
    let body = to_body("assignment", assignment)?;
    self.fetch(ApiRequest::post("assignments").json(body)).await
  }

  #[instrument(name = "RetailApi::create_user", skip(self), fields(email = %user.email), err(Display))]
  pub async fn create_user(&self, user: &NewUser) -> ApiResult<User> {
    let body = to_body("user", user)?;
    self.fetch(ApiRequest::post("users").json(body)).await
  }

  #[instrument(name = "RetailApi::decide_pending_change", skip(self), err(Display))]
  pub async fn decide_pending_change(&self, change_id: &str, decision: ChangeDecision) -> ApiResult<()> {
    let change_id = require("change", change_id)?;
    let path = format!("pending-changes/{}/{}", path_segment("change", change_id)?, decision.as_path());
    self.acknowledge(ApiRequest::post(path)).await
  }

  #[instrument(name = "RetailApi::record_activity", skip(self), fields(action = %activity.action), err(Display))]
  pub async fn record_activity(&self, activity: &Activity) -> ApiResult<()> {
    let body = to_body("activity", activity)?;
    self.acknowledge(ApiRequest::post("activities").json(body)).await
  }

  /// Uploads a product CSV that has already been validated locally.
  #[instrument(name = "RetailApi::import_products", skip(self, csv_text), fields(bytes = csv_text.len()), err(Display))]
  pub async fn import_products(&self, csv_text: String) -> ApiResult<ImportReceipt> {
    if csv_text.trim().is_empty() {
      return Err(ApiError::validation("file", "The import file is empty."));
    }
    self.fetch(ApiRequest::post("products/bulk-import").csv(csv_text)).await
  }

  async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
    let endpoint = request.path.clone();
    let response = self.transport.send(request).await?;
    let data = open_envelope(&endpoint, response)?.ok_or_else(|| ApiError::Parse {
      endpoint: endpoint.clone(),
      source: serde::de::Error::custom("response envelope has no data"),
    })?;
    serde_json::from_value(data).map_err(|source| ApiError::Parse { endpoint, source })
  }

  /// For endpoints whose payload the dashboard does not use.
  async fn acknowledge(&self, request: ApiRequest) -> ApiResult<()> {
    let endpoint = request.path.clone();
    let response = self.transport.send(request).await?;
    open_envelope(&endpoint, response).map(|_| ())
  }
}

/// Classifies a raw response and returns the envelope's `data`, if any.
pub(crate) fn open_envelope(endpoint: &str, response: ApiResponse) -> ApiResult<Option<serde_json::Value>> {
  if !response.is_success() {
    let message = serde_json::from_str::<Envelope>(&response.body)
      .ok()
      .and_then(|e| e.message)
      .unwrap_or_default();
    event!(Level::WARN, endpoint, status = response.status, %message, "Backend returned a non-success status.");
    return Err(ApiError::Http {
      endpoint: endpoint.to_string(),
      status: response.status,
      message,
    });
  }

  let envelope: Envelope = serde_json::from_str(&response.body).map_err(|source| ApiError::Parse {
    endpoint: endpoint.to_string(),
    source,
  })?;
  if !envelope.success {
    let message = envelope
      .message
      .filter(|m| !m.trim().is_empty())
      .unwrap_or_else(|| "The request was not accepted.".to_string());
    event!(Level::WARN, endpoint, %message, "Backend reported a logical failure.");
    return Err(ApiError::Logical { message });
  }
  Ok(envelope.data)
}

fn to_body<S: Serialize>(what: &str, value: &S) -> ApiResult<serde_json::Value> {
  serde_json::to_value(value).map_err(|source| ApiError::Parse {
    endpoint: what.to_string(),
    source,
  })
}

fn require<'a>(field: &str, value: &'a str) -> ApiResult<&'a str> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(ApiError::validation(field, format!("A {} id is required.", field)));
  }
  Ok(trimmed)
}

/// Percent-encodes `raw` as one URL path segment, so a `/` inside an id
/// cannot change which endpoint is called.
fn path_segment(field: &str, raw: &str) -> ApiResult<String> {
  if raw == "." || raw == ".." {
    return Err(ApiError::validation(field, format!("'{}' is not a valid {} id.", raw, field)));
  }
  let mut url = Url::parse("http://backend.invalid/").map_err(|e| ApiError::validation(field, e.to_string()))?;
  url
    .path_segments_mut()
    .map_err(|_| ApiError::validation(field, format!("The {} id cannot be used in a URL.", field)))?
    .push(raw);
  Ok(url.path().trim_start_matches('/').to_string())
}
