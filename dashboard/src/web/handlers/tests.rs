// stockroom_dashboard/src/web/handlers/tests.rs

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use stockroom::api::{ApiRequest, ApiResponse, Body, Method};
use stockroom::notify::RecordingNotifier;
use stockroom::{ApiError, ApiResult, Severity, Transport};

use crate::config::AppConfig;
use crate::flows::register_all_flows;
use crate::state::AppState;
use crate::web::configure_app_routes;

/// Canned backend. One reply per "METHOD path"; anything else answers 404.
#[derive(Default)]
struct StubBackend {
  replies: Mutex<HashMap<String, Option<ApiResponse>>>,
  sent: Mutex<Vec<ApiRequest>>,
}

impl StubBackend {
  fn ok(&self, method: Method, path: &str, data: Value) -> &Self {
    let body = json!({ "success": true, "data": data }).to_string();
    self.set(method, path, Some(ApiResponse::new(200, body)))
  }

  fn fail(&self, method: Method, path: &str, message: &str) -> &Self {
    let body = json!({ "success": false, "message": message }).to_string();
    self.set(method, path, Some(ApiResponse::new(200, body)))
  }

  fn down(&self, method: Method, path: &str) -> &Self {
    self.set(method, path, None)
  }

  fn set(&self, method: Method, path: &str, reply: Option<ApiResponse>) -> &Self {
    self.replies.lock().insert(format!("{:?} {}", method, path), reply);
    self
  }

  fn sent_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
    self
      .sent
      .lock()
      .iter()
      .filter(|r| r.method == method && r.path == path)
      .cloned()
      .collect()
  }
}

#[async_trait]
impl Transport for StubBackend {
  async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
    self.sent.lock().push(request.clone());
    let reply = self.replies.lock().get(&format!("{:?} {}", request.method, request.path)).cloned();
    match reply {
      Some(Some(response)) => Ok(response),
      Some(None) => Err(ApiError::Network {
        endpoint: request.path,
        source: anyhow::anyhow!("connection refused"),
      }),
      None => Ok(ApiResponse::new(404, r#"{"success":false,"message":"Not found"}"#)),
    }
  }
}

fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    backend_url: "http://backend.test/api".to_string(),
    request_timeout: Duration::from_secs(1),
    refresh_on_start: false,
    activity_actor: "tester".to_string(),
  }
}

fn test_state(backend: &Arc<StubBackend>, notifier: &Arc<RecordingNotifier>) -> AppState {
  let state = AppState::new(Arc::new(test_config()), backend.clone()).with_notifier(notifier.clone());
  register_all_flows(&state.flows);
  state
}

fn order_json(receipt: &str, status: &str) -> Value {
  json!({
    "receipt": receipt,
    "customerName": "Amina Yusuf",
    "customerPhone": "0803 555 0101",
    "items": [{ "productId": "p-1", "quantity": 2, "unitPrice": "50000" }],
    "totalAmount": "100000",
    "paidAmount": "40000",
    "paymentStatus": "partial",
    "status": status
  })
}

fn assignment_body(quantity: u32) -> Value {
  json!({
    "productId": "p-1",
    "quantity": quantity,
    "direction": "warehouse_to_shop",
    "warehouseId": "w-1",
    "shopId": "s-1"
  })
}

fn created_assignment() -> Value {
  json!({
    "id": "a-9",
    "productId": "p-1",
    "quantity": 3,
    "direction": "warehouse_to_shop",
    "warehouseId": "w-1",
    "shopId": "s-1"
  })
}

macro_rules! app {
  ($state:expr) => {
    test::init_service(
      App::new()
        .app_data(web::Data::new($state.clone()))
        .configure(configure_app_routes),
    )
    .await
  };
}

#[actix_rt::test]
async fn health_and_status_table() {
  let backend = Arc::new(StubBackend::default());
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::get().uri("/api/v1/health").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["status"], "ok");

  let req = test::TestRequest::get().uri("/api/v1/status/table").to_request();
  let table: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  assert_eq!(table.len(), 14);
  assert_eq!(table[0]["status"], "pending_payment");
  let delivered = table.iter().find(|b| b["status"] == "delivered").unwrap();
  assert_eq!(delivered["progress"], 100);
}

#[actix_rt::test]
async fn order_board_loads_once_and_filters() {
  let backend = Arc::new(StubBackend::default());
  backend.ok(
    Method::Get,
    "orders",
    json!([order_json("R-1", "packaged"), order_json("R-2", "delivered"), order_json("R-3", "on_hold")]),
  );
  let notifier = Arc::new(RecordingNotifier::new());
  let state = test_state(&backend, &notifier);
  let app = app!(state);

  let req = test::TestRequest::get().uri("/api/v1/orders?status=packaged").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let rows = body["orders"].as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["receipt"], "R-1");
  assert_eq!(rows[0]["badge"]["progress"], 65);
  assert_eq!(rows[0]["payment"]["balance"], "60000");
  assert_eq!(rows[0]["payment"]["paidPercent"], 40);

  // Second view reuses the loaded board.
  let req = test::TestRequest::get().uri("/api/v1/orders").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["orders"].as_array().unwrap().len(), 3);
  assert_eq!(backend.sent_to(Method::Get, "orders").len(), 1);

  let req = test::TestRequest::get().uri("/api/v1/orders/breakdown").to_request();
  let breakdown: Vec<Value> = test::call_and_read_body_json(&app, req).await;
  let statuses: Vec<&str> = breakdown.iter().map(|c| c["status"].as_str().unwrap()).collect();
  assert_eq!(statuses, vec!["packaged", "delivered", "on_hold"]);
}

#[actix_rt::test]
async fn failed_first_load_is_an_error_notification() {
  let backend = Arc::new(StubBackend::default());
  backend.down(Method::Get, "orders");
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::get().uri("/api/v1/orders").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["level"], "error");
  assert!(notifier.last().unwrap().is_error());
}

#[actix_rt::test]
async fn order_detail_has_workflow_and_payment() {
  let backend = Arc::new(StubBackend::default());
  backend.ok(Method::Get, "orders/R-1", order_json("R-1", "packaged"));
  let notifier = Arc::new(RecordingNotifier::new());
  let state = test_state(&backend, &notifier);
  let app = app!(state);

  let req = test::TestRequest::get().uri("/api/v1/orders/R-1").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  let states: Vec<&str> = body["workflow"]["steps"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["state"].as_str().unwrap())
    .collect();
  assert_eq!(states, vec!["completed", "completed", "completed", "active", "pending", "pending"]);
  assert_eq!(body["payment"]["balance"], "60000");
  assert!(state.board.read().find("R-1").is_some());

  let req = test::TestRequest::get().uri("/api/v1/orders/R-404").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn order_export_is_a_csv_download() {
  let backend = Arc::new(StubBackend::default());
  backend.ok(Method::Get, "orders", json!([order_json("R-1", "paid")]));
  let notifier = Arc::new(RecordingNotifier::new());
  let state = test_state(&backend, &notifier);
  crate::services::order_sync::refresh_orders(&state).await.unwrap();
  let app = app!(state);

  let req = test::TestRequest::get().uri("/api/v1/orders/export.csv").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let content_type = resp.headers().get(header::CONTENT_TYPE).unwrap().to_str().unwrap().to_string();
  assert!(content_type.starts_with("text/csv"));
  let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap().to_string();
  assert!(disposition.contains("orders-"));
  let text = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
  assert!(text.starts_with("receipt,customer,phone,status,progress"));
  assert!(text.contains("R-1"));
}

#[actix_rt::test]
async fn export_uses_its_own_query_not_the_last_board_view() {
  let backend = Arc::new(StubBackend::default());
  backend.ok(
    Method::Get,
    "orders",
    json!([order_json("R-1", "packaged"), order_json("R-2", "delivered")]),
  );
  let notifier = Arc::new(RecordingNotifier::new());
  let state = test_state(&backend, &notifier);
  let app = app!(state);

  // Export on a board nobody has opened yet still loads it first.
  let req = test::TestRequest::get().uri("/api/v1/orders/export.csv").to_request();
  let text = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
  assert!(text.contains("R-1") && text.contains("R-2"), "{}", text);
  assert_eq!(backend.sent_to(Method::Get, "orders").len(), 1);

  // Another client narrows its own view.
  let req = test::TestRequest::get().uri("/api/v1/orders?status=packaged").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["orders"].as_array().unwrap().len(), 1);
  assert_eq!(body["filter"]["status"], "packaged");

  let req = test::TestRequest::get().uri("/api/v1/orders/export.csv").to_request();
  let text = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
  assert!(text.contains("R-1") && text.contains("R-2"), "{}", text);

  let req = test::TestRequest::get().uri("/api/v1/orders/export.csv?status=delivered").to_request();
  let text = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
  assert!(!text.contains("R-1") && text.contains("R-2"), "{}", text);

  let req = test::TestRequest::get().uri("/api/v1/orders").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["orders"].as_array().unwrap().len(), 2);
  assert!(state.board.read().filter.is_empty());
  assert_eq!(backend.sent_to(Method::Get, "orders").len(), 1);
}

#[actix_rt::test]
async fn assignment_runs_every_step() {
  let backend = Arc::new(StubBackend::default());
  backend
    .ok(Method::Post, "assignments", created_assignment())
    .ok(Method::Get, "products/p-1", json!({ "id": "p-1", "name": "Ankara Dress", "price": "25000", "stock": 7 }))
    .ok(Method::Post, "activities", Value::Null);
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post().uri("/api/v1/assignments").set_json(assignment_body(3)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["notification"]["level"], "success");
  assert_eq!(body["data"]["assignment"]["id"], "a-9");
  assert_eq!(body["data"]["product"]["stock"], 7);
  assert!(body["deferred"].as_array().unwrap().is_empty());

  let logged = backend.sent_to(Method::Post, "activities");
  assert_eq!(logged.len(), 1);
  match &logged[0].body {
    Some(Body::Json(activity)) => {
      assert_eq!(activity["action"], "assigned_product");
      assert_eq!(activity["actor"], "tester");
      let detail = activity["detail"].as_str().unwrap();
      assert!(detail.starts_with("3 units warehouse_to_shop (w-1 / s-1)"), "{}", detail);
      assert!(detail.contains("(action "), "{}", detail);
    }
    other => panic!("unexpected activity body: {:?}", other),
  }
  assert_eq!(notifier.last().unwrap().level, Severity::Success);
}

#[actix_rt::test]
async fn invalid_assignment_never_reaches_the_backend() {
  let backend = Arc::new(StubBackend::default());
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post().uri("/api/v1/assignments").set_json(assignment_body(0)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Quantity must be at least 1.");
  assert!(backend.sent_to(Method::Post, "assignments").is_empty());
}

#[actix_rt::test]
async fn assignment_beyond_stock_is_refused_before_submitting() {
  let backend = Arc::new(StubBackend::default());
  backend
    .ok(Method::Get, "products/p-1", json!({ "id": "p-1", "name": "Ankara Dress", "price": "25000", "stock": 2 }))
    .ok(Method::Post, "assignments", created_assignment());
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post().uri("/api/v1/assignments").set_json(assignment_body(500)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Only 2 units of Ankara Dress are in stock.");
  assert!(backend.sent_to(Method::Post, "assignments").is_empty());
  assert!(backend.sent_to(Method::Post, "activities").is_empty());
}

#[actix_rt::test]
async fn backend_refusal_aborts_the_assignment() {
  let backend = Arc::new(StubBackend::default());
  backend
    .ok(Method::Get, "products/p-1", json!({ "id": "p-1", "name": "Ankara Dress", "price": "25000", "stock": 7 }))
    .fail(Method::Post, "assignments", "Insufficient stock");
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post().uri("/api/v1/assignments").set_json(assignment_body(3)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({ "level": "error", "message": "Insufficient stock" }));
  assert!(backend.sent_to(Method::Post, "activities").is_empty());
}

#[actix_rt::test]
async fn failed_activity_log_still_completes_the_assignment() {
  let backend = Arc::new(StubBackend::default());
  backend
    .ok(Method::Post, "assignments", created_assignment())
    .ok(Method::Get, "products/p-1", json!({ "id": "p-1", "name": "Ankara Dress", "price": "25000", "stock": 7 }))
    .down(Method::Post, "activities");
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post().uri("/api/v1/assignments").set_json(assignment_body(3)).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::CREATED);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["notification"]["level"], "warning");
  assert_eq!(body["deferred"][0]["step"], "log_activity");
  assert_eq!(body["data"]["assignment"]["id"], "a-9");
}

#[actix_rt::test]
async fn reviewing_a_change() {
  let backend = Arc::new(StubBackend::default());
  backend
    .ok(Method::Post, "pending-changes/c-1/approve", Value::Null)
    .ok(Method::Get, "pending-changes", json!([]))
    .ok(Method::Post, "activities", Value::Null);
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post().uri("/api/v1/pending-changes/c-1/approve").to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["notification"]["message"], "Change approved.");
  assert_eq!(body["data"]["remaining"], json!([]));

  let req = test::TestRequest::post().uri("/api/v1/pending-changes/c-1/maybe").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn creating_a_user_validates_email() {
  let backend = Arc::new(StubBackend::default());
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::post()
    .uri("/api/v1/users")
    .set_json(json!({ "name": "Tunde", "email": "tunde.example.com", "role": "packager" }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  assert!(backend.sent_to(Method::Post, "users").is_empty());
}

#[actix_rt::test]
async fn sites_load_independently() {
  let backend = Arc::new(StubBackend::default());
  backend
    .ok(Method::Get, "warehouses", json!([{ "id": "w-1", "name": "Main" }]))
    .down(Method::Get, "shops");
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let req = test::TestRequest::get().uri("/api/v1/sites").to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::OK);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["warehouses"][0]["id"], "w-1");
  assert!(body["shops"].is_null());
  assert_eq!(body["notifications"].as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn product_import_is_checked_before_upload() {
  let backend = Arc::new(StubBackend::default());
  backend.ok(Method::Post, "products/bulk-import", json!({ "imported": 1, "skipped": 0 }));
  let notifier = Arc::new(RecordingNotifier::new());
  let app = app!(test_state(&backend, &notifier));

  let bad = "name,sku,category,price,stock\n,SKU-1,Apparel,abc,2\n";
  let req = test::TestRequest::post().uri("/api/v1/products/import").set_payload(bad).to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["issues"][0]["line"], 2);
  assert!(backend.sent_to(Method::Post, "products/bulk-import").is_empty());

  let good = "name,sku,category,price,stock\nSample Shirt,SKU-0001,Apparel,2500.00,10\n";
  let req = test::TestRequest::post().uri("/api/v1/products/import").set_payload(good).to_request();
  let body: Value = test::call_and_read_body_json(&app, req).await;
  assert_eq!(body["receipt"]["imported"], 1);
  assert_eq!(backend.sent_to(Method::Post, "products/bulk-import").len(), 1);
}
