// tests/common/mod.rs
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use stockroom::api::{ApiRequest, ApiResponse, Method};
use stockroom::model::{Order, PaymentStatus, StaffRefs};
use stockroom::{ApiError, ApiResult, FlowError, OrderStatus, Transport};
use tracing::Level;

// --- Tracing ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fake backend ---

#[derive(Debug, Clone)]
pub enum Reply {
  Respond(ApiResponse),
  NetworkDown,
}

/// In-memory `Transport`. Replies are queued per "METHOD path"; the last reply
/// for a route is sticky. Unknown routes answer 404.
#[derive(Default)]
pub struct FakeBackend {
  replies: Mutex<HashMap<String, VecDeque<Reply>>>,
  sent: Mutex<Vec<ApiRequest>>,
}

fn route_key(method: Method, path: &str) -> String {
  format!("{:?} {}", method, path)
}

impl FakeBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reply(&self, method: Method, path: &str, status: u16, body: serde_json::Value) -> &Self {
    self.push(method, path, Reply::Respond(ApiResponse::new(status, body.to_string())));
    self
  }

  pub fn reply_raw(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
    self.push(method, path, Reply::Respond(ApiResponse::new(status, body)));
    self
  }

  /// `{"success": true, "data": data}` with HTTP 200.
  pub fn ok(&self, method: Method, path: &str, data: serde_json::Value) -> &Self {
    self.reply(method, path, 200, json!({ "success": true, "data": data }))
  }

  pub fn network_down(&self, method: Method, path: &str) -> &Self {
    self.push(method, path, Reply::NetworkDown);
    self
  }

  fn push(&self, method: Method, path: &str, reply: Reply) {
    self.replies.lock().entry(route_key(method, path)).or_default().push_back(reply);
  }

  pub fn sent(&self) -> Vec<ApiRequest> {
    self.sent.lock().clone()
  }

  pub fn sent_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
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
impl Transport for FakeBackend {
  async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
    self.sent.lock().push(request.clone());
    let reply = {
      let mut replies = self.replies.lock();
      match replies.get_mut(&route_key(request.method, &request.path)) {
        Some(queue) if queue.len() > 1 => queue.pop_front(),
        Some(queue) => queue.front().cloned(),
        None => None,
      }
    };
    match reply {
      Some(Reply::Respond(response)) => Ok(response),
      Some(Reply::NetworkDown) => Err(ApiError::Network {
        endpoint: request.path.clone(),
        source: anyhow::anyhow!("connection refused"),
      }),
      None => Ok(ApiResponse::new(404, r#"{"success":false,"message":"Not found"}"#)),
    }
  }
}

// --- Fixtures ---

pub fn order(receipt: &str, customer: &str, status: &str) -> Order {
  Order {
    receipt: receipt.to_string(),
    customer_name: customer.to_string(),
    customer_phone: None,
    items: Vec::new(),
    total_amount: Decimal::new(100_000, 0),
    paid_amount: None,
    balance_amount: None,
    payment_status: PaymentStatus::Paid,
    status: OrderStatus::parse(status),
    staff: StaffRefs::default(),
    created_at: None,
    updated_at: None,
  }
}

pub fn order_json(receipt: &str, status: &str) -> serde_json::Value {
  json!({
    "receipt": receipt,
    "customerName": "Amina Yusuf",
    "customerPhone": "0803 555 0101",
    "items": [
      { "productId": "p-1", "productName": "Ankara Dress", "quantity": 2, "unitPrice": "25000" },
      { "productId": "p-2", "quantity": 1, "unitPrice": "50000" }
    ],
    "totalAmount": "100000",
    "paidAmount": "40000",
    "paymentStatus": "partial",
    "status": status,
    "packager": "Tunde",
    "createdAt": "2026-03-01T09:30:00Z"
  })
}

// --- Error type for flow tests ---
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum TestError {
  #[error("Flow framework error: {0}")]
  Flow(String),

  #[error("Test handler failed: {0}")]
  Handler(String),
}

impl From<FlowError> for TestError {
  fn from(err: FlowError) -> Self {
    TestError::Flow(format!("{:?}", err))
  }
}

#[derive(Clone, Debug, Default)]
pub struct TestContext {
  pub counter: i32,
  pub steps_executed: Vec<String>,
  pub should_stop_at: Option<String>,
}

pub fn record_step(step_name: &'static str) -> stockroom::flow::Handler<TestContext, TestError> {
  Box::new(move |ctx| {
    Box::pin(async move {
      let mut guard = ctx.write();
      guard.counter += 1;
      guard.steps_executed.push(step_name.to_string());
      if guard.should_stop_at.as_deref() == Some(step_name) {
        return Ok(stockroom::FlowControl::Stop);
      }
      Ok(stockroom::FlowControl::Continue)
    })
  })
}

pub fn failing_step(step_name: &'static str, message: &'static str) -> stockroom::flow::Handler<TestContext, TestError> {
  Box::new(move |ctx| {
    Box::pin(async move {
      ctx.write().steps_executed.push(step_name.to_string());
      Err(TestError::Handler(message.to_string()))
    })
  })
}
