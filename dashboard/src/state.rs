// stockroom_dashboard/src/state.rs

use crate::config::AppConfig;
use crate::errors::AppError;
use std::sync::Arc;
use stockroom::notify::TracingNotifier;
use stockroom::{FlowRegistry, Notifier, OrdersBoard, RetailApi, SharedTransport, Store};

pub type Api = RetailApi<SharedTransport>;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<AppConfig>,
  pub api: Arc<Api>,
  pub flows: Arc<FlowRegistry<AppError>>,
  pub board: Arc<Store<OrdersBoard>>,
  pub notifier: Arc<dyn Notifier>,
}

impl AppState {
  /// State with an empty flow registry. Call
  /// [`crate::flows::register_all_flows`] before serving requests.
  pub fn new(config: Arc<AppConfig>, transport: SharedTransport) -> Self {
    Self {
      config,
      api: Arc::new(RetailApi::new(transport)),
      flows: Arc::new(FlowRegistry::new()),
      board: Arc::new(Store::new(OrdersBoard::default())),
      notifier: Arc::new(TracingNotifier),
    }
  }

  pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
    self.notifier = notifier;
    self
  }
}
