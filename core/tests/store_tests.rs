// tests/store_tests.rs
mod common;

use chrono::Utc;
use common::*;
use stockroom::store::OrderFilter;
use stockroom::{Notification, OrderStatus, OrdersAction, OrdersBoard, PaymentStatus, RequestToken, Store};

fn loaded_board(orders: Vec<stockroom::Order>) -> Store<OrdersBoard> {
  let store = Store::new(OrdersBoard::default());
  let token = RequestToken::issue();
  store.dispatch(OrdersAction::FetchStarted { token });
  store.dispatch(OrdersAction::FetchSucceeded {
    token,
    orders,
    at: Utc::now(),
  });
  store
}

#[test]
fn test_dispatch_bumps_revision() {
  setup_tracing();
  let store = Store::new(OrdersBoard::default());
  assert_eq!(store.revision(), 0);
  assert_eq!(store.dispatch(OrdersAction::SetSearch(Some("amina".to_string()))), 1);
  assert_eq!(store.dispatch(OrdersAction::ClearFilters), 2);
  assert_eq!(store.revision(), 2);
  assert!(store.read().filter.is_empty());
}

#[test]
fn test_fetch_lifecycle() {
  let store = Store::new(OrdersBoard::default());
  let token = RequestToken::issue();
  store.dispatch(OrdersAction::FetchStarted { token });
  assert!(store.read().loading);

  store.dispatch(OrdersAction::FetchSucceeded {
    token,
    orders: vec![order("RCP-1", "Amina", "paid")],
    at: Utc::now(),
  });
  let board = store.snapshot();
  assert!(!board.loading);
  assert_eq!(board.orders.len(), 1);
  assert!(board.loaded_at.is_some());
}

#[test]
fn test_stale_response_is_discarded() {
  let store = Store::new(OrdersBoard::default());
  let slow = RequestToken::issue();
  let fast = RequestToken::issue();
  store.dispatch(OrdersAction::FetchStarted { token: slow });
  store.dispatch(OrdersAction::FetchStarted { token: fast });

  store.dispatch(OrdersAction::FetchSucceeded {
    token: fast,
    orders: vec![order("RCP-NEW", "Bola", "packaged")],
    at: Utc::now(),
  });
  store.dispatch(OrdersAction::FetchSucceeded {
    token: slow,
    orders: vec![order("RCP-OLD", "Bola", "paid")],
    at: Utc::now(),
  });
  store.dispatch(OrdersAction::FetchFailed {
    token: slow,
    notification: Notification::error("timed out"),
  });

  let board = store.read();
  assert_eq!(board.orders[0].receipt, "RCP-NEW");
  assert!(board.notification.is_none());
  assert_eq!(board.latest_token(), Some(fast));
}

#[test]
fn test_out_of_order_start_keeps_newest_token() {
  let store = Store::new(OrdersBoard::default());
  let older = RequestToken::issue();
  let newer = RequestToken::issue();
  store.dispatch(OrdersAction::FetchStarted { token: newer });
  store.dispatch(OrdersAction::FetchStarted { token: older });
  assert_eq!(store.read().latest_token(), Some(newer));
}

#[test]
fn test_failure_surfaces_notification() {
  let store = Store::new(OrdersBoard::default());
  let token = RequestToken::issue();
  store.dispatch(OrdersAction::FetchStarted { token });
  store.dispatch(OrdersAction::FetchFailed {
    token,
    notification: Notification::error("Could not reach the server."),
  });
  let board = store.read();
  assert!(!board.loading);
  assert!(board.notification.as_ref().map_or(false, Notification::is_error));
}

#[test]
fn test_visible_applies_all_filters() {
  let mut unpaid = order("RCP-3", "Chidi Okafor", "pending_payment");
  unpaid.payment_status = PaymentStatus::Pending;
  unpaid.customer_phone = Some("0809 111 2222".to_string());
  let store = loaded_board(vec![
    order("RCP-1", "Amina Yusuf", "packaged"),
    order("RCP-2", "Bola Ade", "packaged"),
    unpaid,
  ]);

  store.dispatch(OrdersAction::SetStatusFilter(Some(OrderStatus::Packaged)));
  store.dispatch(OrdersAction::SetSearch(Some(" amina ".to_string())));
  let receipts: Vec<String> = store.read().visible().iter().map(|o| o.receipt.clone()).collect();
  assert_eq!(receipts, ["RCP-1"]);

  store.dispatch(OrdersAction::ClearFilters);
  store.dispatch(OrdersAction::SetPaymentFilter(Some(PaymentStatus::Pending)));
  store.dispatch(OrdersAction::SetSearch(Some("2222".to_string())));
  assert_eq!(store.read().visible().len(), 1);

  store.dispatch(OrdersAction::SetSearch(Some("   ".to_string())));
  assert_eq!(store.read().filter.search, None);
}

#[test]
fn test_filter_matches_directly() {
  let filter = OrderFilter {
    status: Some(OrderStatus::Cancelled),
    ..Default::default()
  };
  assert!(!filter.matches(&order("RCP-1", "Amina", "paid")));
  assert!(filter.matches(&order("RCP-2", "Amina", "cancelled")));
}

#[test]
fn test_order_updated_replaces_in_place() {
  let store = loaded_board(vec![order("RCP-1", "Amina", "paid"), order("RCP-2", "Bola", "paid")]);
  store.dispatch(OrdersAction::OrderUpdated(order("RCP-1", "Amina", "packaged")));
  store.dispatch(OrdersAction::OrderUpdated(order("RCP-9", "Ngozi", "paid")));
  let board = store.read();
  assert_eq!(board.orders.len(), 3);
  assert_eq!(board.find("RCP-1").map(|o| o.status.clone()), Some(OrderStatus::Packaged));
}

#[test]
fn test_status_breakdown_in_table_order() {
  let store = loaded_board(vec![
    order("RCP-1", "A", "delivered"),
    order("RCP-2", "B", "paid"),
    order("RCP-3", "C", "mystery"),
    order("RCP-4", "D", "paid"),
  ]);
  let breakdown = store.read().status_breakdown();
  let summary: Vec<(String, usize)> = breakdown.iter().map(|c| (c.status.to_string(), c.count)).collect();
  assert_eq!(
    summary,
    vec![
      ("paid".to_string(), 2),
      ("delivered".to_string(), 1),
      ("mystery".to_string(), 1)
    ]
  );
  assert_eq!(breakdown[2].color_class, "status-neutral");
}
