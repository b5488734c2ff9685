// stockroom/src/store.rs

//! View state with a single mutation entry point.
//!
//! A [`Store`] wraps a [`Reducer`] state. All changes go through
//! [`Store::dispatch`], which bumps a revision counter so callers can tell
//! whether anything changed since they last looked.
//!
//! [`OrdersBoard`] is the order list view. Fetches are tagged with a
//! [`RequestToken`]; a result arriving with anything other than the newest
//! token is dropped, so a slow response never overwrites a newer one.

use crate::model::{Order, PaymentStatus};
use crate::notify::Notification;
use crate::status::OrderStatus;
use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{event, Level};

pub trait Reducer: Send + Sync + 'static {
  type Action: std::fmt::Debug + Send;

  fn reduce(&mut self, action: Self::Action);
}

pub struct Store<S: Reducer> {
  state: RwLock<S>,
  revision: AtomicU64,
}

impl<S: Reducer> Store<S> {
  pub fn new(initial: S) -> Self {
    Self {
      state: RwLock::new(initial),
      revision: AtomicU64::new(0),
    }
  }

  /// Applies `action` and returns the new revision.
  pub fn dispatch(&self, action: S::Action) -> u64 {
    event!(Level::TRACE, action = ?action, "dispatch");
    let mut state = self.state.write();
    state.reduce(action);
    self.revision.fetch_add(1, Ordering::SeqCst) + 1
  }

  pub fn revision(&self) -> u64 {
    self.revision.load(Ordering::SeqCst)
  }

  /// Read guard on the current state. Do not hold it across an `.await`.
  pub fn read(&self) -> RwLockReadGuard<'_, S> {
    self.state.read()
  }
}

impl<S: Reducer + Clone> Store<S> {
  pub fn snapshot(&self) -> S {
    self.state.read().clone()
  }
}

impl<S: Reducer + Default> Default for Store<S> {
  fn default() -> Self {
    Self::new(S::default())
  }
}

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Identifies one fetch. Tokens are process-wide and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RequestToken(u64);

impl RequestToken {
  pub fn issue() -> Self {
    RequestToken(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
  }

  pub fn value(self) -> u64 {
    self.0
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderFilter {
  pub status: Option<OrderStatus>,
  pub payment_status: Option<PaymentStatus>,
  pub search: Option<String>,
}

impl OrderFilter {
  pub fn is_empty(&self) -> bool {
    self.status.is_none() && self.payment_status.is_none() && self.search.is_none()
  }

  pub fn matches(&self, order: &Order) -> bool {
    if let Some(status) = &self.status {
      if &order.status != status {
        return false;
      }
    }
    if let Some(payment_status) = &self.payment_status {
      if &order.payment_status != payment_status {
        return false;
      }
    }
    match &self.search {
      Some(needle) => search_matches(order, needle),
      None => true,
    }
  }
}

fn search_matches(order: &Order, needle: &str) -> bool {
  let needle = needle.trim().to_lowercase();
  if needle.is_empty() {
    return true;
  }
  order.receipt.to_lowercase().contains(&needle)
    || order.customer_name.to_lowercase().contains(&needle)
    || order
      .customer_phone
      .as_deref()
      .map_or(false, |phone| phone.to_lowercase().contains(&needle))
}

/// Orders per status, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
  pub status: OrderStatus,
  pub label: String,
  pub color_class: &'static str,
  pub count: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersBoard {
  pub orders: Vec<Order>,
  pub filter: OrderFilter,
  pub loading: bool,
  pub notification: Option<Notification>,
  pub loaded_at: Option<DateTime<Utc>>,
  #[serde(skip)]
  latest_token: Option<RequestToken>,
}

#[derive(Debug)]
pub enum OrdersAction {
  FetchStarted { token: RequestToken },
  FetchSucceeded { token: RequestToken, orders: Vec<Order>, at: DateTime<Utc> },
  FetchFailed { token: RequestToken, notification: Notification },
  /// Replaces one order in place, or appends it when not yet listed.
  OrderUpdated(Order),
  SetStatusFilter(Option<OrderStatus>),
  SetPaymentFilter(Option<PaymentStatus>),
  SetSearch(Option<String>),
  ClearFilters,
  Notify(Notification),
  DismissNotification,
}

impl OrdersBoard {
  pub fn latest_token(&self) -> Option<RequestToken> {
    self.latest_token
  }

  fn is_current(&self, token: RequestToken) -> bool {
    self.latest_token == Some(token)
  }

  /// Orders passing the current filter, in backend order.
  pub fn visible(&self) -> Vec<&Order> {
    self.orders.iter().filter(|o| self.filter.matches(o)).collect()
  }

  pub fn find(&self, receipt: &str) -> Option<&Order> {
    self.orders.iter().find(|o| o.receipt == receipt)
  }

  /// Counts over all loaded orders, ignoring the filter. Recognised statuses
  /// come first in lifecycle order; unrecognised ones follow in first-seen order.
  pub fn status_breakdown(&self) -> Vec<StatusCount> {
    let mut counts: Vec<StatusCount> = Vec::new();
    let known = OrderStatus::ALL.into_iter();
    let unknown = self.orders.iter().map(|o| &o.status).filter(|s| !s.is_recognized()).cloned();

    for status in known.chain(unknown) {
      if counts.iter().any(|c| c.status == status) {
        continue;
      }
      let count = self.orders.iter().filter(|o| o.status == status).count();
      if count > 0 {
        counts.push(StatusCount {
          label: status.label().to_string(),
          color_class: status.tone().css_class(),
          status,
          count,
        });
      }
    }
    counts
  }
}

impl Reducer for OrdersBoard {
  type Action = OrdersAction;

  fn reduce(&mut self, action: OrdersAction) {
    match action {
      OrdersAction::FetchStarted { token } => {
        if self.latest_token.map_or(true, |current| token > current) {
          self.latest_token = Some(token);
          self.loading = true;
        }
      }
      OrdersAction::FetchSucceeded { token, orders, at } => {
        if !self.is_current(token) {
          event!(Level::DEBUG, token = token.value(), "Discarding stale order list.");
          return;
        }
        self.orders = orders;
        self.loaded_at = Some(at);
        self.loading = false;
      }
      OrdersAction::FetchFailed { token, notification } => {
        if !self.is_current(token) {
          event!(Level::DEBUG, token = token.value(), "Discarding stale fetch failure.");
          return;
        }
        self.loading = false;
        self.notification = Some(notification);
      }
      OrdersAction::OrderUpdated(order) => match self.orders.iter_mut().find(|o| o.receipt == order.receipt) {
        Some(slot) => *slot = order,
        None => self.orders.push(order),
      },
      OrdersAction::SetStatusFilter(status) => self.filter.status = status,
      OrdersAction::SetPaymentFilter(payment_status) => self.filter.payment_status = payment_status,
      OrdersAction::SetSearch(search) => {
        self.filter.search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
      }
      OrdersAction::ClearFilters => self.filter = OrderFilter::default(),
      OrdersAction::Notify(notification) => self.notification = Some(notification),
      OrdersAction::DismissNotification => self.notification = None,
    }
  }
}
