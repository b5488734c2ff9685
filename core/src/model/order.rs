// stockroom/src/model/order.rs

use crate::status::{workflow_for, OrderStatus, StatusBadge, WorkflowView};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of an order has been paid for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
  #[default]
  Pending,
  Partial,
  Paid,
  Refunded,
  Unknown(String),
}

impl PaymentStatus {
  pub fn parse(raw: &str) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "pending" | "unpaid" => PaymentStatus::Pending,
      "partial" | "partially_paid" => PaymentStatus::Partial,
      "paid" | "full" | "fully_paid" => PaymentStatus::Paid,
      "refunded" => PaymentStatus::Refunded,
      _ => PaymentStatus::Unknown(raw.to_string()),
    }
  }

  pub fn as_str(&self) -> &str {
    match self {
      PaymentStatus::Pending => "pending",
      PaymentStatus::Partial => "partial",
      PaymentStatus::Paid => "paid",
      PaymentStatus::Refunded => "refunded",
      PaymentStatus::Unknown(raw) => raw.as_str(),
    }
  }

  /// Whether the balance is still open. Only these statuses carry a real `paidAmount`.
  pub fn is_outstanding(&self) -> bool {
    matches!(self, PaymentStatus::Pending | PaymentStatus::Partial)
  }
}

impl From<String> for PaymentStatus {
  fn from(raw: String) -> Self {
    PaymentStatus::parse(&raw)
  }
}

impl From<PaymentStatus> for String {
  fn from(status: PaymentStatus) -> Self {
    match status {
      PaymentStatus::Unknown(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

impl fmt::Display for PaymentStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
  pub product_id: String,
  #[serde(default)]
  pub product_name: Option<String>,
  pub quantity: u32,
  pub unit_price: Decimal,
}

impl LineItem {
  pub fn line_total(&self) -> Decimal {
    self.unit_price * Decimal::from(self.quantity)
  }
}

/// Staff members attached to an order, by display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRefs {
  #[serde(default)]
  pub attendee: Option<String>,
  #[serde(default)]
  pub receptionist: Option<String>,
  #[serde(default)]
  pub packager: Option<String>,
  #[serde(default)]
  pub storekeeper: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub receipt: String,
  pub customer_name: String,
  #[serde(default)]
  pub customer_phone: Option<String>,
  #[serde(default)]
  pub items: Vec<LineItem>,
  pub total_amount: Decimal,
  #[serde(default)]
  pub paid_amount: Option<Decimal>,
  #[serde(default)]
  pub balance_amount: Option<Decimal>,
  #[serde(default)]
  pub payment_status: PaymentStatus,
  #[serde(default)]
  pub status: OrderStatus,
  #[serde(flatten)]
  pub staff: StaffRefs,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
  pub fn badge(&self) -> StatusBadge {
    self.status.badge()
  }

  pub fn workflow(&self) -> WorkflowView {
    workflow_for(&self.status)
  }

  pub fn payment_summary(&self) -> PaymentSummary {
    PaymentSummary::for_order(self)
  }

  pub fn item_count(&self) -> u32 {
    self.items.iter().map(|i| i.quantity).sum()
  }

  /// Sum of line totals. May differ from `total_amount` when the backend
  /// applied discounts.
  pub fn items_total(&self) -> Decimal {
    self.items.iter().map(LineItem::line_total).sum()
  }
}

/// Amounts shown in the payment panel of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
  pub total: Decimal,
  pub paid: Decimal,
  pub balance: Decimal,
  /// Width of the paid sub-bar, `0..=100`.
  pub paid_percent: u8,
}

impl PaymentSummary {
  pub fn for_order(order: &Order) -> Self {
    Self::compute(&order.payment_status, order.total_amount, order.paid_amount)
  }

  /// Applies the display defaults: open balances are `total - paid`, anything
  /// else is treated as fully paid unless the backend says otherwise.
  pub fn compute(payment_status: &PaymentStatus, total: Decimal, paid_amount: Option<Decimal>) -> Self {
    let paid = if payment_status.is_outstanding() {
      paid_amount.unwrap_or(Decimal::ZERO)
    } else {
      paid_amount.unwrap_or(total)
    };
    let balance = (total - paid).max(Decimal::ZERO);
    Self {
      total,
      paid,
      balance,
      paid_percent: percent_of(paid, total),
    }
  }
}

fn percent_of(part: Decimal, whole: Decimal) -> u8 {
  if whole <= Decimal::ZERO {
    return 0;
  }
  let ratio = (part / whole * Decimal::ONE_HUNDRED).round();
  ratio
    .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
    .to_u8()
    .unwrap_or(0)
}
