// stockroom/src/status/mod.rs

//! The order status progression model.
//!
//! One canonical table maps every recognised order status to a completion
//! percentage, a display tone and an icon. The mapping is display-only: the
//! backend owns every transition, the dashboard just renders whatever status
//! string it is handed.
//!
//! Every function here is total. Values outside the table become
//! [`OrderStatus::Unknown`] and render as a neutral 0% badge.

pub mod workflow;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use workflow::{workflow_for, Halt, StepState, WorkflowStep, WorkflowView};

/// Lifecycle status of a customer order, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
  #[default]
  PendingPayment,
  PartialPayment,
  Paid,
  Confirmed,
  AssignedPackager,
  Packaging,
  Packaged,
  AssignedDelivery,
  OutForDelivery,
  PickedUp,
  Delivered,
  Completed,
  Cancelled,
  Refunded,
  /// Anything the table does not know about. The raw value is kept for display.
  Unknown(String),
}

/// Visual tone of a status badge. Each tone has one stable CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
  Warning,
  Info,
  Primary,
  Accent,
  Success,
  Danger,
  Muted,
  Neutral,
}

impl StatusTone {
  pub fn css_class(self) -> &'static str {
    match self {
      StatusTone::Warning => "status-warning",
      StatusTone::Info => "status-info",
      StatusTone::Primary => "status-primary",
      StatusTone::Accent => "status-accent",
      StatusTone::Success => "status-success",
      StatusTone::Danger => "status-danger",
      StatusTone::Muted => "status-muted",
      StatusTone::Neutral => "status-neutral",
    }
  }
}

/// Icon shown next to a status. Names follow the icon set used by the frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusIcon {
  Clock,
  Wallet,
  CreditCard,
  BadgeCheck,
  UserCheck,
  PackageOpen,
  Package,
  ClipboardList,
  Truck,
  Hand,
  CircleCheck,
  CircleX,
  RotateCcw,
  CircleHelp,
}

impl StatusIcon {
  pub fn name(self) -> &'static str {
    match self {
      StatusIcon::Clock => "clock",
      StatusIcon::Wallet => "wallet",
      StatusIcon::CreditCard => "credit-card",
      StatusIcon::BadgeCheck => "badge-check",
      StatusIcon::UserCheck => "user-check",
      StatusIcon::PackageOpen => "package-open",
      StatusIcon::Package => "package",
      StatusIcon::ClipboardList => "clipboard-list",
      StatusIcon::Truck => "truck",
      StatusIcon::Hand => "hand",
      StatusIcon::CircleCheck => "circle-check",
      StatusIcon::CircleX => "circle-x",
      StatusIcon::RotateCcw => "rotate-ccw",
      StatusIcon::CircleHelp => "circle-help",
    }
  }
}

impl OrderStatus {
  /// Every recognised status in canonical order: the happy path first, then
  /// the terminal branches.
  pub const ALL: [OrderStatus; 14] = [
    OrderStatus::PendingPayment,
    OrderStatus::PartialPayment,
    OrderStatus::Paid,
    OrderStatus::Confirmed,
    OrderStatus::AssignedPackager,
    OrderStatus::Packaging,
    OrderStatus::Packaged,
    OrderStatus::AssignedDelivery,
    OrderStatus::OutForDelivery,
    OrderStatus::PickedUp,
    OrderStatus::Delivered,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
    OrderStatus::Refunded,
  ];

  /// Parses a wire value. Never fails; unrecognised input becomes `Unknown`.
  pub fn parse(raw: &str) -> Self {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    match normalized.as_str() {
      "pending_payment" => OrderStatus::PendingPayment,
      "partial_payment" => OrderStatus::PartialPayment,
      "paid" => OrderStatus::Paid,
      "confirmed" => OrderStatus::Confirmed,
      "assigned_packager" => OrderStatus::AssignedPackager,
      "packaging" => OrderStatus::Packaging,
      "packaged" => OrderStatus::Packaged,
      "assigned_delivery" => OrderStatus::AssignedDelivery,
      "out_for_delivery" => OrderStatus::OutForDelivery,
      "picked_up" => OrderStatus::PickedUp,
      "delivered" => OrderStatus::Delivered,
      "completed" => OrderStatus::Completed,
      "cancelled" => OrderStatus::Cancelled,
      "refunded" => OrderStatus::Refunded,
      _ => OrderStatus::Unknown(raw.to_string()),
    }
  }

  /// The snake_case wire value. `Unknown` returns whatever the backend sent.
  pub fn as_str(&self) -> &str {
    match self {
      OrderStatus::PendingPayment => "pending_payment",
      OrderStatus::PartialPayment => "partial_payment",
      OrderStatus::Paid => "paid",
      OrderStatus::Confirmed => "confirmed",
      OrderStatus::AssignedPackager => "assigned_packager",
      OrderStatus::Packaging => "packaging",
      OrderStatus::Packaged => "packaged",
      OrderStatus::AssignedDelivery => "assigned_delivery",
      OrderStatus::OutForDelivery => "out_for_delivery",
      OrderStatus::PickedUp => "picked_up",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
      OrderStatus::Refunded => "refunded",
      OrderStatus::Unknown(raw) => raw.as_str(),
    }
  }

  pub fn label(&self) -> &str {
    match self {
      OrderStatus::PendingPayment => "Pending Payment",
      OrderStatus::PartialPayment => "Partial Payment",
      OrderStatus::Paid => "Paid",
      OrderStatus::Confirmed => "Confirmed",
      OrderStatus::AssignedPackager => "Assigned to Packager",
      OrderStatus::Packaging => "Packaging",
      OrderStatus::Packaged => "Packaged",
      OrderStatus::AssignedDelivery => "Assigned for Delivery",
      OrderStatus::OutForDelivery => "Out for Delivery",
      OrderStatus::PickedUp => "Picked Up",
      OrderStatus::Delivered => "Delivered",
      OrderStatus::Completed => "Completed",
      OrderStatus::Cancelled => "Cancelled",
      OrderStatus::Refunded => "Refunded",
      OrderStatus::Unknown(_) => "Unknown",
    }
  }

  /// Completion percentage in `[0, 100]`.
  pub fn progress(&self) -> u8 {
    match self {
      OrderStatus::PendingPayment => 5,
      OrderStatus::PartialPayment => 15,
      OrderStatus::Paid => 25,
      OrderStatus::Confirmed => 35,
      OrderStatus::AssignedPackager => 45,
      OrderStatus::Packaging => 55,
      OrderStatus::Packaged => 65,
      OrderStatus::AssignedDelivery => 75,
      OrderStatus::OutForDelivery => 85,
      OrderStatus::PickedUp => 95,
      OrderStatus::Delivered | OrderStatus::Completed => 100,
      OrderStatus::Cancelled | OrderStatus::Refunded => 0,
      OrderStatus::Unknown(_) => 0,
    }
  }

  pub fn tone(&self) -> StatusTone {
    match self {
      OrderStatus::PendingPayment | OrderStatus::PartialPayment => StatusTone::Warning,
      OrderStatus::Paid | OrderStatus::Confirmed => StatusTone::Info,
      OrderStatus::AssignedPackager | OrderStatus::Packaging | OrderStatus::Packaged => StatusTone::Primary,
      OrderStatus::AssignedDelivery | OrderStatus::OutForDelivery | OrderStatus::PickedUp => StatusTone::Accent,
      OrderStatus::Delivered | OrderStatus::Completed => StatusTone::Success,
      OrderStatus::Cancelled => StatusTone::Danger,
      OrderStatus::Refunded => StatusTone::Muted,
      OrderStatus::Unknown(_) => StatusTone::Neutral,
    }
  }

  pub fn icon(&self) -> StatusIcon {
    match self {
      OrderStatus::PendingPayment => StatusIcon::Clock,
      OrderStatus::PartialPayment => StatusIcon::Wallet,
      OrderStatus::Paid => StatusIcon::CreditCard,
      OrderStatus::Confirmed => StatusIcon::BadgeCheck,
      OrderStatus::AssignedPackager => StatusIcon::UserCheck,
      OrderStatus::Packaging => StatusIcon::PackageOpen,
      OrderStatus::Packaged => StatusIcon::Package,
      OrderStatus::AssignedDelivery => StatusIcon::ClipboardList,
      OrderStatus::OutForDelivery => StatusIcon::Truck,
      OrderStatus::PickedUp => StatusIcon::Hand,
      OrderStatus::Delivered | OrderStatus::Completed => StatusIcon::CircleCheck,
      OrderStatus::Cancelled => StatusIcon::CircleX,
      OrderStatus::Refunded => StatusIcon::RotateCcw,
      OrderStatus::Unknown(_) => StatusIcon::CircleHelp,
    }
  }

  /// Delivered, completed, cancelled and refunded orders go no further.
  pub fn is_terminal(&self) -> bool {
    matches!(
      self,
      OrderStatus::Delivered | OrderStatus::Completed | OrderStatus::Cancelled | OrderStatus::Refunded
    )
  }

  /// Terminal without having made forward progress.
  pub fn is_halted(&self) -> bool {
    matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
  }

  pub fn is_recognized(&self) -> bool {
    !matches!(self, OrderStatus::Unknown(_))
  }

  pub fn badge(&self) -> StatusBadge {
    StatusBadge::for_status(self)
  }
}

impl From<String> for OrderStatus {
  fn from(raw: String) -> Self {
    OrderStatus::parse(&raw)
  }
}

impl From<&str> for OrderStatus {
  fn from(raw: &str) -> Self {
    OrderStatus::parse(raw)
  }
}

impl From<OrderStatus> for String {
  fn from(status: OrderStatus) -> Self {
    match status {
      OrderStatus::Unknown(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

impl FromStr for OrderStatus {
  type Err = std::convert::Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(OrderStatus::parse(s))
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Progress for a raw status string. Unknown strings give 0.
pub fn progress_for(status: impl Into<OrderStatus>) -> u8 {
  status.into().progress()
}

/// CSS class of the badge for a raw status string.
pub fn color_class_for(status: impl Into<OrderStatus>) -> &'static str {
  status.into().tone().css_class()
}

/// Icon name for a raw status string.
pub fn icon_for(status: impl Into<OrderStatus>) -> &'static str {
  status.into().icon().name()
}

/// Everything a status badge or progress bar needs, precomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBadge {
  pub status: String,
  pub label: String,
  pub progress: u8,
  pub tone: StatusTone,
  pub color_class: &'static str,
  pub icon: &'static str,
  pub terminal: bool,
  pub halted: bool,
  pub recognized: bool,
}

impl StatusBadge {
  pub fn for_status(status: &OrderStatus) -> Self {
    let tone = status.tone();
    Self {
      status: status.as_str().to_string(),
      label: status.label().to_string(),
      progress: status.progress(),
      tone,
      color_class: tone.css_class(),
      icon: status.icon().name(),
      terminal: status.is_terminal(),
      halted: status.is_halted(),
      recognized: status.is_recognized(),
    }
  }
}
