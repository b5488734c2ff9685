// stockroom/src/model/assignment.rs

//! Product assignments: a quantity of a product moved between a warehouse and a shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentDirection {
  #[default]
  WarehouseToShop,
  ShopToWarehouse,
}

impl AssignmentDirection {
  pub fn as_str(self) -> &'static str {
    match self {
      AssignmentDirection::WarehouseToShop => "warehouse_to_shop",
      AssignmentDirection::ShopToWarehouse => "shop_to_warehouse",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
  pub id: String,
  pub product_id: String,
  pub quantity: u32,
  #[serde(default)]
  pub direction: AssignmentDirection,
  pub warehouse_id: String,
  pub shop_id: String,
  #[serde(default)]
  pub created_at: Option<DateTime<Utc>>,
}

/// Payload of the assignment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignment {
  pub product_id: String,
  pub quantity: u32,
  #[serde(default)]
  pub direction: AssignmentDirection,
  pub warehouse_id: String,
  pub shop_id: String,
}
