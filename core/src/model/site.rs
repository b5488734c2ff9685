// stockroom/src/model/site.rs

//! Physical locations stock moves between.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub location: Option<String>,
}
