// stockroom/src/model/user.rs

use serde::{Deserialize, Serialize};

/// Staff role. Unrecognised roles are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
  Admin,
  Manager,
  Storekeeper,
  Packager,
  Receptionist,
  Attendee,
  Delivery,
  Other(String),
}

impl Role {
  pub fn as_str(&self) -> &str {
    match self {
      Role::Admin => "admin",
      Role::Manager => "manager",
      Role::Storekeeper => "storekeeper",
      Role::Packager => "packager",
      Role::Receptionist => "receptionist",
      Role::Attendee => "attendee",
      Role::Delivery => "delivery",
      Role::Other(raw) => raw.as_str(),
    }
  }
}

impl From<String> for Role {
  fn from(raw: String) -> Self {
    match raw.trim().to_ascii_lowercase().as_str() {
      "admin" => Role::Admin,
      "manager" => Role::Manager,
      "storekeeper" => Role::Storekeeper,
      "packager" => Role::Packager,
      "receptionist" => Role::Receptionist,
      "attendee" => Role::Attendee,
      "delivery" => Role::Delivery,
      _ => Role::Other(raw),
    }
  }
}

impl From<Role> for String {
  fn from(role: Role) -> Self {
    match role {
      Role::Other(raw) => raw,
      known => known.as_str().to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub phone: Option<String>,
  pub role: Role,
}

/// Payload of the "create user" form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
  pub name: String,
  pub email: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone: Option<String>,
  pub role: Role,
}
