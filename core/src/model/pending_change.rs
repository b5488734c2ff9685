// stockroom/src/model/pending_change.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
  Edit,
  Delete,
}

/// A staff-submitted edit or delete waiting for an admin decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingChange {
  pub id: String,
  /// Resource the change targets, e.g. "products".
  pub entity: String,
  pub entity_id: String,
  pub kind: ChangeKind,
  pub submitted_by: String,
  #[serde(default)]
  pub payload: serde_json::Value,
  #[serde(default)]
  pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDecision {
  Approve,
  Reject,
}

impl ChangeDecision {
  /// Path segment used by the backend's review endpoints.
  pub fn as_path(self) -> &'static str {
    match self {
      ChangeDecision::Approve => "approve",
      ChangeDecision::Reject => "reject",
    }
  }

  pub fn parse(raw: &str) -> Option<Self> {
    match raw.trim().to_ascii_lowercase().as_str() {
      "approve" | "approved" => Some(ChangeDecision::Approve),
      "reject" | "rejected" => Some(ChangeDecision::Reject),
      _ => None,
    }
  }
}
