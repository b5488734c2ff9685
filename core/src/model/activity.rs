// stockroom/src/model/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of the staff activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub actor: Option<String>,
  /// Short verb phrase, e.g. "assigned_product".
  pub action: String,
  /// What the action was applied to, e.g. a product id or receipt.
  pub subject: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub at: Option<DateTime<Utc>>,
}

impl Activity {
  pub fn new(action: impl Into<String>, subject: impl Into<String>) -> Self {
    Self {
      id: None,
      actor: None,
      action: action.into(),
      subject: subject.into(),
      detail: None,
      at: Some(Utc::now()),
    }
  }

  pub fn by(mut self, actor: impl Into<String>) -> Self {
    self.actor = Some(actor.into());
    self
  }

  pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
    self.detail = Some(detail.into());
    self
  }
}
