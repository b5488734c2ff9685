// stockroom/src/notify.rs

//! Transient messages shown to staff after an action.

use crate::api::ApiError;
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
  Success,
  Info,
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
  pub level: Severity,
  pub message: String,
}

impl Notification {
  pub fn new(level: Severity, message: impl Into<String>) -> Self {
    Self {
      level,
      message: message.into(),
    }
  }

  pub fn success(message: impl Into<String>) -> Self {
    Self::new(Severity::Success, message)
  }

  pub fn info(message: impl Into<String>) -> Self {
    Self::new(Severity::Info, message)
  }

  pub fn warning(message: impl Into<String>) -> Self {
    Self::new(Severity::Warning, message)
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self::new(Severity::Error, message)
  }

  pub fn is_error(&self) -> bool {
    self.level == Severity::Error
  }
}

impl From<&ApiError> for Notification {
  fn from(err: &ApiError) -> Self {
    Notification::error(err.user_message())
  }
}

impl From<ApiError> for Notification {
  fn from(err: ApiError) -> Self {
    Notification::from(&err)
  }
}

pub trait Notifier: Send + Sync {
  fn notify(&self, notification: &Notification);
}

/// Writes every notification to the tracing log at a matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, notification: &Notification) {
    let message = notification.message.as_str();
    match notification.level {
      Severity::Success | Severity::Info => event!(Level::INFO, %message, "notification"),
      Severity::Warning => event!(Level::WARN, %message, "notification"),
      Severity::Error => event!(Level::ERROR, %message, "notification"),
    }
  }
}

/// Keeps notifications in memory. Used by the dashboard to hand the latest
/// message to the UI, and by tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn all(&self) -> Vec<Notification> {
    self.seen.lock().clone()
  }

  pub fn last(&self) -> Option<Notification> {
    self.seen.lock().last().cloned()
  }

  /// Drains everything recorded so far.
  pub fn take(&self) -> Vec<Notification> {
    std::mem::take(&mut *self.seen.lock())
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, notification: &Notification) {
    self.seen.lock().push(notification.clone());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn api_errors_become_error_notifications() {
    let err = ApiError::Logical {
      message: "Insufficient stock".to_string(),
    };
    let n = Notification::from(&err);
    assert!(n.is_error());
    assert_eq!(n.message, "Insufficient stock");
  }

  #[test]
  fn recording_notifier_drains() {
    let notifier = RecordingNotifier::new();
    notifier.notify(&Notification::success("Saved"));
    notifier.notify(&Notification::warning("Activity log unavailable"));
    assert_eq!(notifier.last().map(|n| n.level), Some(Severity::Warning));
    assert_eq!(notifier.take().len(), 2);
    assert!(notifier.all().is_empty());
  }
}
