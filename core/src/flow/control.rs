// stockroom/src/flow/control.rs

//! Signals steering a flow, and what a finished run reports back.

use serde::Serialize;

/// Returned by every handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowControl {
  Continue,
  /// Halt the flow without error. Later handlers and steps do not run.
  Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowOutcome {
  Completed,
  Stopped,
}

/// A best-effort step that failed without failing the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeferredFailure {
  pub step: String,
  pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowReport {
  pub outcome: FlowOutcome,
  pub deferred: Vec<DeferredFailure>,
}

impl FlowReport {
  pub(crate) fn new(outcome: FlowOutcome, deferred: Vec<DeferredFailure>) -> Self {
    Self { outcome, deferred }
  }

  pub fn is_completed(&self) -> bool {
    self.outcome == FlowOutcome::Completed
  }

  pub fn is_stopped(&self) -> bool {
    self.outcome == FlowOutcome::Stopped
  }

  pub fn has_deferred_failures(&self) -> bool {
    !self.deferred.is_empty()
  }
}
