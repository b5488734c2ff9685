// stockroom/src/status/workflow.rs

//! Derives the fulfilment checklist shown on an order's detail page.
//!
//! A step is completed once the order's progress has moved strictly past the
//! step's own progress, and active when the order sits exactly on that step.
//! Cancelled and refunded orders are reported as halted instead of as a fresh
//! 0% order.

use super::{OrderStatus, StatusTone};
use serde::Serialize;

/// Checklist entries, in order: the status each one stands for, its key and its label.
const WORKFLOW_STEPS: [(OrderStatus, &str, &str); 6] = [
  (OrderStatus::PendingPayment, "pending_payment", "Waiting for Payment"),
  (OrderStatus::Paid, "paid", "Payment Confirmed"),
  (OrderStatus::AssignedPackager, "assigned_packager", "Assigned to Packager"),
  (OrderStatus::Packaged, "packaged", "Packaged"),
  (OrderStatus::PickedUp, "picked_up", "Picked Up"),
  (OrderStatus::Delivered, "delivered", "Delivered"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
  Completed,
  Active,
  Pending,
}

/// Why an order stopped short of delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Halt {
  Cancelled,
  Refunded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
  pub key: &'static str,
  pub label: &'static str,
  pub progress: u8,
  pub state: StepState,
}

impl WorkflowStep {
  pub fn is_completed(&self) -> bool {
    self.state == StepState::Completed
  }

  pub fn is_active(&self) -> bool {
    self.state == StepState::Active
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowView {
  pub status: String,
  pub progress: u8,
  pub tone: StatusTone,
  pub halted: Option<Halt>,
  pub recognized: bool,
  pub steps: Vec<WorkflowStep>,
}

impl WorkflowView {
  pub fn active_step(&self) -> Option<&WorkflowStep> {
    self.steps.iter().find(|s| s.is_active())
  }

  pub fn completed_count(&self) -> usize {
    self.steps.iter().filter(|s| s.is_completed()).count()
  }
}

/// Builds the checklist for `status`.
pub fn workflow_for(status: &OrderStatus) -> WorkflowView {
  let halted = match status {
    OrderStatus::Cancelled => Some(Halt::Cancelled),
    OrderStatus::Refunded => Some(Halt::Refunded),
    _ => None,
  };
  let current = status.progress();
  // Delivered and completed orders have nothing left to do, so the final
  // step counts as done rather than in progress.
  let finished = matches!(status, OrderStatus::Delivered | OrderStatus::Completed);

  let steps = WORKFLOW_STEPS
    .iter()
    .map(|(step_status, key, label)| {
      let step_progress = step_status.progress();
      let state = if halted.is_some() || !status.is_recognized() {
        StepState::Pending
      } else if finished || step_progress < current {
        StepState::Completed
      } else if step_status == status {
        StepState::Active
      } else {
        StepState::Pending
      };
      WorkflowStep {
        key: *key,
        label: *label,
        progress: step_progress,
        state,
      }
    })
    .collect();

  WorkflowView {
    status: status.as_str().to_string(),
    progress: current,
    tone: status.tone(),
    halted,
    recognized: status.is_recognized(),
    steps,
  }
}
