// stockroom_dashboard/src/flows/mod.rs

//! Defines and registers the action flows the dashboard runs.
//!
//! Every mutating action is a flow: critical steps validate and submit,
//! best-effort steps refetch and write the activity log.

use crate::errors::{AppError, Result};
use crate::state::AppState;
use serde::Serialize;
use stockroom::{ContextData, DeferredFailure, FlowRegistry, FlowReport, Notification};

pub mod common_steps;
pub mod contexts;

pub mod assignment_flow;
pub mod review_flow;
pub mod user_flow;

/// Registers every action flow. Called once at startup.
pub fn register_all_flows(registry: &FlowRegistry<AppError>) {
  tracing::info!("Registering action flows...");

  assignment_flow::register_assignment_flow(registry);
  review_flow::register_review_flow(registry);
  user_flow::register_user_flow(registry);

  tracing::info!(flows = ?registry.flow_names(), "All action flows registered.");
}

/// Runs the flow registered for `T`. A flow that stopped itself counts as
/// not done.
pub async fn run_action<T>(state: &AppState, ctx_data: ContextData<T>) -> Result<FlowReport>
where
  T: Send + Sync + 'static,
{
  let report = state.flows.run(ctx_data).await?;
  if report.is_stopped() {
    return Err(AppError::Halted);
  }
  Ok(report)
}

/// Body returned by every action endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome<T: Serialize> {
  pub notification: Notification,
  pub deferred: Vec<DeferredFailure>,
  pub data: T,
}

impl<T: Serialize> ActionOutcome<T> {
  /// Success toast, downgraded to a warning naming the follow-up steps that
  /// failed. The toast is also handed to the state's notifier.
  pub fn new(state: &AppState, done_message: &str, report: FlowReport, data: T) -> Self {
    let notification = if report.has_deferred_failures() {
      let steps: Vec<&str> = report.deferred.iter().map(|d| d.step.as_str()).collect();
      Notification::warning(format!("{} Some follow-up steps failed: {}.", done_message, steps.join(", ")))
    } else {
      Notification::success(done_message)
    };
    state.notifier.notify(&notification);
    Self {
      notification,
      deferred: report.deferred,
      data,
    }
  }
}
