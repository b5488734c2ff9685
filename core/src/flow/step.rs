// stockroom/src/flow/step.rs

use crate::flow::context::SkipCondition;
use std::sync::Arc;

/// How a step's failure affects the flow it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criticality {
  /// A failure aborts the flow and is returned to the caller.
  Critical,
  /// A failure is logged and recorded on the report; the flow carries on.
  /// Used for side effects such as activity logging.
  BestEffort,
}

/// One named step of a flow.
#[derive(Clone)]
pub struct StepDef<T: 'static + Send + Sync> {
  pub name: String,
  pub criticality: Criticality,
  /// An optional step with no handlers is skipped instead of failing the run.
  pub optional: bool,
  pub skip_if: Option<SkipCondition<T>>,
}

impl<T: 'static + Send + Sync> StepDef<T> {
  pub fn new(name: impl Into<String>, criticality: Criticality) -> Self {
    Self {
      name: name.into(),
      criticality,
      optional: false,
      skip_if: None,
    }
  }

  pub fn critical(name: impl Into<String>) -> Self {
    Self::new(name, Criticality::Critical)
  }

  pub fn best_effort(name: impl Into<String>) -> Self {
    Self::new(name, Criticality::BestEffort)
  }

  pub fn optional(mut self) -> Self {
    self.optional = true;
    self
  }

  pub fn skip_if(mut self, condition: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
    self.skip_if = Some(Arc::new(condition));
    self
  }

  pub fn is_best_effort(&self) -> bool {
    self.criticality == Criticality::BestEffort
  }
}

impl<T: 'static + Send + Sync> std::fmt::Debug for StepDef<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("StepDef")
      .field("name", &self.name)
      .field("criticality", &self.criticality)
      .field("optional", &self.optional)
      .field("skip_if_present", &self.skip_if.is_some())
      .finish()
  }
}
