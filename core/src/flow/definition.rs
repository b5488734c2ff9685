// stockroom/src/flow/definition.rs

//! The `Flow<TData, Err>` type and its structural editing methods.

use crate::error::FlowError;
use crate::flow::context::{Handler, SkipCondition};
use crate::flow::step::{Criticality, StepDef};
use std::collections::HashMap;

/// An ordered list of named steps run against one `ContextData<TData>`.
///
/// Each step has up to three handler phases (`before`, `on`, `after`) run in
/// that order. Handlers return `Result<FlowControl, Err>`; framework errors are
/// converted into `Err` through `From<FlowError>`.
pub struct Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub(crate) name: String,
  pub(crate) steps: Vec<StepDef<TData>>,
  pub(crate) before: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) on: HashMap<String, Vec<Handler<TData, Err>>>,
  pub(crate) after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  pub fn new(name: impl Into<String>, steps: impl IntoIterator<Item = StepDef<TData>>) -> Self {
    Self {
      name: name.into(),
      steps: steps.into_iter().collect(),
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn step_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  pub fn step(&self, step_name: &str) -> Option<&StepDef<TData>> {
    self.steps.iter().find(|s| s.name == step_name)
  }

  fn position(&self, step_name: &str) -> usize {
    match self.steps.iter().position(|s| s.name == step_name) {
      Some(idx) => idx,
      None => panic!("Flow '{}' setup error: step '{}' is not defined.", self.name, step_name),
    }
  }

  /// Panics when `step_name` is not part of the flow. Step names are fixed at
  /// startup, so a miss is a typo in the flow definition.
  pub(crate) fn ensure_step_exists(&self, step_name: &str) {
    self.position(step_name);
  }

  fn ensure_step_not_exists(&self, step_name: &str) {
    if self.steps.iter().any(|s| s.name == step_name) {
      panic!("Flow '{}' setup error: step '{}' is already defined.", self.name, step_name);
    }
  }

  /// # Panics
  /// If `existing_step_name` is unknown or `step.name` is already taken.
  pub fn insert_before_step(&mut self, existing_step_name: &str, step: StepDef<TData>) {
    let idx = self.position(existing_step_name);
    self.ensure_step_not_exists(&step.name);
    self.steps.insert(idx, step);
  }

  /// # Panics
  /// If `existing_step_name` is unknown or `step.name` is already taken.
  pub fn insert_after_step(&mut self, existing_step_name: &str, step: StepDef<TData>) {
    let idx = self.position(existing_step_name);
    self.ensure_step_not_exists(&step.name);
    self.steps.insert(idx + 1, step);
  }

  /// Removes a step with all of its handlers. Unknown names are ignored.
  pub fn remove_step(&mut self, step_name: &str) {
    if let Some(idx) = self.steps.iter().position(|s| s.name == step_name) {
      self.steps.remove(idx);
      self.before.remove(step_name);
      self.on.remove(step_name);
      self.after.remove(step_name);
    }
  }

  pub fn set_criticality(&mut self, step_name: &str, criticality: Criticality) {
    let idx = self.position(step_name);
    self.steps[idx].criticality = criticality;
  }

  pub fn set_optional(&mut self, step_name: &str, optional: bool) {
    let idx = self.position(step_name);
    self.steps[idx].optional = optional;
  }

  pub fn set_skip_condition(&mut self, step_name: &str, skip_if: Option<SkipCondition<TData>>) {
    let idx = self.position(step_name);
    self.steps[idx].skip_if = skip_if;
  }

  pub(crate) fn has_handlers(&self, step_name: &str) -> bool {
    [&self.before, &self.on, &self.after]
      .iter()
      .any(|phase| phase.get(step_name).map_or(false, |v| !v.is_empty()))
  }
}
