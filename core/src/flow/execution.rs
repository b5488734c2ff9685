// stockroom/src/flow/execution.rs

//! `Flow::run()`: walks the steps in order and runs each phase's handlers.

use crate::error::FlowError;
use crate::flow::context::{ContextData, Handler};
use crate::flow::control::{DeferredFailure, FlowControl, FlowOutcome, FlowReport};
use crate::flow::definition::Flow;
use tracing::{event, instrument, span, Instrument, Level};

impl<TData, Err> Flow<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<FlowError> + Send + Sync + 'static,
{
  /// Executes the flow against `ctx_data`.
  ///
  /// A failing critical step aborts the run and its error is returned. A
  /// failing best-effort step is logged at `WARN` and listed in
  /// [`FlowReport::deferred`]; the remaining steps still run. A non-optional
  /// step without handlers yields [`FlowError::HandlerMissing`] converted into
  /// `Err`, whatever its criticality.
  #[instrument(
    name = "Flow::run",
    skip_all,
    fields(
      flow = %self.name,
      context_type = %std::any::type_name::<TData>(),
      num_steps = self.steps.len(),
    ),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<FlowReport, Err> {
    event!(Level::DEBUG, "Flow execution starting.");
    let mut deferred = Vec::new();

    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();

      if let Some(skip_fn) = &step_def.skip_if {
        let skip = skip_fn(&*ctx_data.read());
        if skip {
          event!(Level::INFO, step = step_name, "Step skipped by its skip condition.");
          continue;
        }
      }

      if !self.has_handlers(step_name) {
        if step_def.optional {
          event!(Level::DEBUG, step = step_name, "Optional step has no handlers, skipping.");
          continue;
        }
        event!(Level::ERROR, step = step_name, "Non-optional step has no handlers.");
        return Err(Err::from(FlowError::HandlerMissing {
          flow: self.name.clone(),
          step_name: step_def.name.clone(),
        }));
      }

      let step_span = span!(
        Level::INFO,
        "flow_step",
        step_name = step_name,
        step_index = step_idx,
        criticality = ?step_def.criticality
      );

      let step_result = async {
        for (phase, handlers) in [
          ("before", self.before.get(step_name)),
          ("on", self.on.get(step_name)),
          ("after", self.after.get(step_name)),
        ] {
          if let Some(handlers) = handlers {
            if run_phase(phase, handlers, &ctx_data).await? == FlowControl::Stop {
              return Ok(FlowControl::Stop);
            }
          }
        }
        Ok::<_, Err>(FlowControl::Continue)
      }
      .instrument(step_span)
      .await;

      match step_result {
        Ok(FlowControl::Continue) => {
          event!(Level::DEBUG, step = step_name, "Step finished.");
        }
        Ok(FlowControl::Stop) => {
          event!(Level::INFO, step = step_name, "Flow stopped by a handler.");
          return Ok(FlowReport::new(FlowOutcome::Stopped, deferred));
        }
        Err(e) if step_def.is_best_effort() => {
          event!(Level::WARN, step = step_name, error = %e, "Best-effort step failed; continuing.");
          deferred.push(DeferredFailure {
            step: step_def.name.clone(),
            message: e.to_string(),
          });
        }
        Err(e) => {
          event!(Level::ERROR, step = step_name, error = %e, "Critical step failed.");
          return Err(e);
        }
      }
    }

    event!(Level::DEBUG, deferred = deferred.len(), "Flow execution completed.");
    Ok(FlowReport::new(FlowOutcome::Completed, deferred))
  }
}

async fn run_phase<TData, Err>(
  phase: &'static str,
  handlers: &[Handler<TData, Err>],
  ctx_data: &ContextData<TData>,
) -> Result<FlowControl, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + Send + Sync + 'static,
{
  for (handler_idx, handler_fn) in handlers.iter().enumerate() {
    let handler_span = span!(Level::DEBUG, "flow_handler", phase, handler_index = handler_idx);
    match handler_fn(ctx_data.clone()).instrument(handler_span).await {
      Ok(FlowControl::Continue) => {}
      Ok(FlowControl::Stop) => {
        event!(Level::DEBUG, phase, "Handler requested stop.");
        return Ok(FlowControl::Stop);
      }
      Err(e) => {
        event!(Level::DEBUG, phase, error = %e, "Handler failed.");
        return Err(e);
      }
    }
  }
  Ok(FlowControl::Continue)
}
