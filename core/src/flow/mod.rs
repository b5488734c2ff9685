// stockroom/src/flow/mod.rs

//! Multi-step action flows.
//!
//! A user action such as "assign product to shop" is a [`Flow`]: validate,
//! submit, refetch, log. Steps are named and run in order against one shared
//! [`ContextData`]. Each step is either critical, so its failure aborts the
//! action, or best-effort, so its failure is logged and reported while the
//! action still completes.

pub mod context;
pub mod control;
pub mod definition;
pub mod execution;
pub mod hooks;
pub mod registry;
pub mod step;

pub use context::{ContextData, Handler, SkipCondition};
pub use control::{DeferredFailure, FlowControl, FlowOutcome, FlowReport};
pub use definition::Flow;
pub use registry::FlowRegistry;
pub use step::{Criticality, StepDef};
