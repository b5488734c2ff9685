// src/lib.rs

//! Stockroom: the core of a retail operations dashboard.
//!
//! - [`status`]: the order status progression model. One table maps each
//!   status to a completion percentage, a tone and an icon, and derives the
//!   six-step fulfilment workflow shown on an order.
//! - [`model`]: typed shapes of the backend's resources, including the
//!   payment balance shown next to an order.
//! - [`api`]: the REST client, its response envelope and its typed errors.
//! - [`flow`]: multi-step user actions with critical and best-effort steps.
//! - [`store`]: reducer-style view state with stale-response protection.
//! - [`notify`]: transient messages for staff.
//! - [`export`]: CSV exports, import templates and import validation.
//!
//! The backend owns every order transition. Nothing in this crate decides
//! what status an order moves to next.

pub mod api;
pub mod error;
pub mod export;
pub mod flow;
pub mod model;
pub mod notify;
pub mod status;
pub mod store;

pub use crate::api::{ApiError, ApiResult, ClientSettings, ReqwestTransport, RetailApi, SharedTransport, Transport};
pub use crate::error::{FlowError, FlowResult};
pub use crate::flow::{
  ContextData, Criticality, DeferredFailure, Flow, FlowControl, FlowOutcome, FlowRegistry, FlowReport, StepDef,
};
pub use crate::model::{Order, PaymentStatus, PaymentSummary};
pub use crate::notify::{Notification, Notifier, Severity};
pub use crate::status::{
  color_class_for, icon_for, progress_for, workflow_for, OrderStatus, StatusBadge, StatusIcon, StatusTone,
  StepState, WorkflowStep, WorkflowView,
};
pub use crate::store::{OrdersAction, OrdersBoard, Reducer, RequestToken, Store};
