// stockroom/src/model/mod.rs

//! Typed shapes of the resources the REST backend serves.
//!
//! Fields are camelCase on the wire. Optional fields default when absent and
//! unknown fields are ignored, so additive backend changes do not break parsing.

pub mod activity;
pub mod assignment;
pub mod catalog;
pub mod order;
pub mod pending_change;
pub mod site;
pub mod user;

pub use activity::Activity;
pub use assignment::{Assignment, AssignmentDirection, NewAssignment};
pub use catalog::{Category, NewProduct, Product};
pub use order::{LineItem, Order, PaymentStatus, PaymentSummary, StaffRefs};
pub use pending_change::{ChangeDecision, ChangeKind, PendingChange};
pub use site::{Shop, Warehouse};
pub use user::{NewUser, Role, User};
