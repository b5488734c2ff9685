// stockroom_dashboard/src/flows/contexts.rs

//! Data each action flow runs against. Handlers receive these wrapped in
//! `stockroom::ContextData`.

use crate::state::AppState;
use stockroom::model::{Assignment, ChangeDecision, NewAssignment, NewUser, PendingChange, Product, User};
use uuid::Uuid;

#[derive(Clone)]
pub struct AssignProductCtxData {
  pub app_state: AppState,
  /// Correlates the log lines of one action.
  pub action_id: Uuid,
  pub request: NewAssignment,
  pub created: Option<Assignment>,
  /// The product as the backend sees it after the move, when the refetch worked.
  pub product_after: Option<Product>,
}

impl AssignProductCtxData {
  pub fn new(app_state: AppState, request: NewAssignment) -> Self {
    Self {
      app_state,
      action_id: Uuid::new_v4(),
      request,
      created: None,
      product_after: None,
    }
  }
}

#[derive(Clone)]
pub struct ReviewChangeCtxData {
  pub app_state: AppState,
  pub action_id: Uuid,
  pub change_id: String,
  pub decision: ChangeDecision,
  pub decided: bool,
  /// Pending changes still waiting after this decision.
  pub remaining: Option<Vec<PendingChange>>,
}

impl ReviewChangeCtxData {
  pub fn new(app_state: AppState, change_id: String, decision: ChangeDecision) -> Self {
    Self {
      app_state,
      action_id: Uuid::new_v4(),
      change_id,
      decision,
      decided: false,
      remaining: None,
    }
  }
}

#[derive(Clone)]
pub struct CreateUserCtxData {
  pub app_state: AppState,
  pub action_id: Uuid,
  pub request: NewUser,
  pub created: Option<User>,
  pub users_after: Option<Vec<User>>,
}

impl CreateUserCtxData {
  pub fn new(app_state: AppState, request: NewUser) -> Self {
    Self {
      app_state,
      action_id: Uuid::new_v4(),
      request,
      created: None,
      users_after: None,
    }
  }
}
