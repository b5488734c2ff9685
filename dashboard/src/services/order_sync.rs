// stockroom_dashboard/src/services/order_sync.rs

//! Keeps the shared order board in step with the backend.
//!
//! Every fetch is tagged with a fresh `RequestToken` before the request goes
//! out. If two refreshes overlap, whichever started last wins; the board
//! drops the other result when it arrives.

use crate::errors::{AppError, Result};
use crate::state::AppState;
use chrono::Utc;
use stockroom::api::OrderQuery;
use stockroom::{Notification, OrdersAction, RequestToken};
use tracing::{event, instrument, Level};

/// Reloads the full order list into the board. Returns how many orders the
/// backend sent.
#[instrument(name = "order_sync::refresh_orders", skip(state), err(Display))]
pub async fn refresh_orders(state: &AppState) -> Result<usize> {
  let token = RequestToken::issue();
  state.board.dispatch(OrdersAction::FetchStarted { token });

  match state.api.list_orders(&OrderQuery::default()).await {
    Ok(orders) => {
      let count = orders.len();
      state.board.dispatch(OrdersAction::FetchSucceeded {
        token,
        orders,
        at: Utc::now(),
      });
      let superseded = state.board.read().latest_token() != Some(token);
      if superseded {
        event!(Level::DEBUG, token = token.value(), "A newer refresh superseded this one.");
      } else {
        event!(Level::INFO, count, "Order board refreshed.");
      }
      Ok(count)
    }
    Err(api_err) => {
      let notification = Notification::from(&api_err);
      state.notifier.notify(&notification);
      state.board.dispatch(OrdersAction::FetchFailed { token, notification });
      Err(AppError::Api(api_err))
    }
  }
}

/// Fetches one order and replaces its row on the board.
#[instrument(name = "order_sync::refresh_order", skip(state), err(Display))]
pub async fn refresh_order(state: &AppState, receipt: &str) -> Result<stockroom::Order> {
  let order = state.api.get_order(receipt).await?;
  state.board.dispatch(OrdersAction::OrderUpdated(order.clone()));
  Ok(order)
}
