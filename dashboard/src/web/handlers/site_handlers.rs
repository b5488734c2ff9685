// stockroom_dashboard/src/web/handlers/site_handlers.rs

use actix_web::{web, HttpResponse};
use futures_util::future::join;
use serde::Serialize;
use stockroom::model::{Shop, Warehouse};
use stockroom::Notification;
use tracing::{instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SitesView {
  pub warehouses: Option<Vec<Warehouse>>,
  pub shops: Option<Vec<Shop>>,
  pub notifications: Vec<Notification>,
}

/// Warehouses and shops are fetched side by side. Either list may fail
/// without hiding the other; only when both fail is the request an error.
#[instrument(name = "handler::list_sites", skip(app_state))]
pub async fn list_sites_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let (warehouses, shops) = join(app_state.api.list_warehouses(), app_state.api.list_shops()).await;

  let mut view = SitesView::default();
  let mut first_error = None;
  match warehouses {
    Ok(list) => view.warehouses = Some(list),
    Err(e) => {
      warn!(error = %e, "Warehouses could not be loaded.");
      view.notifications.push(Notification::from(&e));
      first_error = Some(e);
    }
  }
  match shops {
    Ok(list) => view.shops = Some(list),
    Err(e) => {
      warn!(error = %e, "Shops could not be loaded.");
      view.notifications.push(Notification::from(&e));
      first_error.get_or_insert(e);
    }
  }

  if view.warehouses.is_none() && view.shops.is_none() {
    if let Some(e) = first_error {
      return Err(AppError::Api(e));
    }
  }
  for notification in &view.notifications {
    app_state.notifier.notify(notification);
  }
  Ok(HttpResponse::Ok().json(view))
}
