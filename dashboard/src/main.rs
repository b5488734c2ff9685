// stockroom_dashboard/src/main.rs

mod config;
mod errors;
mod flows;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use stockroom::{ClientSettings, ReqwestTransport, SharedTransport};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .with_span_events(FmtSpan::CLOSE)
    .init();

  tracing::info!("Starting stockroom dashboard server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  let settings = ClientSettings::new(app_config.backend_url.clone()).with_timeout(app_config.request_timeout);
  let transport: SharedTransport = match ReqwestTransport::new(&settings) {
    Ok(t) => Arc::new(t),
    Err(e) => {
      tracing::error!(error = %e, "Failed to build the backend HTTP client.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };
  tracing::info!(backend = %app_config.backend_url, "Backend client ready.");

  let app_state = AppState::new(app_config.clone(), transport);
  flows::register_all_flows(&app_state.flows);

  if app_config.refresh_on_start {
    // Runs alongside the server. After a failure the first board view retries.
    let startup_state = app_state.clone();
    tokio::spawn(async move {
      if let Err(e) = services::order_sync::refresh_orders(&startup_state).await {
        tracing::warn!(error = %e, "Initial order refresh failed.");
      }
    });
  }

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone()))
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
