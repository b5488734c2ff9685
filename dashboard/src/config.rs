// stockroom_dashboard/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  /// Base URL of the retail REST backend, e.g. `https://api.example.com/api`.
  pub backend_url: String,
  pub request_timeout: Duration,
  /// Load the order board once before accepting requests.
  pub refresh_on_start: bool,
  /// Name recorded as the actor of activity log entries.
  pub activity_actor: String,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any key lookup. `from_env` passes the process
  /// environment; tests pass a map.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let backend_url = get_env("BACKEND_URL")?;
    if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
      return Err(AppError::Config(format!(
        "Invalid BACKEND_URL '{}': expected an http(s) URL",
        backend_url
      )));
    }

    let request_timeout = get_env("REQUEST_TIMEOUT_SECS")
      .unwrap_or_else(|_| "15".to_string())
      .parse::<u64>()
      .map_err(|e| AppError::Config(format!("Invalid REQUEST_TIMEOUT_SECS: {}", e)))
      .map(Duration::from_secs)?;

    let refresh_on_start = get_env("REFRESH_ON_START")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid REFRESH_ON_START value: {}", e)))?;

    let activity_actor = get_env("ACTIVITY_ACTOR").unwrap_or_else(|_| "dashboard".to_string());

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      backend_url: backend_url.trim_end_matches('/').to_string(),
      request_timeout,
      refresh_on_start,
      activity_actor,
    })
  }
}
