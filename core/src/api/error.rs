// stockroom/src/api/error.rs

use thiserror::Error;

/// Everything that can go wrong talking to the backend, plus client-side
/// validation failures that stop a request before it is sent.
///
/// The dashboard treats all variants the same way (a transient error
/// notification); the split exists so logs and tests can tell them apart.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Network error calling '{endpoint}': {source}")]
  Network {
    endpoint: String,
    #[source]
    source: anyhow::Error,
  },

  #[error("Backend returned HTTP {status} for '{endpoint}': {message}")]
  Http {
    endpoint: String,
    status: u16,
    message: String,
  },

  #[error("Backend reported a failure: {message}")]
  Logical { message: String },

  #[error("Unexpected response body from '{endpoint}': {source}")]
  Parse {
    endpoint: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Invalid {field}: {message}")]
  Validation { field: String, message: String },
}

impl ApiError {
  pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
    ApiError::Validation {
      field: field.into(),
      message: message.into(),
    }
  }

  pub fn is_validation(&self) -> bool {
    matches!(self, ApiError::Validation { .. })
  }

  /// HTTP status when the backend answered with one.
  pub fn status(&self) -> Option<u16> {
    match self {
      ApiError::Http { status, .. } => Some(*status),
      _ => None,
    }
  }

  /// Text for the toast shown to staff. Never includes raw bodies or paths.
  pub fn user_message(&self) -> String {
    match self {
      ApiError::Network { .. } => "Could not reach the server. Check your connection and try again.".to_string(),
      ApiError::Http { status: 404, .. } => "The requested record was not found.".to_string(),
      ApiError::Http { status, message, .. } if message.is_empty() => {
        format!("The server could not complete the request (HTTP {}).", status)
      }
      ApiError::Http { message, .. } => message.clone(),
      ApiError::Logical { message } => message.clone(),
      ApiError::Parse { .. } => "The server sent a response the dashboard could not read.".to_string(),
      ApiError::Validation { message, .. } => message.clone(),
    }
  }
}

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;
