// stockroom_dashboard/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use stockroom::export::ExportError;
use stockroom::{ApiError, FlowError, Notification};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Backend Error: {0}")]
  Api(#[from] ApiError),

  #[error("Export Error: {0}")]
  Export(#[from] ExportError),

  #[error("Flow Error: {source}")]
  Workflow {
    #[from]
    source: FlowError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),

  // A flow stopped itself without failing; the action did not happen.
  #[error("The action was halted before it completed.")]
  Halted,
}

impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<ApiError>() {
      Ok(api_err) => AppError::Api(api_err),
      Err(other) => AppError::Internal(other.to_string()),
    }
  }
}

impl AppError {
  /// The toast text shown to staff.
  pub fn notification(&self) -> Notification {
    match self {
      AppError::Validation(m) | AppError::NotFound(m) => Notification::error(m.clone()),
      AppError::Api(api_err) => Notification::from(api_err),
      AppError::Halted => Notification::warning(self.to_string()),
      AppError::Config(_) | AppError::Export(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        Notification::error("Something went wrong on the dashboard server. Please try again.")
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::Api(ApiError::Validation { .. }) => StatusCode::BAD_REQUEST,
      AppError::Api(ApiError::Logical { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
      AppError::Api(ApiError::Http { status: 404, .. }) => StatusCode::NOT_FOUND,
      AppError::Api(ApiError::Http { status, .. }) if (400..500).contains(status) => {
        StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
      }
      AppError::Api(_) => StatusCode::BAD_GATEWAY,
      AppError::Halted => StatusCode::CONFLICT,
      AppError::Config(_) | AppError::Export(_) | AppError::Workflow { .. } | AppError::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    tracing::error!(application_error = %self, "Responding with error");
    if let AppError::Workflow { source } = self {
      tracing::error!(flow_error_source = ?source, "Workflow error details");
    }
    HttpResponse::build(self.status_code()).json(self.notification())
  }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
