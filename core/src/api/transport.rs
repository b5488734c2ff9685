// stockroom/src/api/transport.rs

//! The HTTP seam. `RetailApi` only ever talks to a [`Transport`], which keeps
//! the typed client testable without a live backend.

use crate::api::error::{ApiError, ApiResult};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{event, instrument, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
  Get,
  Post,
  Put,
  Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
  Json(serde_json::Value),
  Csv(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
  pub method: Method,
  /// Path relative to the backend base URL, without a leading slash.
  pub path: String,
  pub query: Vec<(String, String)>,
  pub body: Option<Body>,
}

impl ApiRequest {
  pub fn new(method: Method, path: impl Into<String>) -> Self {
    Self {
      method,
      path: path.into(),
      query: Vec::new(),
      body: None,
    }
  }

  pub fn get(path: impl Into<String>) -> Self {
    Self::new(Method::Get, path)
  }

  pub fn post(path: impl Into<String>) -> Self {
    Self::new(Method::Post, path)
  }

  pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.query.push((key.into(), value.into()));
    self
  }

  pub fn json(mut self, value: serde_json::Value) -> Self {
    self.body = Some(Body::Json(value));
    self
  }

  pub fn csv(mut self, text: impl Into<String>) -> Self {
    self.body = Some(Body::Csv(text.into()));
    self
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
  pub status: u16,
  pub body: String,
}

impl ApiResponse {
  pub fn new(status: u16, body: impl Into<String>) -> Self {
    Self {
      status,
      body: body.into(),
    }
  }

  pub fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }
}

#[async_trait]
pub trait Transport: Send + Sync {
  /// Sends one request. Only transport-level failures are errors here; any
  /// HTTP status is returned as a response.
  async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
  async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
    (**self).send(request).await
  }
}

/// A transport chosen at runtime, e.g. a fake in tests.
pub type SharedTransport = std::sync::Arc<dyn Transport>;

/// Connection settings for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
  pub base_url: String,
  pub timeout: Duration,
}

impl ClientSettings {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self {
      base_url: base_url.into(),
      timeout: Duration::from_secs(15),
    }
  }

  pub fn with_timeout(mut self, timeout: Duration) -> Self {
    self.timeout = timeout;
    self
  }
}

pub struct ReqwestTransport {
  client: reqwest::Client,
  base_url: String,
}

impl ReqwestTransport {
  pub fn new(settings: &ClientSettings) -> ApiResult<Self> {
    let client = reqwest::Client::builder()
      .timeout(settings.timeout)
      .build()
      .map_err(|e| ApiError::Network {
        endpoint: settings.base_url.clone(),
        source: anyhow::Error::new(e),
      })?;
    Ok(Self {
      client,
      base_url: settings.base_url.trim_end_matches('/').to_string(),
    })
  }

  fn url_for(&self, path: &str) -> String {
    format!("{}/{}", self.base_url, path.trim_start_matches('/'))
  }
}

#[async_trait]
impl Transport for ReqwestTransport {
  #[instrument(name = "ReqwestTransport::send", skip_all, fields(method = ?request.method, path = %request.path), err(Display))]
  async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
    let url = self.url_for(&request.path);
    let mut builder = match request.method {
      Method::Get => self.client.get(&url),
      Method::Post => self.client.post(&url),
      Method::Put => self.client.put(&url),
      Method::Delete => self.client.delete(&url),
    };
    if !request.query.is_empty() {
      builder = builder.query(&request.query);
    }
    builder = match request.body {
      Some(Body::Json(value)) => builder.json(&value),
      Some(Body::Csv(text)) => builder.header(reqwest::header::CONTENT_TYPE, "text/csv").body(text),
      None => builder,
    };

    let network_err = |e: reqwest::Error| ApiError::Network {
      endpoint: request.path.clone(),
      source: anyhow::Error::new(e),
    };
    let response = builder.send().await.map_err(network_err)?;
    let status = response.status().as_u16();
    let body = response.text().await.map_err(network_err)?;
    event!(Level::DEBUG, status, body_len = body.len(), "Backend responded.");
    Ok(ApiResponse { status, body })
  }
}
