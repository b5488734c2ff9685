// stockroom/src/api/mod.rs

//! Client for the retail REST backend.

pub mod client;
pub mod error;
pub mod transport;

pub use client::{ImportReceipt, OrderQuery, RetailApi};
pub use error::{ApiError, ApiResult};
pub use transport::{ApiRequest, ApiResponse, Body, ClientSettings, Method, ReqwestTransport, SharedTransport, Transport};
