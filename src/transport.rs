//! Transport capability: how requests leave the process.
//!
//! The call executor depends only on the [`Transport`] trait. The default
//! [`HttpTransport`] delivers requests over reqwest; tests inject their own
//! implementation to observe traffic without a network.

pub mod http;

pub use http::HttpTransport;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use thiserror::Error;

/// Errors raised at the transport layer.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status from the server.
    #[error("received HTTP status {status}, expected success")]
    Status { status: u16, body: String },

    /// The wire protocol is POST-only; anything else is a caller bug.
    #[error("HTTP method '{method}' not supported")]
    UnsupportedMethod { method: String },

    #[error("transport error: {0}")]
    Other(String),
}

/// The response surface the executor needs: status code plus raw body text.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Decodes the body as JSON.
    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers one HTTP request and collects the response.
///
/// `method` is the lower-case HTTP verb; this client only ever sends `post`.
/// Implementations report the status as-is and leave success checking to the
/// caller.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(
        &self,
        method: &str,
        url: &str,
        headers: HeaderMap,
        body: String,
    ) -> Result<TransportResponse, TransportError>;
}
