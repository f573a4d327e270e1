use super::{Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Pooled HTTP client used when no transport is injected.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds the default client.
    ///
    /// The request timeout defaults to 30 seconds and can be overridden with
    /// the `USERAPP_HTTP_TIMEOUT_SECS` environment variable.
    pub fn new() -> Result<Self, TransportError> {
        let timeout_secs = env::var("USERAPP_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }

    /// Wraps an already-configured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(
        &self,
        method: &str,
        url: &str,
        headers: HeaderMap,
        body: String,
    ) -> Result<TransportResponse, TransportError> {
        if !method.eq_ignore_ascii_case("post") {
            return Err(TransportError::UnsupportedMethod {
                method: method.to_string(),
            });
        }

        let response = self
            .client
            .post(url)
            .headers(headers)
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
