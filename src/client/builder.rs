//! Construction of API session handles.

use crate::client::core::{Client, SessionOptions, DEFAULT_BASE_ADDRESS};
use crate::client::proxy::Api;
use crate::log::{self, LogSink};
use crate::transport::{HttpTransport, Transport};
use crate::Result;
use std::sync::Arc;

/// Builder for an [`Api`] root handle.
///
/// Every option has a working default except the application id:
///
/// ```rust,no_run
/// # fn main() -> userapp::Result<()> {
/// let api = userapp::Api::builder("YOUR APP ID")
///     .token("YOUR TOKEN")
///     .debug(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ApiBuilder {
    app_id: String,
    token: String,
    base_address: String,
    throw_errors: bool,
    secure: bool,
    debug: bool,
    log_sink: Option<Arc<dyn LogSink>>,
    transport: Option<Arc<dyn Transport>>,
}

impl ApiBuilder {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            token: String::new(),
            base_address: DEFAULT_BASE_ADDRESS.to_string(),
            throw_errors: true,
            secure: true,
            debug: false,
            log_sink: None,
            transport: None,
        }
    }

    /// Session token for an already-authenticated caller.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Target host, without a scheme.
    pub fn base_address(mut self, base_address: impl Into<String>) -> Self {
        self.base_address = base_address.into();
        self
    }

    /// When off, results carrying an `error_code` come back as plain data
    /// instead of being raised. On by default.
    pub fn throw_errors(mut self, enable: bool) -> Self {
        self.throw_errors = enable;
        self
    }

    /// `https` (the default) versus `http`.
    pub fn secure(mut self, enable: bool) -> Self {
        self.secure = enable;
        self
    }

    /// Emit wire-level request and response records to the log sink.
    pub fn debug(mut self, enable: bool) -> Self {
        self.debug = enable;
        self
    }

    /// Destination for wire-level records. Defaults to a tracing-backed sink.
    pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.log_sink = Some(sink);
        self
    }

    /// Transport used to deliver requests. Defaults to [`HttpTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the session and returns its root handle.
    pub fn build(self) -> Result<Api> {
        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new()?),
        };
        let sink = self.log_sink.unwrap_or_else(log::tracing_sink);

        let client = Client::new(
            SessionOptions {
                app_id: self.app_id,
                token: self.token,
                base_address: self.base_address,
                secure: self.secure,
                debug: self.debug,
            },
            self.throw_errors,
            sink,
            transport,
        );

        Ok(Api::root(Arc::new(client)))
    }
}
