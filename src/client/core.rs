//! Call executor: session state, request signing, response classification.
//!
//! One [`Client`] holds the state of one API session. Every proxy node built
//! from the same root shares it, so a token captured by `user.login` is
//! immediately visible to every handle of that session.

use crate::log::{LogSink, WireEvent};
use crate::transport::{Transport, TransportError};
use crate::value::Value;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Map;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Default API host, used when no base address is configured.
pub const DEFAULT_BASE_ADDRESS: &str = "api.userapp.io";

/// Mutable per-session options, shared by every node of one client.
#[derive(Debug, Clone)]
pub(crate) struct SessionOptions {
    pub app_id: String,
    pub token: String,
    pub base_address: String,
    pub secure: bool,
    pub debug: bool,
}

/// Executes `v{version}/{service}.{method}` calls against the API.
pub struct Client {
    options: RwLock<SessionOptions>,
    throw_errors: bool,
    sink: RwLock<Arc<dyn LogSink>>,
    transport: Arc<dyn Transport>,
}

impl Client {
    pub(crate) fn new(
        options: SessionOptions,
        throw_errors: bool,
        sink: Arc<dyn LogSink>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            options: RwLock::new(options),
            throw_errors,
            sink: RwLock::new(sink),
            transport,
        }
    }

    /// Issues one call and decodes its result.
    ///
    /// `arguments` are the call's named arguments; they become the JSON
    /// request body as-is. The service and method names are validated before
    /// anything touches the network.
    ///
    /// When the session was built with `throw_errors` (the default), a result
    /// carrying an `error_code` member comes back as an [`Error`]; otherwise
    /// it is returned as plain data for the caller to inspect. Session token
    /// bookkeeping for `user.login` / `user.logout` runs either way.
    pub async fn call(
        &self,
        version: &str,
        service: &str,
        method: &str,
        arguments: Map<String, serde_json::Value>,
    ) -> Result<Value> {
        if service.is_empty() {
            return Err(Error::invalid_service("no service specified", None));
        }
        if method.is_empty() {
            return Err(Error::invalid_method(
                format!("no method on service '{service}' specified"),
                Some(service),
                None,
            ));
        }

        let (scheme, base_address, credentials, debug_wire) = {
            let options = self.options.read().unwrap();
            let scheme = if options.secure { "https" } else { "http" };
            let credentials = STANDARD.encode(format!("{}:{}", options.app_id, options.token));
            (scheme, options.base_address.clone(), credentials, options.debug)
        };

        let url = format!("{scheme}://{base_address}/v{version}/{service}.{method}");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let authorization = HeaderValue::from_str(&format!("Basic {credentials}"))
            .map_err(|err| TransportError::Other(err.to_string()))?;
        headers.insert(AUTHORIZATION, authorization);

        let body = serde_json::to_string(&arguments)?;

        debug!(target: "userapp", url = url.as_str(), service, method, "issuing call");
        if debug_wire {
            self.log_sink().record(&WireEvent::Request {
                url: url.clone(),
                service: service.to_string(),
                method: method.to_string(),
                body: body.clone(),
            });
        }

        let response = self.transport.call("post", &url, headers, body).await?;

        if !response.is_success() {
            return Err(TransportError::Status {
                status: response.status,
                body: response.body,
            }
            .into());
        }

        debug!(target: "userapp", status = response.status, "received response");
        if debug_wire {
            self.log_sink().record(&WireEvent::Response {
                status: response.status,
                body: response.body.clone(),
            });
        }

        let result = Value::decode(response.json()?);
        let is_error = result.contains_key("error_code");

        // Token bookkeeping runs before classification so that a thrown
        // logout error still clears the local token.
        if service == "user" {
            if method == "login" && !is_error {
                match result.get("token").ok().and_then(Value::as_str) {
                    Some(token) => self.options.write().unwrap().token = token.to_string(),
                    None => {
                        warn!(target: "userapp", "login result carried no token; session token unchanged")
                    }
                }
            } else if method == "logout" {
                self.options.write().unwrap().token = String::new();
            }
        }

        if self.throw_errors && is_error {
            return Err(self.classify(service, method, &result));
        }

        Ok(result)
    }

    fn classify(&self, service: &str, method: &str, result: &Value) -> Error {
        let code = result
            .get("error_code")
            .ok()
            .map(|code| match code.as_str() {
                Some(text) => text.to_string(),
                None => code.to_json(),
            })
            .unwrap_or_default();

        match code.as_str() {
            "INVALID_SERVICE" => Error::invalid_service(
                format!("service '{service}' does not exist"),
                Some(service),
            ),
            "INVALID_METHOD" => Error::invalid_method(
                format!("method '{method}' on service '{service}' does not exist"),
                Some(service),
                Some(method),
            ),
            _ => {
                let message = result
                    .get("message")
                    .ok()
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Error::Service { message, code }
            }
        }
    }

    /// Reads a session option by name.
    pub fn get_option(&self, name: &str) -> Result<serde_json::Value> {
        let options = self.options.read().unwrap();
        let value = match name {
            "app_id" => serde_json::Value::String(options.app_id.clone()),
            "token" => serde_json::Value::String(options.token.clone()),
            "base_address" => serde_json::Value::String(options.base_address.clone()),
            "secure" => serde_json::Value::Bool(options.secure),
            "debug" => serde_json::Value::Bool(options.debug),
            _ => return Err(Error::unknown_option(name)),
        };
        Ok(value)
    }

    /// Writes a session option by name, taking effect on the next call.
    pub fn set_option(&self, name: &str, value: serde_json::Value) -> Result<()> {
        let mut options = self.options.write().unwrap();
        match name {
            "app_id" => options.app_id = expect_string(name, value)?,
            "token" => options.token = expect_string(name, value)?,
            "base_address" => options.base_address = expect_string(name, value)?,
            "secure" => options.secure = expect_bool(name, value)?,
            "debug" => options.debug = expect_bool(name, value)?,
            _ => return Err(Error::unknown_option(name)),
        }
        Ok(())
    }

    /// The sink receiving wire-level records while `debug` is on.
    pub fn log_sink(&self) -> Arc<dyn LogSink> {
        self.sink.read().unwrap().clone()
    }

    pub fn set_log_sink(&self, sink: Arc<dyn LogSink>) {
        *self.sink.write().unwrap() = sink;
    }
}

fn expect_string(name: &str, value: serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(text) => Ok(text),
        _ => Err(Error::option_type(name, "a string")),
    }
}

fn expect_bool(name: &str, value: serde_json::Value) -> Result<bool> {
    match value {
        serde_json::Value::Bool(flag) => Ok(flag),
        _ => Err(Error::option_type(name, "a boolean")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_option_values_are_type_checked() {
        assert_eq!(expect_string("token", json!("t")).unwrap(), "t");
        assert!(matches!(
            expect_string("token", json!(5)),
            Err(Error::InvalidOption { name, .. }) if name == "token"
        ));
        assert!(expect_bool("secure", json!(true)).unwrap());
        assert!(matches!(
            expect_bool("secure", json!("yes")),
            Err(Error::InvalidOption { .. })
        ));
    }
}
