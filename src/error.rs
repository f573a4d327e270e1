//! Error taxonomy for the UserApp client.
//!
//! Everything the crate can fail with funnels into [`Error`]. Server-reported
//! failures are classified out of the response body by the call executor;
//! network and HTTP-layer failures aggregate under [`Error::Transport`].

use crate::transport::TransportError;
use thiserror::Error;

/// Unified error type for the UserApp client.
#[derive(Debug, Error)]
pub enum Error {
    /// No service was addressed, or the server reported `INVALID_SERVICE`.
    #[error("{message}")]
    InvalidService {
        message: String,
        /// Service name the server rejected, when one was addressed.
        service: Option<String>,
    },

    /// No method was addressed (including an invoke on the root handle), or
    /// the server reported `INVALID_METHOD`.
    #[error("{message}")]
    InvalidMethod {
        message: String,
        service: Option<String>,
        method: Option<String>,
    },

    /// Unknown session option name, or a value of the wrong type for it.
    #[error("{message}")]
    InvalidOption { name: String, message: String },

    /// Business error reported by the API: any `error_code` other than the
    /// invalid-service / invalid-method pair.
    #[error("{message} ({code})")]
    Service { message: String, code: String },

    /// Network or HTTP-layer failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Read of a key that is absent from a mapping, or a key read on a
    /// value that is not a mapping at all.
    #[error("no such field '{field}'")]
    NoSuchField { field: String },

    /// Request or response body could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_service(message: impl Into<String>, service: Option<&str>) -> Self {
        Error::InvalidService {
            message: message.into(),
            service: service.map(str::to_string),
        }
    }

    pub(crate) fn invalid_method(
        message: impl Into<String>,
        service: Option<&str>,
        method: Option<&str>,
    ) -> Self {
        Error::InvalidMethod {
            message: message.into(),
            service: service.map(str::to_string),
            method: method.map(str::to_string),
        }
    }

    pub(crate) fn no_such_field(field: impl Into<String>) -> Self {
        Error::NoSuchField {
            field: field.into(),
        }
    }

    pub(crate) fn unknown_option(name: &str) -> Self {
        Error::InvalidOption {
            name: name.to_string(),
            message: format!("option '{name}' does not exist"),
        }
    }

    pub(crate) fn option_type(name: &str, expected: &str) -> Self {
        Error::InvalidOption {
            name: name.to_string(),
            message: format!("option '{name}' expects {expected}"),
        }
    }
}
