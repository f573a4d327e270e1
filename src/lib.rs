//! # userapp
//!
//! Client for the UserApp API: a JSON-over-HTTP RPC surface addressed as
//! `v{version}/{service}.{method}`.
//!
//! The remote surface is not mirrored locally. Method handles are built by
//! resolving name segments at runtime and the server stays the single
//! authority on what exists, so new API methods need no client release.
//!
//! ## Layout
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`client`] | Proxy dispatch, call execution, session options |
//! | [`value`] | Order-preserving traversal of decoded JSON results |
//! | [`transport`] | HTTP delivery behind an injectable trait |
//! | [`log`] | Wire-level request/response records |
//! | [`error`] | Unified error taxonomy |
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use userapp::Api;
//!
//! #[tokio::main]
//! async fn main() -> userapp::Result<()> {
//!     let api = Api::new("YOUR APP ID")?;
//!
//!     let results = api
//!         .resolve("user")
//!         .resolve("login")
//!         .invoke(serde_json::json!({ "login": "jdoe81", "password": "secret" }))
//!         .await?;
//!
//!     println!(
//!         "token = {}",
//!         results.get("token")?.as_str().unwrap_or_default()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! A successful `user.login` stores the returned token on the session and
//! every later call authenticates with it; `user.logout` clears it again.
//! Spelling is flexible: `payment_method` and `paymentMethod` address the
//! same remote name.

pub mod client;
pub mod error;
pub mod log;
pub mod transport;
pub mod value;

pub use client::{Api, ApiBuilder, Client, DEFAULT_BASE_ADDRESS};
pub use error::Error;
pub use log::{LogSink, WireEvent};
pub use transport::{HttpTransport, Transport, TransportError, TransportResponse};
pub use value::Value;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
