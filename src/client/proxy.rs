//! Dynamic proxy dispatch over the remote API's address space.
//!
//! Nothing about the remote surface is known at compile time: the server is
//! the only validator of what exists. An [`Api`] handle addresses one
//! position (version, service path, method) in that space. [`Api::resolve`]
//! walks one name segment, creating and caching the child node on first
//! touch; [`Api::invoke`] issues the call the node addresses.
//!
//! ```rust,no_run
//! # async fn demo() -> userapp::Result<()> {
//! let api = userapp::Api::new("YOUR APP ID")?;
//! let results = api
//!     .resolve("user")
//!     .resolve("invoice")
//!     .resolve("search")
//!     .invoke(serde_json::json!({ "user_id": "abc123" }))
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::client::builder::ApiBuilder;
use crate::client::core::Client;
use crate::log::LogSink;
use crate::value::Value;
use crate::{Error, Result};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::debug;

static SHARED: OnceCell<Api> = OnceCell::new();

/// One position in the address space. Children never hold their parent;
/// `parent_service_path` (`None` only at the root) carries what `invoke`
/// needs, so the node graph is acyclic and drops with its handles.
struct Node {
    client: Arc<Client>,
    version: String,
    service_path: String,
    parent_service_path: Option<String>,
    method_name: String,
    children: Mutex<HashMap<String, Api>>,
}

/// Handle to one position in the remote API's address space.
///
/// Handles are cheap to clone and compare by node identity: two handles are
/// equal exactly when they came out of the same child cache, so repeated
/// lookups of one name (in any spelling) compare equal.
#[derive(Clone)]
pub struct Api {
    node: Arc<Node>,
}

impl Api {
    /// Builds a session with default options and returns its root handle.
    pub fn new(app_id: impl Into<String>) -> Result<Api> {
        ApiBuilder::new(app_id).build()
    }

    /// Builder access, for sessions that need more than an application id.
    pub fn builder(app_id: impl Into<String>) -> ApiBuilder {
        ApiBuilder::new(app_id)
    }

    /// Process-wide shared handle, created on first use.
    ///
    /// The first caller's `init` builds the instance; every later call gets
    /// a clone of the stored handle and its `init` never runs. Callers that
    /// never touch `shared` are unaffected.
    pub fn shared<F>(init: F) -> Result<Api>
    where
        F: FnOnce() -> Result<Api>,
    {
        SHARED.get_or_try_init(init).cloned()
    }

    pub(crate) fn root(client: Arc<Client>) -> Api {
        Api {
            node: Arc::new(Node {
                client,
                version: "1".to_string(),
                service_path: String::new(),
                parent_service_path: None,
                method_name: String::new(),
                children: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Resolves one name segment, creating and caching the child node on
    /// first access.
    ///
    /// Names are canonicalized before lookup (`_x` pairs collapse to `X`
    /// after the first character), so `payment_method` and `paymentMethod`
    /// share one cached child. On the root handle only, a name of the form
    /// `v` + decimal number (`v2`, `v1.1`) selects an API version instead of
    /// starting a service path.
    pub fn resolve(&self, name: &str) -> Api {
        let canonical = canonicalize(name);
        let mut children = self.node.children.lock().unwrap();
        if let Some(child) = children.get(&canonical) {
            return child.clone();
        }

        let node = if self.node.parent_service_path.is_none() && is_version(&canonical) {
            Node {
                client: self.node.client.clone(),
                version: canonical[1..].to_string(),
                service_path: String::new(),
                parent_service_path: Some(self.node.service_path.clone()),
                method_name: String::new(),
                children: Mutex::new(HashMap::new()),
            }
        } else {
            let service_path = if self.node.service_path.is_empty() {
                canonical.clone()
            } else {
                format!("{}.{}", self.node.service_path, canonical)
            };
            Node {
                client: self.node.client.clone(),
                version: self.node.version.clone(),
                service_path,
                parent_service_path: Some(self.node.service_path.clone()),
                method_name: canonical.clone(),
                children: Mutex::new(HashMap::new()),
            }
        };

        let child = Api {
            node: Arc::new(node),
        };
        children.insert(canonical, child.clone());
        child
    }

    /// Invokes the method this handle addresses.
    ///
    /// The last resolved segment is the method name and everything before it
    /// is the service path, so `user.invoice.search` means method `search`
    /// on service `user.invoice`. Invoking the root handle fails without
    /// touching the network.
    ///
    /// `arguments` must serialize to a JSON object (the call's named
    /// arguments); pass `()` for none. The wire protocol has no positional
    /// parameters, so any other shape is dropped with a debug log.
    pub async fn invoke<A: Serialize>(&self, arguments: A) -> Result<Value> {
        let Some(service) = &self.node.parent_service_path else {
            return Err(Error::invalid_method("service does not exist", None, None));
        };

        let arguments = match serde_json::to_value(arguments)? {
            serde_json::Value::Object(fields) => fields,
            serde_json::Value::Null => serde_json::Map::new(),
            other => {
                debug!(target: "userapp", ?other, "non-object call arguments ignored");
                serde_json::Map::new()
            }
        };

        self.node
            .client
            .call(&self.node.version, service, &self.node.method_name, arguments)
            .await
    }

    /// The executor shared by every handle of this session.
    pub fn client(&self) -> Arc<Client> {
        self.node.client.clone()
    }

    /// Reads a session option by name. See [`Client::get_option`].
    pub fn get_option(&self, name: &str) -> Result<serde_json::Value> {
        self.node.client.get_option(name)
    }

    /// Writes a session option by name. See [`Client::set_option`].
    pub fn set_option(&self, name: &str, value: serde_json::Value) -> Result<()> {
        self.node.client.set_option(name, value)
    }

    pub fn log_sink(&self) -> Arc<dyn LogSink> {
        self.node.client.log_sink()
    }

    pub fn set_log_sink(&self, sink: Arc<dyn LogSink>) {
        self.node.client.set_log_sink(sink)
    }
}

impl PartialEq for Api {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Api {}

impl fmt::Debug for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Api")
            .field("version", &self.node.version)
            .field("service_path", &self.node.service_path)
            .field("method_name", &self.node.method_name)
            .finish()
    }
}

/// Collapses `_x` into `X` after the first character, the canonical
/// camelCase spelling used as the child-cache key.
///
/// Only ASCII letters are promoted; other underscores (leading, doubled,
/// before digits) pass through untouched. Canonical input maps to itself.
fn canonicalize(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len());
    let mut i = 0;
    while i < chars.len() {
        let current = chars[i];
        if i > 0
            && current == '_'
            && matches!(chars.get(i + 1), Some(next) if next.is_ascii_alphabetic())
        {
            out.push(chars[i + 1].to_ascii_uppercase());
            i += 2;
        } else {
            out.push(current);
            i += 1;
        }
    }
    out
}

/// Whether a canonical segment names an API version: `v` followed by a
/// decimal number, digits with at most one dot.
fn is_version(name: &str) -> bool {
    match name.strip_prefix('v') {
        Some(rest) => {
            !rest.is_empty()
                && rest.chars().all(|c| c.is_ascii_digit() || c == '.')
                && rest.chars().filter(|c| *c == '.').count() <= 1
                && rest.chars().any(|c| c.is_ascii_digit())
        }
        None => false,
    }
}
