//! Wire-level logging hooks.
//!
//! When a session has `debug` switched on, the call executor reports every
//! outgoing request and every decoded response to an injectable [`LogSink`].
//! The default sink forwards to `tracing`; tests swap in [`MemoryLogSink`]
//! to assert on what crossed the wire.
//!
//! Events carry the full request and response bodies but never the
//! `Authorization` header.

use serde::Serialize;
use std::sync::{Arc, RwLock};

/// One wire-level record emitted by the call executor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum WireEvent {
    /// An outgoing request, recorded before the transport is invoked.
    Request {
        url: String,
        service: String,
        method: String,
        body: String,
    },
    /// A response, recorded once its body has been read.
    Response { status: u16, body: String },
}

/// Destination for wire-level records.
///
/// Implementations must be cheap and non-blocking; they run inline on the
/// calling task.
pub trait LogSink: Send + Sync {
    fn record(&self, event: &WireEvent);
}

/// Forwards records to `tracing` at debug level under the `userapp` target.
pub struct TracingLogSink;

impl LogSink for TracingLogSink {
    fn record(&self, event: &WireEvent) {
        match event {
            WireEvent::Request {
                url,
                service,
                method,
                body,
            } => {
                tracing::debug!(
                    target: "userapp",
                    url = url.as_str(),
                    service = service.as_str(),
                    method = method.as_str(),
                    body = body.as_str(),
                    "request"
                );
            }
            WireEvent::Response { status, body } => {
                tracing::debug!(
                    target: "userapp",
                    status = *status,
                    body = body.as_str(),
                    "response"
                );
            }
        }
    }
}

/// Discards every record.
pub struct NoopLogSink;

impl LogSink for NoopLogSink {
    fn record(&self, _event: &WireEvent) {}
}

/// Buffers records in memory, for tests and diagnostics.
#[derive(Default)]
pub struct MemoryLogSink {
    events: RwLock<Vec<WireEvent>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn events(&self) -> Vec<WireEvent> {
        self.events.read().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.events.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemoryLogSink {
    fn record(&self, event: &WireEvent) {
        self.events.write().unwrap().push(event.clone());
    }
}

/// The default sink: tracing-backed.
pub fn tracing_sink() -> Arc<dyn LogSink> {
    Arc::new(TracingLogSink)
}

/// A sink that swallows everything.
pub fn noop_sink() -> Arc<dyn LogSink> {
    Arc::new(NoopLogSink)
}
