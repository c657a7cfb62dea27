//! Operator-facing log capability injected into the service.
//!
//! Request tracing (URLs, redacted headers, statuses) goes through a
//! [`Logger`] so callers and tests can decide where it lands.

/// Receives operator-visible log lines.
pub trait Logger: Send + Sync {
    /// Records one message.
    fn log(&self, message: &str);
}

/// Forwards every message to `tracing` at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "figma_fetch::api", "{message}");
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _message: &str) {}
}
