//! Logging capability injected into the digestor.
//!
//! Computed digests are reported at info level and missing templates at error
//! level. Hosts decide where those messages go; the default drops them.

/// Sink for digest results.
pub trait DigestLogger: Send + Sync {
    /// A digest was computed.
    fn info(&self, message: &str);

    /// A template could not be found while digesting.
    fn error(&self, message: &str);
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl DigestLogger for NoopLogger {
    fn info(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Forwards messages to `tracing` under the `template_digest` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DigestLogger for TracingLogger {
    fn info(&self, message: &str) {
        tracing::info!(target: "template_digest", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "template_digest", "{message}");
    }
}
