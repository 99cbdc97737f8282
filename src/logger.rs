//! Caller-supplied diagnostic sink.

/// Receives the client's operational events.
///
/// Installing a logger is optional; without one the events are dropped.
/// Implementations must not fail, so the methods return nothing.
#[cfg_attr(test, mockall::automock)]
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the `log` facade under the `slipok` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl Logger for LogSink {
    fn debug(&self, message: &str) {
        log::debug!(target: "slipok", "{}", message);
    }

    fn info(&self, message: &str) {
        log::info!(target: "slipok", "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: "slipok", "{}", message);
    }
}
