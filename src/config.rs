//! Client configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::logger::Logger;

/// Vendor endpoint used when no base URL is configured.
pub const BASE_API_URL: &str = "https://api.slipok.com/api/line/apikey";

/// Per-attempt timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Total number of attempts per call, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Settings fixed for the lifetime of a client.
///
/// A zero timeout or a zero attempt budget is treated as unset and falls
/// back to the defaults.
#[derive(Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub max_attempts: u32,
    pub logger: Option<Arc<dyn Logger>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_API_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            logger: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        if !base_url.is_empty() {
            self.base_url = base_url;
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        if max_attempts > 0 {
            self.max_attempts = max_attempts;
        }
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Base URL without trailing slashes, ready for path joining.
    pub(crate) fn endpoint(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_attempts", &self.max_attempts)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}
