//! Timeout and retry with exponential backoff around a [`Transport`].

use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

use super::client::Transport;
use super::request::{ApiRequest, RawResponse};
use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::logger::Logger;

/// An attempt did not complete within the configured timeout.
#[derive(Debug, thiserror::Error)]
#[error("request timed out after {}ms", .0.as_millis())]
pub struct RequestTimeout(pub Duration);

/// Delay before the attempt following `attempt`: `2^attempt` seconds.
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(2u64.saturating_pow(attempt))
}

/// Runs requests with a per-attempt timeout and a bounded attempt budget.
#[derive(Clone)]
pub struct Executor {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    max_attempts: u32,
    logger: Option<Arc<dyn Logger>>,
}

impl Executor {
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            timeout: config.timeout,
            max_attempts: config.max_attempts.max(1),
            logger: config.logger.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Sends the request until it completes or the budget is spent.
    ///
    /// Any completed exchange is returned as-is, whatever its status. A
    /// transport error or timeout on the last attempt becomes
    /// [`SdkError::Network`] carrying that attempt's cause.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, SdkError> {
        let mut attempt = 1;

        loop {
            let attempt_result =
                tokio::time::timeout(self.timeout, self.transport.send(request)).await;
            let outcome = match attempt_result {
                Ok(result) => result,
                Err(_) => Err(RequestTimeout(self.timeout).into()),
            };

            let err = match outcome {
                Ok(response) => {
                    debug!(
                        "attempt {}/{} completed with {}",
                        attempt, self.max_attempts, response.status
                    );
                    return Ok(response);
                }
                Err(err) => err,
            };

            let message = format!(
                "Request failed (attempt {}/{}): {:#}",
                attempt, self.max_attempts, err
            );
            if let Some(logger) = &self.logger {
                logger.error(&message);
            }

            if attempt >= self.max_attempts {
                warn!("{}, giving up", message);
                return Err(SdkError::network(err));
            }

            let delay = backoff_delay(attempt);
            warn!("{}, retrying in {}ms...", message, delay.as_millis());
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
