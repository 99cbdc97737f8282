//! HTTP transport with timeout and retry.

mod client;
mod request;
mod retry;

pub use client::{HttpClient, Transport};
pub use request::{ApiRequest, FormPart, RawResponse, RequestBody};
pub use retry::{Executor, RequestTimeout, backoff_delay};

#[cfg(test)]
pub use client::MockTransport;
