//! Quota and slip checks against the SlipOK API.

use anyhow::Context;
use async_trait::async_trait;
use log::debug;
use reqwest::Method;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::http::{ApiRequest, Executor, FormPart, HttpClient, RawResponse, RequestBody, Transport};
use crate::types::{Envelope, Payload, QuotaData, RemoteError, SlipCheck, SlipData};

/// Header carrying the API key.
pub const AUTHORIZATION_HEADER: &str = "x-authorization";

/// Operations offered by the remote service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlipApi: Send + Sync {
    /// Remaining quota of the branch.
    async fn check_quota(&self) -> Result<Envelope<QuotaData>, SdkError>;

    /// Verifies a slip given as QR data, image URL or uploaded image.
    async fn check_slip(&self, slip: SlipCheck) -> Result<Envelope<SlipData>, SdkError>;
}

/// Client bound to one API key and branch.
///
/// Immutable after construction, so one instance can serve concurrent calls.
#[derive(Clone)]
pub struct SlipOk {
    api_key: String,
    branch_id: String,
    config: ClientConfig,
    executor: Executor,
}

impl SlipOk {
    /// Creates a client with the default configuration.
    pub fn new(api_key: impl Into<String>, branch_id: impl Into<String>) -> Result<Self, SdkError> {
        Self::with_config(api_key, branch_id, ClientConfig::default())
    }

    pub fn with_config(
        api_key: impl Into<String>,
        branch_id: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self, SdkError> {
        Self::with_transport(api_key, branch_id, config, Arc::new(HttpClient::default()))
    }

    /// Creates a client that sends its requests through `transport`.
    ///
    /// Fails with `INVALID_CLIENT` before anything is sent when the API key
    /// is blank or the branch ID is not all decimal digits.
    pub fn with_transport(
        api_key: impl Into<String>,
        branch_id: impl Into<String>,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, SdkError> {
        let api_key = api_key.into();
        let branch_id = branch_id.into();

        if api_key.trim().is_empty() {
            return Err(SdkError::invalid_client("API key is invalid"));
        }
        if !is_branch_id(&branch_id) {
            return Err(SdkError::invalid_client("Branch ID is invalid"));
        }

        let executor = Executor::new(transport, &config);
        Ok(Self {
            api_key,
            branch_id,
            config,
            executor,
        })
    }

    pub fn branch_id(&self) -> &str {
        &self.branch_id
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn quota_request(&self) -> ApiRequest {
        let url = format!("{}/{}/quota", self.config.endpoint(), self.branch_id);
        ApiRequest::new(Method::GET, url)
            .header(AUTHORIZATION_HEADER, self.api_key.as_str())
            .header("Content-Type", "application/json")
    }

    fn slip_request(&self, slip: &SlipCheck) -> ApiRequest {
        let url = format!("{}/{}", self.config.endpoint(), self.branch_id);
        ApiRequest::new(Method::POST, url)
            .header(AUTHORIZATION_HEADER, self.api_key.as_str())
            .body(RequestBody::Multipart(slip_form(slip)))
    }

    fn log_debug(&self, message: &str) {
        if let Some(logger) = &self.config.logger {
            logger.debug(message);
        }
    }

    fn log_outcome<T>(&self, operation: &str, envelope: &Envelope<T>) {
        let Some(logger) = &self.config.logger else {
            return;
        };
        match envelope {
            Envelope::Success(_) => logger.info(&format!("{} succeeded", operation)),
            Envelope::Error(err) => {
                logger.info(&format!("{} returned error {}", operation, err))
            }
        }
    }
}

#[async_trait]
impl SlipApi for SlipOk {
    #[tracing::instrument(skip(self))]
    async fn check_quota(&self) -> Result<Envelope<QuotaData>, SdkError> {
        self.log_debug("Checking quota");

        let response = self.executor.execute(&self.quota_request()).await?;
        let envelope = classify(&response)?;

        self.log_outcome("Quota check", &envelope);
        Ok(envelope)
    }

    #[tracing::instrument(skip(self, slip))]
    async fn check_slip(&self, slip: SlipCheck) -> Result<Envelope<SlipData>, SdkError> {
        self.log_debug("Checking slip");

        let response = self.executor.execute(&self.slip_request(&slip)).await?;
        let envelope = classify(&response)?;

        self.log_outcome("Slip check", &envelope);
        Ok(envelope)
    }
}

impl fmt::Debug for SlipOk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlipOk")
            .field("api_key", &"<redacted>")
            .field("branch_id", &self.branch_id)
            .field("config", &self.config)
            .finish()
    }
}

fn is_branch_id(branch_id: &str) -> bool {
    !branch_id.is_empty() && branch_id.bytes().all(|b| b.is_ascii_digit())
}

/// Form parts in field order `data`, `url`, `files`, `amount`, `log`,
/// skipping absent fields.
fn slip_form(slip: &SlipCheck) -> Vec<FormPart> {
    let text = |name: &str, value: String| FormPart::Text {
        name: name.to_string(),
        value,
    };

    let mut parts = Vec::new();
    if let Some(data) = &slip.data {
        parts.push(text("data", data.clone()));
    }
    if let Some(url) = &slip.url {
        parts.push(text("url", url.clone()));
    }
    if let Some(image) = &slip.files {
        parts.push(FormPart::File {
            name: "files".to_string(),
            file_name: image.file_name.clone(),
            content_type: image.content_type.clone(),
            bytes: image.bytes.clone(),
        });
    }
    if let Some(amount) = slip.amount {
        parts.push(text("amount", amount.to_string()));
    }
    parts.push(text("log", slip.log.to_string()));
    parts
}

/// Turns a completed exchange into an envelope.
///
/// A success envelope needs a 2xx status, `success: true`, a non-null
/// `data` and no `code`. Everything else that parses as JSON is an error
/// envelope. Only an unparsable body is raised; a `data` value that does
/// not fit the record is kept through [`Payload::from_raw`].
fn classify<T: Payload>(response: &RawResponse) -> Result<Envelope<T>, SdkError> {
    let body: Value = serde_json::from_slice(&response.body)
        .with_context(|| format!("Failed to parse JSON response (HTTP {})", response.status))
        .map_err(SdkError::network)?;

    let accepted = response.status.is_success()
        && body.get("success").and_then(Value::as_bool) == Some(true)
        && body.get("data").is_some_and(|data| !data.is_null())
        && body.get("code").is_none_or(Value::is_null);

    if !accepted {
        let err = RemoteError::from_body(&body);
        debug!("Remote service reported {} (HTTP {})", err, response.status);
        return Ok(Envelope::Error(err));
    }

    let data = body.get("data").cloned().unwrap_or_default();
    let payload = match serde_json::from_value(data.clone()) {
        Ok(payload) => payload,
        Err(err) => {
            debug!("Keeping payload as received: {}", err);
            T::from_raw(data)
        }
    };

    Ok(Envelope::Success(payload))
}
