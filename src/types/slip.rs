use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

use super::bank::Bank;
use super::envelope::Payload;
use super::lenient;

/// Verified bank transfer as reported by the remote service.
///
/// The client forwards the record without interpreting it. Fields default
/// when absent or `null`, and fields not named here are kept in `extra` so
/// the record serializes back to what the service sent.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SlipData {
    #[serde(deserialize_with = "lenient::string")]
    pub success: String,
    #[serde(deserialize_with = "lenient::string")]
    pub message: String,
    #[serde(rename = "rqUID", deserialize_with = "lenient::string")]
    pub rq_uid: String,
    #[serde(deserialize_with = "lenient::string")]
    pub language: String,
    #[serde(deserialize_with = "lenient::string")]
    pub trans_ref: String,
    #[serde(deserialize_with = "lenient::string")]
    pub sending_bank: String,
    #[serde(deserialize_with = "lenient::string")]
    pub receiving_bank: String,
    #[serde(deserialize_with = "lenient::string")]
    pub trans_date: String,
    #[serde(deserialize_with = "lenient::string")]
    pub trans_time: String,
    #[serde(deserialize_with = "lenient::string")]
    pub trans_timestamp: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub sender: Party,
    #[serde(deserialize_with = "lenient::or_default")]
    pub receiver: Party,
    #[serde(deserialize_with = "lenient::number")]
    pub amount: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub paid_local_amount: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub paid_local_currency: String,
    #[serde(deserialize_with = "lenient::string")]
    pub country_code: String,
    #[serde(deserialize_with = "lenient::number")]
    pub trans_fee_amount: f64,
    #[serde(deserialize_with = "lenient::string")]
    pub ref1: String,
    #[serde(deserialize_with = "lenient::string")]
    pub ref2: String,
    #[serde(deserialize_with = "lenient::string")]
    pub ref3: String,
    #[serde(deserialize_with = "lenient::string")]
    pub to_merchant_id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SlipData {
    pub fn sending_bank(&self) -> Option<Bank> {
        Bank::from_code(&self.sending_bank)
    }

    pub fn receiving_bank(&self) -> Option<Bank> {
        Bank::from_code(&self.receiving_bank)
    }
}

impl Payload for SlipData {
    fn from_raw(data: Value) -> Self {
        Self {
            extra: lenient::raw_fields(data),
            ..Default::default()
        }
    }
}

/// Sender or receiver of a transfer.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Party {
    #[serde(deserialize_with = "lenient::string")]
    pub display_name: String,
    #[serde(deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub proxy: Identifier,
    #[serde(deserialize_with = "lenient::or_default")]
    pub account: Identifier,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Typed identifier such as a PromptPay proxy (`MSISDN`, `NATID`, ...) or
/// an account (`BANKAC`, `TOKEN`, ...).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Identifier {
    #[serde(rename = "type", deserialize_with = "lenient::optional_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient::optional_string")]
    pub value: Option<String>,
}

/// Payload of error code 1010: the bank needs time before its slips can be
/// verified.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct BankDelay {
    #[serde(deserialize_with = "lenient::string")]
    pub qrcode_data: String,
    #[serde(deserialize_with = "lenient::string")]
    pub bank_code: String,
    #[serde(deserialize_with = "lenient::string")]
    pub bank_name: String,
    /// Minutes to wait.
    #[serde(deserialize_with = "lenient::integer")]
    pub delay: u64,
}

/// Slip submission. Absent fields are left out of the request entirely.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SlipCheck {
    /// Raw QR payload read from the slip.
    pub data: Option<String>,
    /// Publicly reachable URL of the slip image.
    pub url: Option<String>,
    /// Uploaded slip image.
    pub files: Option<SlipImage>,
    /// Expected amount; the service reports a mismatch when it differs.
    pub amount: Option<f64>,
    /// Whether the service records the slip (needed for duplicate detection).
    pub log: bool,
}

impl SlipCheck {
    pub fn from_qr(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            ..Default::default()
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }

    pub fn from_image(image: SlipImage) -> Self {
        Self {
            files: Some(image),
            ..Default::default()
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }
}

/// Image file attached to a slip check.
#[derive(Debug, Clone, PartialEq)]
pub struct SlipImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SlipImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read slip image {}", path.display()))?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("slip")
            .to_string();
        Ok(Self::new(file_name, bytes))
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    match ext.as_deref() {
        Some("jpg") | Some("jpeg") | Some("jfif") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
