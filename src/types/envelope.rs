use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use super::codes::RemoteErrorCode;
use super::slip::{BankDelay, SlipData};

/// Result of a client operation as reported by the remote service.
///
/// Serializes to the wire shape: `{"success": true, "data": ...}` or
/// `{"success": false, "code": ..., "message": ..., "data"?: ...}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope<T> {
    Success(T),
    Error(RemoteError),
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Envelope::Success(data) => Some(data),
            Envelope::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&RemoteError> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Error(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<T, RemoteError> {
        match self {
            Envelope::Success(data) => Ok(data),
            Envelope::Error(err) => Err(err),
        }
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Envelope::Success(data) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
                map.end()
            }
            Envelope::Error(err) => {
                let len = if err.data.is_some() { 4 } else { 3 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("success", &false)?;
                map.serialize_entry("code", &err.code)?;
                map.serialize_entry("message", &err.message)?;
                if let Some(data) = &err.data {
                    map.serialize_entry("data", data)?;
                }
                map.end()
            }
        }
    }
}

/// Record carried by a success envelope.
pub trait Payload: DeserializeOwned {
    /// Keeps a `data` value that does not decode into the record.
    fn from_raw(data: Value) -> Self;
}

/// Error reported by the remote service, lifted verbatim from the body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoteError {
    pub code: Option<String>,
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RemoteError {
    /// Builds the error from whatever the response body holds.
    ///
    /// Never fails: missing fields stay `None` and a numeric `code` is kept
    /// as its decimal text.
    pub fn from_body(body: &Value) -> Self {
        let empty = Map::new();
        let fields = body.as_object().unwrap_or(&empty);

        Self {
            code: fields.get("code").and_then(scalar_text),
            message: fields.get("message").and_then(scalar_text),
            data: fields.get("data").filter(|v| !v.is_null()).cloned(),
        }
    }

    pub fn known_code(&self) -> Option<RemoteErrorCode> {
        self.code.as_deref().and_then(RemoteErrorCode::from_code)
    }

    /// Transaction matched by a duplicate, amount or receiver check
    /// (codes 1012, 1013, 1014).
    pub fn transaction(&self) -> Option<SlipData> {
        match self.known_code()? {
            RemoteErrorCode::DuplicateSlip
            | RemoteErrorCode::AmountMismatch
            | RemoteErrorCode::ReceiverMismatch => {
                serde_json::from_value(self.data.clone()?).ok()
            }
            _ => None,
        }
    }

    /// Processing delay announced for slips from some banks (code 1010).
    pub fn bank_delay(&self) -> Option<BankDelay> {
        match self.known_code()? {
            RemoteErrorCode::BankDelay => serde_json::from_value(self.data.clone()?).ok(),
            _ => None,
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.code.as_deref().unwrap_or("unknown"),
            self.message.as_deref().unwrap_or("no message")
        )
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuotaData;
    use serde_json::json;

    #[test]
    fn test_remote_error_from_body() {
        let body = json!({"success": false, "code": "1002", "message": "Authorization Header invalid"});
        let err = RemoteError::from_body(&body);
        assert_eq!(err.code.as_deref(), Some("1002"));
        assert_eq!(err.message.as_deref(), Some("Authorization Header invalid"));
        assert!(err.data.is_none());
        assert_eq!(err.known_code(), Some(RemoteErrorCode::InvalidAuthorization));
    }

    #[test]
    fn test_remote_error_numeric_code() {
        let err = RemoteError::from_body(&json!({"code": 1001, "message": "branch not found"}));
        assert_eq!(err.code.as_deref(), Some("1001"));
    }

    #[test]
    fn test_remote_error_from_non_object_body() {
        let err = RemoteError::from_body(&json!(["unexpected"]));
        assert_eq!(err, RemoteError::default());
    }

    #[test]
    fn test_remote_error_null_data_is_dropped() {
        let err = RemoteError::from_body(&json!({"code": "1000", "message": "m", "data": null}));
        assert!(err.data.is_none());
    }

    #[test]
    fn test_duplicate_slip_exposes_transaction() {
        let err = RemoteError::from_body(&json!({
            "success": false,
            "code": 1012,
            "message": "duplicate slip",
            "data": {"transRef": "015073144041ATF00999", "amount": 250.0}
        }));

        let tx = err.transaction().unwrap();
        assert_eq!(tx.trans_ref, "015073144041ATF00999");
        assert_eq!(tx.amount, 250.0);
        assert!(err.bank_delay().is_none());
    }

    #[test]
    fn test_bank_delay_payload() {
        let err = RemoteError::from_body(&json!({
            "success": false,
            "code": "1010",
            "message": "wait",
            "data": {"qrcodeData": "0046000600000101", "bankCode": "014", "bankName": "SCB", "delay": 5}
        }));

        let delay = err.bank_delay().unwrap();
        assert_eq!(delay.bank_code, "014");
        assert_eq!(delay.delay, 5);
        assert!(err.transaction().is_none());
    }

    #[test]
    fn test_success_serializes_to_wire_shape() {
        let envelope = Envelope::Success(QuotaData::new(10, 1, 0));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": true, "data": {"quota": 10, "specialQuota": 1, "overQuota": 0}})
        );
    }

    #[test]
    fn test_error_serializes_to_wire_shape() {
        let envelope: Envelope<QuotaData> = Envelope::Error(RemoteError {
            code: Some("1001".to_string()),
            message: Some("branch not found".to_string()),
            data: None,
        });

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": false, "code": "1001", "message": "branch not found"})
        );
        assert!(!envelope.is_success());
        assert!(envelope.data().is_none());
        assert_eq!(envelope.error().unwrap().to_string(), "[1001] branch not found");
    }

    #[test]
    fn test_into_result() {
        let ok: Envelope<u32> = Envelope::Success(7);
        assert_eq!(ok.into_result().unwrap(), 7);

        let err: Envelope<u32> = Envelope::Error(RemoteError::default());
        assert!(err.into_result().is_err());
    }
}
