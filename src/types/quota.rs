use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::envelope::Payload;
use super::lenient;

/// Remaining usage allowance for a branch.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotaData {
    #[serde(deserialize_with = "lenient::integer")]
    pub quota: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub special_quota: i64,
    #[serde(deserialize_with = "lenient::integer")]
    pub over_quota: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl QuotaData {
    pub fn new(quota: i64, special_quota: i64, over_quota: i64) -> Self {
        Self {
            quota,
            special_quota,
            over_quota,
            extra: Map::new(),
        }
    }
}

impl Payload for QuotaData {
    fn from_raw(data: Value) -> Self {
        Self {
            extra: lenient::raw_fields(data),
            ..Default::default()
        }
    }
}
