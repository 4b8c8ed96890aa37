use crate::envelope::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Invocation metadata shared by every trigger kind.
///
/// `sys` is modeled explicitly; every other member the host sends is kept
/// as-is in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Host-provided system fields.
    #[serde(rename = "sys", default, deserialize_with = "null_as_default")]
    pub sys: SysMetadata,
    /// Remaining metadata members, keyed by their wire name.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The `sys` member of invocation metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SysMetadata {
    /// Name of the function being invoked.
    #[serde(rename = "MethodName", default, deserialize_with = "null_as_default")]
    pub method_name: String,
    /// Host clock at invocation time.
    #[serde(rename = "UtcNow", default)]
    pub utc_now: Option<DateTime<Utc>>,
    /// Random GUID assigned by the host.
    #[serde(rename = "RandGuid", default, deserialize_with = "null_as_default")]
    pub rand_guid: String,
}

/// Metadata for an HTTP trigger: the request echo plus the common fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpMetadata {
    /// Request headers, one value per key.
    #[serde(rename = "Headers", default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    /// Route parameters.
    #[serde(rename = "Params", default, deserialize_with = "null_as_default")]
    pub params: BTreeMap<String, String>,
    /// Query parameters.
    #[serde(rename = "Query", default, deserialize_with = "null_as_default")]
    pub query: BTreeMap<String, String>,
    /// Common metadata.
    #[serde(flatten)]
    pub metadata: Metadata,
}
