//! HTTP trigger.
//!
//! Wire to model mapping for the `req` payload:
//!
//! | Wire field        | Field                      |
//! |-------------------|----------------------------|
//! | `req.Url`         | [`HttpTrigger::url`]        |
//! | `req.Method`      | [`HttpTrigger::method`]     |
//! | `req.Body`        | [`HttpTrigger::body`]       |
//! | `req.Headers`     | [`HttpTrigger::headers`]    |
//! | `req.Params`      | [`HttpTrigger::params`]     |
//! | `req.Query`       | [`HttpTrigger::query`]      |
//! | `req.Identities`  | [`HttpTrigger::identities`] |
//! | `Metadata`        | [`HttpTrigger::metadata`]   |

use crate::envelope::{decode_envelope, null_as_default};
use crate::errors::TriggerError;
use crate::form::{is_single_empty_pair, parse_form, FormValues};
use crate::metadata::HttpMetadata;
use crate::options::{TriggerOption, TriggerOptions};
use crate::trigger::{Trigger, TriggerKind};
use funcbridge_data::{HeaderMap, RawPayload};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// An HTTP trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HttpTrigger {
    /// Request URL.
    pub url: String,
    /// Request method.
    pub method: String,
    /// Request body, exactly as supplied in `req.Body`.
    pub body: RawPayload,
    /// Request headers.
    pub headers: HeaderMap,
    /// Route parameters.
    pub params: BTreeMap<String, String>,
    /// Query parameters.
    pub query: BTreeMap<String, String>,
    /// Identities of the caller.
    pub identities: Vec<HttpIdentity>,
    /// Invocation metadata.
    pub metadata: HttpMetadata,
}

/// An authenticated (or anonymous) principal attached to a request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HttpIdentity {
    /// Whether the principal is authenticated.
    #[serde(rename = "IsAuthenticated", default, deserialize_with = "null_as_default")]
    pub is_authenticated: bool,
    /// Authentication scheme.
    #[serde(rename = "AuthenticationType", default, deserialize_with = "null_as_default")]
    pub authentication_type: String,
    /// Claim type used for the principal name.
    #[serde(rename = "NameClaimType", default, deserialize_with = "null_as_default")]
    pub name_claim_type: String,
    /// Claim type used for roles.
    #[serde(rename = "RoleClaimType", default, deserialize_with = "null_as_default")]
    pub role_claim_type: String,
    /// Delegating identity, if any.
    #[serde(rename = "Actor", default)]
    pub actor: Value,
    /// Bootstrap context, if any.
    #[serde(rename = "BootstrapContext", default)]
    pub bootstrap_context: Value,
    /// Identity label, if any.
    #[serde(rename = "Label", default)]
    pub label: Value,
    /// Identity name, if any.
    #[serde(rename = "Name", default)]
    pub name: Value,
    /// Claims asserted for the identity.
    #[serde(rename = "Claims", default, deserialize_with = "null_as_default")]
    pub claims: Vec<HttpIdentityClaims>,
}

/// A single claim of an [`HttpIdentity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpIdentityClaims {
    /// Claim issuer.
    #[serde(rename = "Issuer", default, deserialize_with = "null_as_default")]
    pub issuer: String,
    /// Original claim issuer.
    #[serde(rename = "OriginalIssuer", default, deserialize_with = "null_as_default")]
    pub original_issuer: String,
    /// Claim type.
    #[serde(rename = "Type", default, deserialize_with = "null_as_default")]
    pub claim_type: String,
    /// Claim value.
    #[serde(rename = "Value", default, deserialize_with = "null_as_default")]
    pub value: String,
    /// Type of the claim value.
    #[serde(rename = "ValueType", default, deserialize_with = "null_as_default")]
    pub value_type: String,
    /// Additional claim properties.
    #[serde(rename = "Properties", default, deserialize_with = "null_as_default")]
    pub properties: BTreeMap<String, String>,
}

/// The `req` payload as sent by the host.
#[derive(Deserialize)]
struct HttpRequest {
    #[serde(rename = "Url", default, deserialize_with = "null_as_default")]
    url: String,
    #[serde(rename = "Method", default, deserialize_with = "null_as_default")]
    method: String,
    #[serde(rename = "Body", default)]
    body: RawPayload,
    #[serde(rename = "Headers", default, deserialize_with = "null_as_default")]
    headers: HeaderMap,
    #[serde(rename = "Params", default, deserialize_with = "null_as_default")]
    params: BTreeMap<String, String>,
    #[serde(rename = "Query", default, deserialize_with = "null_as_default")]
    query: BTreeMap<String, String>,
    #[serde(rename = "Identities", default, deserialize_with = "null_as_default")]
    identities: Vec<HttpIdentity>,
}

impl HttpTrigger {
    /// Default binding name of an HTTP trigger.
    pub const DEFAULT_NAME: &'static str = "req";

    /// Decodes an HTTP trigger from the host envelope in `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::PayloadMalformed`] if the envelope is not
    /// valid JSON or has no `Data.req` member.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TriggerError> {
        Self::from_reader_with(reader, std::iter::empty())
    }

    /// Like [`HttpTrigger::from_reader`], applying `options` first.
    ///
    /// [`with_name`](crate::with_name) changes the `Data` member decoded.
    pub fn from_reader_with<R: Read>(
        reader: R,
        options: impl IntoIterator<Item = TriggerOption>,
    ) -> Result<Self, TriggerError> {
        let opts = TriggerOptions::new(options);
        let decoded = decode_envelope::<_, HttpRequest, HttpMetadata>(
            reader,
            Some(opts.key_or(Self::DEFAULT_NAME)),
        )?;
        let req = decoded.payload;

        tracing::debug!(
            kind = %TriggerKind::Http,
            name = %decoded.key,
            method = %req.method,
            body_len = req.body.len(),
            "decoded trigger"
        );

        Ok(HttpTrigger {
            url: req.url,
            method: req.method,
            body: req.body,
            headers: req.headers,
            params: req.params,
            query: req.query,
            identities: req.identities,
            metadata: decoded.metadata,
        })
    }

    /// Returns the request body decoded as URL-encoded form data.
    ///
    /// # Errors
    ///
    /// - [`TriggerError::InvalidContentType`] if `Content-Type` is not
    ///   `application/x-www-form-urlencoded` (compared ignoring case).
    /// - [`TriggerError::InvalidBody`] if the body is not valid form data,
    ///   or decodes to a single key whose first value is empty.
    pub fn form_data(&self) -> Result<FormValues, TriggerError> {
        let content_type = self.headers.get("Content-Type").unwrap_or_default();
        if !content_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
            return Err(TriggerError::InvalidContentType(content_type.to_string()));
        }

        let invalid_body = || TriggerError::InvalidBody(self.body.to_string());
        let values = parse_form(self.body.as_bytes()).ok_or_else(invalid_body)?;
        if is_single_empty_pair(&values) {
            return Err(invalid_body());
        }
        Ok(values)
    }
}

impl Trigger for HttpTrigger {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Http
    }

    fn parse_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<(), serde_json::Error> {
        self.body.decode_into(target)
    }

    fn data(&self) -> Option<&RawPayload> {
        Some(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger(content_type: &str, body: &str) -> HttpTrigger {
        let mut headers = HeaderMap::new();
        headers.add("Content-Type", content_type);
        HttpTrigger {
            body: RawPayload::from(body),
            headers,
            ..Default::default()
        }
    }

    #[test]
    fn form_data_requires_form_content_type() {
        let err = trigger("application/json", "x=1").form_data().unwrap_err();
        match err {
            TriggerError::InvalidContentType(value) => assert_eq!(value, "application/json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn form_data_content_type_ignores_case() {
        let values = trigger("Application/X-WWW-Form-Urlencoded", "x=1")
            .form_data()
            .unwrap();
        assert_eq!(values["x"], ["1"]);
    }

    #[test]
    fn form_data_missing_content_type_reports_empty_value() {
        let t = HttpTrigger {
            body: RawPayload::from("x=1"),
            ..Default::default()
        };
        assert!(matches!(
            t.form_data(),
            Err(TriggerError::InvalidContentType(v)) if v.is_empty()
        ));
    }

    #[test]
    fn form_data_rejects_single_empty_pair() {
        let err = trigger(FORM_CONTENT_TYPE, "x=").form_data().unwrap_err();
        match err {
            TriggerError::InvalidBody(body) => assert_eq!(body, "x="),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn form_data_rejects_bad_escape() {
        assert!(matches!(
            trigger(FORM_CONTENT_TYPE, "x=%G1").form_data(),
            Err(TriggerError::InvalidBody(_))
        ));
    }

    #[test]
    fn form_data_rejects_escape_of_invalid_utf8() {
        match trigger(FORM_CONTENT_TYPE, "x=%FF").form_data() {
            Err(TriggerError::InvalidBody(body)) => assert_eq!(body, "x=%FF"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn form_data_keeps_repeated_keys() {
        let values = trigger(FORM_CONTENT_TYPE, "x=1&x=2&y=")
            .form_data()
            .unwrap();
        assert_eq!(values["x"], ["1", "2"]);
        assert_eq!(values["y"], [""]);
    }

    #[test]
    fn parse_into_leaves_target_on_error() {
        let mut target: Value = Value::Bool(true);
        let t = trigger(FORM_CONTENT_TYPE, "not-json");
        assert!(t.parse_into(&mut target).is_err());
        assert_eq!(target, Value::Bool(true));
    }
}
