use thiserror::Error;

/// Errors returned while constructing or reading a trigger.
///
/// Failures from decoding a trigger body into a caller-supplied shape are not
/// represented here; they surface as the underlying [`serde_json::Error`].
#[derive(Error, Debug)]
pub enum TriggerError {
    /// The envelope could not be read, was not valid JSON, or did not have
    /// the `{Data: {<kind>: ...}, Metadata: ...}` shape.
    #[error("trigger payload malformed: {0}")]
    PayloadMalformed(#[source] serde_json::Error),
    /// Form data was requested on a request with another `Content-Type`.
    #[error("invalid Content-Type: {0}")]
    InvalidContentType(String),
    /// The request body is not usable URL-encoded form data.
    #[error("invalid body: {0}")]
    InvalidBody(String),
}

impl TriggerError {
    pub(crate) fn malformed(reason: impl std::fmt::Display) -> Self {
        use serde::de::Error as _;
        TriggerError::PayloadMalformed(serde_json::Error::custom(reason))
    }
}
