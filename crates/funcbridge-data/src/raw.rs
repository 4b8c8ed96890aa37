use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;

/// Opaque payload bytes captured from an invocation envelope.
///
/// When decoded from the wire a JSON string is captured as its unescaped
/// content, `null` as an empty payload, and every other JSON value as its
/// exact source text. The bytes are never modified after capture.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    /// Wraps the provided bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Returns the captured bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of captured bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the payload is empty (absent or `null` on the wire).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the payload and returns the bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    /// Decodes the payload as JSON into a new value of type `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }

    /// Decodes the payload as JSON into `target`.
    ///
    /// `target` is left untouched when decoding fails.
    pub fn decode_into<T: DeserializeOwned>(
        &self,
        target: &mut T,
    ) -> Result<(), serde_json::Error> {
        *target = self.decode()?;
        Ok(())
    }
}

impl fmt::Display for RawPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl AsRef<[u8]> for RawPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for RawPayload {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<String> for RawPayload {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<&str> for RawPayload {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl<'de> Deserialize<'de> for RawPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        let text = raw.get();
        if text.starts_with('"') {
            let unquoted: String = serde_json::from_str(text).map_err(D::Error::custom)?;
            return Ok(Self(unquoted.into_bytes()));
        }
        if text == "null" {
            return Ok(Self::default());
        }
        Ok(Self(text.as_bytes().to_vec()))
    }
}

/// Valid JSON is written verbatim, an empty payload as `null`, anything
/// else as a JSON string. Only meaningful with `serde_json` serializers.
impl Serialize for RawPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0.is_empty() {
            return serializer.serialize_none();
        }
        match serde_json::from_slice::<&RawValue>(&self.0) {
            Ok(raw) => raw.serialize(serializer),
            Err(_) => serializer.serialize_str(&String::from_utf8_lossy(&self.0)),
        }
    }
}
