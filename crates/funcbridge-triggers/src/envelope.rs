//! Generic envelope decoding.
//!
//! The host wraps every invocation as
//! `{"Data": {"<kind>": <payload>}, "Metadata": {...}}`. The decoder reads
//! the stream once, checks that shape, and decodes the selected payload and
//! the metadata into caller-chosen types.

use crate::errors::TriggerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::value::RawValue;
use std::collections::BTreeMap;
use std::io::Read;

#[derive(Deserialize)]
#[serde(bound(deserialize = "M: DeserializeOwned + Default"))]
struct Envelope<M> {
    #[serde(rename = "Data")]
    data: BTreeMap<String, Box<RawValue>>,
    #[serde(rename = "Metadata", default, deserialize_with = "null_as_default")]
    metadata: M,
}

/// Payload and metadata extracted from one envelope.
#[derive(Debug)]
pub struct Decoded<P, M> {
    /// Name of the `Data` member the payload was taken from.
    pub key: String,
    /// Decoded payload.
    pub payload: P,
    /// Decoded metadata.
    pub metadata: M,
}

/// Reads `reader` to completion and decodes the envelope it contains.
///
/// The payload is taken from `Data.<key>`. When `key` is `None` the `Data`
/// object must hold exactly one member, which is used. An absent or `null`
/// `Metadata` decodes to `M::default()`.
///
/// The reader is consumed and dropped on every path.
///
/// # Errors
///
/// Returns [`TriggerError::PayloadMalformed`] if reading fails, the bytes are
/// not a single JSON document of the expected shape, the payload member is
/// missing, or the payload or metadata do not decode into `P` and `M`.
pub fn decode_envelope<R, P, M>(reader: R, key: Option<&str>) -> Result<Decoded<P, M>, TriggerError>
where
    R: Read,
    P: DeserializeOwned,
    M: DeserializeOwned + Default,
{
    let bytes = read_all(reader)?;
    let envelope: Envelope<M> =
        serde_json::from_slice(&bytes).map_err(TriggerError::PayloadMalformed)?;

    let (key, raw) = match key {
        Some(key) => {
            let raw = envelope
                .data
                .get(key)
                .ok_or_else(|| TriggerError::malformed(format!("missing Data.{key}")))?;
            (key.to_string(), raw)
        }
        None => {
            let mut members = envelope.data.iter();
            match (members.next(), members.next()) {
                (Some((key, raw)), None) => (key.clone(), raw),
                _ => {
                    return Err(TriggerError::malformed(format!(
                        "expected exactly one Data member, found {}",
                        envelope.data.len()
                    )))
                }
            }
        }
    };

    let payload = serde_json::from_str(raw.get()).map_err(TriggerError::PayloadMalformed)?;
    tracing::trace!(key = %key, payload_len = raw.get().len(), "decoded envelope");

    Ok(Decoded {
        key,
        payload,
        metadata: envelope.metadata,
    })
}

fn read_all<R: Read>(mut reader: R) -> Result<Vec<u8>, TriggerError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| TriggerError::PayloadMalformed(serde_json::Error::io(e)))?;
    tracing::trace!(len = bytes.len(), "read envelope stream");
    Ok(bytes)
}

/// Treats an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value};
    use std::cell::Cell;
    use std::io;
    use std::rc::Rc;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "host went away"))
        }
    }

    /// Yields `prefix`, then fails.
    struct InterruptedReader {
        prefix: &'static [u8],
    }

    impl Read for InterruptedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.prefix.is_empty() {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream cut"));
            }
            self.prefix.read(buf)
        }
    }

    /// Records when it is dropped.
    struct TrackedReader {
        inner: &'static [u8],
        dropped: Rc<Cell<bool>>,
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    #[test]
    fn selects_named_member() {
        let input = br#"{"Data":{"a":1,"b":2},"Metadata":{"k":"v"}}"#;
        let decoded: Decoded<u32, Map<String, Value>> =
            decode_envelope(&input[..], Some("b")).unwrap();
        assert_eq!(decoded.key, "b");
        assert_eq!(decoded.payload, 2);
        assert_eq!(decoded.metadata["k"], "v");
    }

    #[test]
    fn single_member_is_used_without_key() {
        let input = br#"{"Data":{"only":"x"}}"#;
        let decoded: Decoded<String, Map<String, Value>> =
            decode_envelope(&input[..], None).unwrap();
        assert_eq!(decoded.key, "only");
        assert!(decoded.metadata.is_empty());
    }

    #[test]
    fn ambiguous_data_without_key_is_malformed() {
        let input = br#"{"Data":{"a":1,"b":2}}"#;
        let result: Result<Decoded<u32, Map<String, Value>>, _> = decode_envelope(&input[..], None);
        assert!(matches!(result, Err(TriggerError::PayloadMalformed(_))));
    }

    #[test]
    fn missing_member_is_malformed() {
        let input = br#"{"Data":{"a":1},"Metadata":null}"#;
        let result: Result<Decoded<u32, Map<String, Value>>, _> =
            decode_envelope(&input[..], Some("req"));
        assert!(matches!(result, Err(TriggerError::PayloadMalformed(_))));
    }

    #[test]
    fn read_failure_is_malformed() {
        let result: Result<Decoded<Value, Map<String, Value>>, _> =
            decode_envelope(FailingReader, Some("req"));
        match result {
            Err(TriggerError::PayloadMalformed(err)) => assert!(err.is_io()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn failure_after_partial_read_is_malformed() {
        let reader = InterruptedReader {
            prefix: br#"{"Data":{"req":"#,
        };
        let result: Result<Decoded<Value, Map<String, Value>>, _> =
            decode_envelope(reader, Some("req"));
        match result {
            Err(TriggerError::PayloadMalformed(err)) => assert!(err.is_io()),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn reader_is_released_after_decode_failure() {
        let dropped = Rc::new(Cell::new(false));
        let reader = TrackedReader {
            inner: br#"{"Data":"#,
            dropped: Rc::clone(&dropped),
        };
        let result: Result<Decoded<Value, Map<String, Value>>, _> =
            decode_envelope(reader, Some("req"));
        assert!(matches!(result, Err(TriggerError::PayloadMalformed(_))));
        assert!(dropped.get());
    }

    #[test]
    fn reader_is_released_after_success() {
        let dropped = Rc::new(Cell::new(false));
        let reader = TrackedReader {
            inner: br#"{"Data":{"req":1}}"#,
            dropped: Rc::clone(&dropped),
        };
        let result: Result<Decoded<u32, Map<String, Value>>, _> =
            decode_envelope(reader, Some("req"));
        assert_eq!(result.unwrap().payload, 1);
        assert!(dropped.get());
    }

    #[test]
    fn trailing_garbage_is_malformed() {
        let input = br#"{"Data":{"a":1}} extra"#;
        let result: Result<Decoded<u32, Map<String, Value>>, _> =
            decode_envelope(&input[..], Some("a"));
        assert!(matches!(result, Err(TriggerError::PayloadMalformed(_))));
    }
}
