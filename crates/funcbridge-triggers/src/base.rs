use crate::envelope::decode_envelope;
use crate::errors::TriggerError;
use crate::options::{TriggerOption, TriggerOptions};
use crate::trigger::{Trigger, TriggerKind};
use funcbridge_data::RawPayload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Read;

/// A trigger of a kind without a dedicated model (queue, blob, event, ...).
///
/// The payload is kept as raw bytes and the metadata as plain JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaseTrigger {
    /// Name of the `Data` member the payload came from.
    pub name: String,
    /// Payload bytes as received.
    pub payload: RawPayload,
    /// Invocation metadata, untyped.
    pub metadata: Map<String, Value>,
}

impl BaseTrigger {
    /// Decodes a generic trigger from the host envelope in `reader`.
    ///
    /// Without [`with_name`](crate::with_name) the `Data` object must hold
    /// exactly one member.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TriggerError> {
        Self::from_reader_with(reader, std::iter::empty())
    }

    /// Like [`BaseTrigger::from_reader`], applying `options` first.
    pub fn from_reader_with<R: Read>(
        reader: R,
        options: impl IntoIterator<Item = TriggerOption>,
    ) -> Result<Self, TriggerError> {
        let opts = TriggerOptions::new(options);
        let decoded =
            decode_envelope::<_, RawPayload, Map<String, Value>>(reader, opts.name.as_deref())?;

        tracing::debug!(
            kind = %TriggerKind::Base,
            name = %decoded.key,
            payload_len = decoded.payload.len(),
            "decoded trigger"
        );

        Ok(BaseTrigger {
            name: decoded.key,
            payload: decoded.payload,
            metadata: decoded.metadata,
        })
    }
}

impl Trigger for BaseTrigger {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Base
    }

    fn parse_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<(), serde_json::Error> {
        self.payload.decode_into(target)
    }

    fn data(&self) -> Option<&RawPayload> {
        Some(&self.payload)
    }
}
