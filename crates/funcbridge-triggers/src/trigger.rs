use crate::base::BaseTrigger;
use crate::errors::TriggerError;
use crate::http::HttpTrigger;
use crate::options::TriggerOption;
use crate::timer::TimerTrigger;
use funcbridge_data::RawPayload;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::io::Read;

/// Read interface shared by every trigger kind.
pub trait Trigger {
    /// Kind of this trigger.
    fn kind(&self) -> TriggerKind;

    /// Decodes the trigger payload into `target`.
    ///
    /// Decode failures are returned unchanged. Kinds without a payload
    /// succeed without touching `target`.
    fn parse_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<(), serde_json::Error>;

    /// The payload bytes as received, or `None` for kinds without a payload.
    fn data(&self) -> Option<&RawPayload>;

    /// Decodes the payload into a fresh `T`, starting from `T::default()`.
    fn parse<T: DeserializeOwned + Default>(&self) -> Result<T, serde_json::Error> {
        let mut target = T::default();
        self.parse_into(&mut target)?;
        Ok(target)
    }
}

/// Known trigger kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriggerKind {
    /// HTTP request trigger.
    Http,
    /// Timer (schedule) trigger.
    Timer,
    /// Any other kind, decoded generically.
    Base,
}

impl TriggerKind {
    /// Default `Data` member name for this kind, if it has one.
    pub fn default_name(self) -> Option<&'static str> {
        match self {
            TriggerKind::Http => Some(HttpTrigger::DEFAULT_NAME),
            TriggerKind::Timer => Some(TimerTrigger::DEFAULT_NAME),
            TriggerKind::Base => None,
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerKind::Http => write!(f, "http"),
            TriggerKind::Timer => write!(f, "timer"),
            TriggerKind::Base => write!(f, "base"),
        }
    }
}

/// A decoded trigger of any known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnyTrigger {
    /// HTTP trigger.
    Http(HttpTrigger),
    /// Timer trigger.
    Timer(TimerTrigger),
    /// Generic trigger.
    Base(BaseTrigger),
}

impl AnyTrigger {
    /// Decodes an envelope as the given kind.
    pub fn decode<R: Read>(
        kind: TriggerKind,
        reader: R,
        options: impl IntoIterator<Item = TriggerOption>,
    ) -> Result<Self, TriggerError> {
        Ok(match kind {
            TriggerKind::Http => AnyTrigger::Http(HttpTrigger::from_reader_with(reader, options)?),
            TriggerKind::Timer => {
                AnyTrigger::Timer(TimerTrigger::from_reader_with(reader, options)?)
            }
            TriggerKind::Base => AnyTrigger::Base(BaseTrigger::from_reader_with(reader, options)?),
        })
    }
}

impl Trigger for AnyTrigger {
    fn kind(&self) -> TriggerKind {
        match self {
            AnyTrigger::Http(t) => t.kind(),
            AnyTrigger::Timer(t) => t.kind(),
            AnyTrigger::Base(t) => t.kind(),
        }
    }

    fn parse_into<T: DeserializeOwned>(&self, target: &mut T) -> Result<(), serde_json::Error> {
        match self {
            AnyTrigger::Http(t) => t.parse_into(target),
            AnyTrigger::Timer(t) => t.parse_into(target),
            AnyTrigger::Base(t) => t.parse_into(target),
        }
    }

    fn data(&self) -> Option<&RawPayload> {
        match self {
            AnyTrigger::Http(t) => t.data(),
            AnyTrigger::Timer(t) => t.data(),
            AnyTrigger::Base(t) => t.data(),
        }
    }
}

impl From<HttpTrigger> for AnyTrigger {
    fn from(value: HttpTrigger) -> Self {
        AnyTrigger::Http(value)
    }
}

impl From<TimerTrigger> for AnyTrigger {
    fn from(value: TimerTrigger) -> Self {
        AnyTrigger::Timer(value)
    }
}

impl From<BaseTrigger> for AnyTrigger {
    fn from(value: BaseTrigger) -> Self {
        AnyTrigger::Base(value)
    }
}
