//! Timer trigger.
//!
//! Wire to model mapping for the `timer` payload:
//!
//! | Wire field             | Field                              |
//! |------------------------|------------------------------------|
//! | `timer.ScheduleStatus` | [`TimerTrigger::schedule_status`]  |
//! | `timer.Schedule`       | [`TimerTrigger::schedule`]         |
//! | `timer.IsPastDue`      | [`TimerTrigger::is_past_due`]      |
//! | `Metadata`             | [`TimerTrigger::metadata`]         |

use crate::envelope::{decode_envelope, null_as_default};
use crate::errors::TriggerError;
use crate::metadata::Metadata;
use crate::options::{TriggerOption, TriggerOptions};
use crate::trigger::{Trigger, TriggerKind};
use chrono::{DateTime, Utc};
use funcbridge_data::RawPayload;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Read;

/// A timer trigger.
///
/// Timers carry no caller payload: [`Trigger::data`] is always `None` and
/// [`Trigger::parse_into`] never touches its target. Read the schedule
/// fields directly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimerTrigger {
    /// Last, next and last-updated fire times.
    pub schedule_status: TimerScheduleStatus,
    /// Schedule settings.
    pub schedule: TimerSchedule,
    /// Whether this invocation fired later than scheduled.
    pub is_past_due: bool,
    /// Invocation metadata.
    pub metadata: Metadata,
}

/// The `Schedule` member of a timer payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSchedule {
    /// Whether the schedule adjusts for daylight saving time.
    #[serde(rename = "AdjustForDST", default, deserialize_with = "null_as_default")]
    pub adjust_for_dst: bool,
}

/// The `ScheduleStatus` member of a timer payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerScheduleStatus {
    /// Previous fire time.
    #[serde(rename = "Last", default)]
    pub last: Option<DateTime<Utc>>,
    /// Next scheduled fire time.
    #[serde(rename = "Next", default)]
    pub next: Option<DateTime<Utc>>,
    /// When the status was last updated.
    #[serde(rename = "LastUpdated", default)]
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct TimerPayload {
    #[serde(rename = "ScheduleStatus", default, deserialize_with = "null_as_default")]
    schedule_status: TimerScheduleStatus,
    #[serde(rename = "Schedule", default, deserialize_with = "null_as_default")]
    schedule: TimerSchedule,
    #[serde(rename = "IsPastDue", default, deserialize_with = "null_as_default")]
    is_past_due: bool,
}

impl TimerTrigger {
    /// Default binding name of a timer trigger.
    pub const DEFAULT_NAME: &'static str = "timer";

    /// Decodes a timer trigger from the host envelope in `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`TriggerError::PayloadMalformed`] if the envelope is not
    /// valid JSON or has no `Data.timer` member.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TriggerError> {
        Self::from_reader_with(reader, std::iter::empty())
    }

    /// Like [`TimerTrigger::from_reader`], applying `options` first.
    pub fn from_reader_with<R: Read>(
        reader: R,
        options: impl IntoIterator<Item = TriggerOption>,
    ) -> Result<Self, TriggerError> {
        let opts = TriggerOptions::new(options);
        let decoded = decode_envelope::<_, TimerPayload, Metadata>(
            reader,
            Some(opts.key_or(Self::DEFAULT_NAME)),
        )?;
        let timer = decoded.payload;

        tracing::debug!(
            kind = %TriggerKind::Timer,
            name = %decoded.key,
            is_past_due = timer.is_past_due,
            "decoded trigger"
        );

        Ok(TimerTrigger {
            schedule_status: timer.schedule_status,
            schedule: timer.schedule,
            is_past_due: timer.is_past_due,
            metadata: decoded.metadata,
        })
    }
}

impl Trigger for TimerTrigger {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Timer
    }

    fn parse_into<T: DeserializeOwned>(&self, _target: &mut T) -> Result<(), serde_json::Error> {
        Ok(())
    }

    fn data(&self) -> Option<&RawPayload> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_never_touches_target() {
        let timer = TimerTrigger {
            is_past_due: true,
            ..Default::default()
        };
        let mut target = String::from("kept");
        timer.parse_into(&mut target).unwrap();
        assert_eq!(target, "kept");
        assert!(timer.data().is_none());
        assert_eq!(timer.parse::<Vec<u8>>().unwrap(), Vec::<u8>::new());
    }
}
