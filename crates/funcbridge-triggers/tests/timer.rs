use chrono::{TimeZone, Utc};
use funcbridge_triggers::{AnyTrigger, TimerTrigger, Trigger, TriggerError, TriggerKind};
use serde_json::Value;

const TIMER_ENVELOPE: &str = r#"{
    "Data": {
        "timer": {
            "ScheduleStatus": {
                "Last": "2024-05-01T11:55:00.0139519+02:00",
                "Next": "2024-05-01T12:00:00+00:00",
                "LastUpdated": "2024-05-01T11:55:01Z"
            },
            "Schedule": {"AdjustForDST": true},
            "IsPastDue": true
        }
    },
    "Metadata": {
        "sys": {"MethodName": "cleanup", "UtcNow": "2024-05-01T12:00:00Z", "RandGuid": "a1"}
    }
}"#;

#[test]
fn maps_schedule_fields() {
    let trigger = TimerTrigger::from_reader(TIMER_ENVELOPE.as_bytes()).unwrap();

    assert!(trigger.is_past_due);
    assert!(trigger.schedule.adjust_for_dst);
    assert_eq!(
        trigger.schedule_status.next,
        Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    );
    let last = trigger.schedule_status.last.unwrap();
    assert_eq!(last.format("%H:%M").to_string(), "09:55");
    assert!(trigger.schedule_status.last_updated.is_some());
    assert_eq!(trigger.metadata.sys.method_name, "cleanup");
}

#[test]
fn parse_and_data_are_trivial() {
    let trigger = TimerTrigger::from_reader(TIMER_ENVELOPE.as_bytes()).unwrap();

    let mut target = Value::String("untouched".into());
    trigger.parse_into(&mut target).unwrap();
    assert_eq!(target, Value::String("untouched".into()));
    assert!(trigger.data().is_none());
    assert_eq!(trigger.kind(), TriggerKind::Timer);
}

#[test]
fn null_schedule_status_decodes_to_defaults() {
    let input = br#"{"Data":{"timer":{"ScheduleStatus":null,"IsPastDue":false}},"Metadata":{}}"#;
    let trigger = TimerTrigger::from_reader(&input[..]).unwrap();
    assert!(trigger.schedule_status.last.is_none());
    assert!(!trigger.schedule.adjust_for_dst);
}

#[test]
fn truncated_envelope_is_malformed() {
    let truncated = &TIMER_ENVELOPE.as_bytes()[..40];
    assert!(matches!(
        TimerTrigger::from_reader(truncated),
        Err(TriggerError::PayloadMalformed(_))
    ));
}

#[test]
fn wrong_field_type_is_malformed() {
    let input = br#"{"Data":{"timer":{"IsPastDue":"yes"}},"Metadata":{}}"#;
    assert!(matches!(
        TimerTrigger::from_reader(&input[..]),
        Err(TriggerError::PayloadMalformed(_))
    ));
}

#[test]
fn any_trigger_delegates_to_timer() {
    let trigger =
        AnyTrigger::decode(TriggerKind::Timer, TIMER_ENVELOPE.as_bytes(), std::iter::empty())
            .unwrap();
    assert_eq!(trigger.kind(), TriggerKind::Timer);
    assert!(trigger.data().is_none());
    match trigger {
        AnyTrigger::Timer(timer) => assert!(timer.is_past_due),
        other => panic!("unexpected trigger: {:?}", other),
    }
}
