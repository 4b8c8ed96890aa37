//! Parse command implementation.

use super::name_options;
use crate::{input, output};
use funcbridge_triggers::{AnyTrigger, Trigger, TriggerKind};
use serde_json::Value;

pub fn run(
    kind: TriggerKind,
    input: Option<String>,
    name: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = input::open(input.as_deref())?;
    let trigger = AnyTrigger::decode(kind, reader, name_options(name))
        .map_err(|e| format!("Failed to decode {} trigger: {}", kind, e))?;

    let payload: Value = trigger
        .parse()
        .map_err(|e| format!("Failed to parse payload: {}", e))?;
    println!("{}", output::format_json(&payload, false));
    Ok(())
}
