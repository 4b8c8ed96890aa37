//! Decode command implementation.

use super::name_options;
use crate::{input, output};
use funcbridge_triggers::{AnyTrigger, TriggerKind};

pub fn run(
    kind: TriggerKind,
    input: Option<String>,
    name: Option<String>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let reader = input::open(input.as_deref())?;
    let trigger = AnyTrigger::decode(kind, reader, name_options(name))
        .map_err(|e| format!("Failed to decode {} trigger: {}", kind, e))?;

    let value = serde_json::to_value(&trigger)?;
    println!("{}", output::format_json(&value, compact));
    Ok(())
}
