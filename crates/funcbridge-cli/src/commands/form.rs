//! Form command implementation.

use super::name_options;
use crate::{input, output};
use funcbridge_triggers::HttpTrigger;

pub fn run(input: Option<String>, name: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let reader = input::open(input.as_deref())?;
    let trigger = HttpTrigger::from_reader_with(reader, name_options(name))
        .map_err(|e| format!("Failed to decode http trigger: {}", e))?;

    let values = trigger.form_data()?;
    println!("{}", output::format_json(&serde_json::to_value(&values)?, false));
    Ok(())
}
