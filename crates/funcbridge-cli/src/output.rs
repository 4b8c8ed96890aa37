//! Output formatting utilities.

use serde_json::Value;

/// Formats a value as JSON, pretty unless `compact` is set.
pub fn format_json(value: &Value, compact: bool) -> String {
    let formatted = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    formatted.unwrap_or_else(|_| "{}".to_string())
}
