pub mod decode;
pub mod form;
pub mod parse;

use funcbridge_triggers::{with_name, TriggerOption};

/// Turns an optional `--name` into trigger options.
pub(crate) fn name_options(name: Option<String>) -> Vec<TriggerOption> {
    name.into_iter().map(with_name).collect()
}
