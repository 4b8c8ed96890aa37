//! Envelope input selection.

use std::fs::File;
use std::io::{self, Read};

/// Opens the envelope source: the named file, or stdin.
pub fn open(input: Option<&str>) -> Result<Box<dyn Read>, String> {
    match input {
        Some(path) => {
            tracing::debug!(path, "reading envelope from file");
            let file = File::open(path).map_err(|e| format!("Failed to open {}: {}", path, e))?;
            Ok(Box::new(file))
        }
        None => {
            tracing::debug!("reading envelope from stdin");
            Ok(Box::new(io::stdin().lock()))
        }
    }
}
