//! JSON renderer implementation.

use crate::error::{Error, Result};
use serde::Serialize;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Serialize a report (or any other serializable result) to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let rendered = match format {
        JsonFormat::Compact => serde_json::to_string(value),
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
    };
    rendered.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize with the default (pretty) formatting.
pub fn to_json_default<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    to_json(value, JsonFormat::default())
}
