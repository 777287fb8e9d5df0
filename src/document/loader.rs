//! Parsing raw file content into document scopes.
//!
//! Ingestion hands over the fully read file as a string. Text is split into
//! display lines; JSON Lines content yields one record per non-blank line,
//! and a whole-file JSON array yields one record per element. Any malformed
//! record aborts the load.

use serde_json::Value;

use crate::error::DocumentError;

/// Split text content into display lines.
///
/// Only `\n` separates lines; everything else, including a trailing `\r`,
/// stays part of the line so that rendered output reproduces the input.
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.split('\n').map(str::to_string).collect()
}

/// Parse JSON Lines content, one record per non-blank line.
pub fn parse_json_lines(raw: &str) -> Result<Vec<Value>, DocumentError> {
    let mut records = Vec::new();

    for (i, line) in raw.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record =
            serde_json::from_str::<Value>(line).map_err(|e| DocumentError::parse(i + 1, e))?;
        records.push(record);
    }

    log::debug!("Parsed {} JSON Lines records", records.len());
    Ok(records)
}

/// Parse a whole-file JSON array, one record per element.
pub fn parse_json_array(raw: &str) -> Result<Vec<Value>, DocumentError> {
    let value = serde_json::from_str::<Value>(raw).map_err(|e| DocumentError::parse(e.line(), e))?;

    match value {
        Value::Array(records) => {
            log::debug!("Parsed JSON array with {} records", records.len());
            Ok(records)
        }
        other => Err(DocumentError::NotAnArray {
            found: value_kind(&other),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Canonical display form of a record: keys sorted, two-space indentation.
///
/// `serde_json`'s default map is ordered by key, so pretty printing the same
/// value always produces the same string.
pub fn canonical_record(record: &Value) -> String {
    match serde_json::to_string_pretty(record) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Failed to pretty-print record, using compact form: {}", e);
            record.to_string()
        }
    }
}
