//! JSONL history loading.
//!
//! The whole history file is read into memory up front, then split into
//! lines that are decoded one at a time into [`Record`] maps.

use std::path::Path;

use grouper_core::models::Record;
use grouper_core::{GrouperError, Result};
use serde_json::Value;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the complete history file at `path`.
///
/// Invalid UTF-8 sequences are replaced with `U+FFFD`, so a corrupted line
/// only fails when it is decoded. A missing or unreadable file is fatal for
/// the run and is reported as [`GrouperError::FileRead`].
pub fn read_history(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|source| GrouperError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode one history line into a record.
///
/// Surrounding whitespace is ignored. Valid JSON that is not an object
/// (`null`, numbers, booleans, strings, arrays) is rejected with
/// [`GrouperError::NotAnObject`] instead of being grouped as an empty or
/// index-keyed record under the fallback buckets.
pub fn parse_line(line: &str) -> Result<Record> {
    match serde_json::from_str::<Value>(line.trim())? {
        Value::Object(map) => Ok(map),
        other => Err(GrouperError::NotAnObject(describe(&other).to_string())),
    }
}

/// Returns `true` for lines that carry no record (empty or whitespace only).
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
