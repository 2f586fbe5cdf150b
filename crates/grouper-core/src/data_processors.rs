use serde_json::Value;
use std::cmp::Ordering;

use crate::models::Record;

// ── TimestampProcessor ────────────────────────────────────────────────────────

/// Numeric ordering of the `timestamp` field found in history records.
pub struct TimestampProcessor;

impl TimestampProcessor {
    /// Coerce a `timestamp` value to the number it would contribute to a
    /// numeric subtraction.
    ///
    /// * JSON number  → its value.
    /// * JSON string  → trimmed, then read as a decimal literal (`"42"`,
    ///   `"-1.5e3"`), a signed `Infinity`, or an unsigned `0x`/`0o`/`0b`
    ///   integer. An empty string counts as `0`. Spellings such as `"inf"`,
    ///   `"NaN"` or `"1_000"` are not numbers.
    /// * `null`       → `0`.
    /// * `true`/`false` → `1`/`0`.
    /// * missing, arrays, objects and non-numeric strings → `None` (NaN).
    pub fn sort_key(value: Option<&Value>) -> Option<f64> {
        let n = match value? {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => n.as_f64()?,
            Value::String(s) => parse_numeric_string(s)?,
            Value::Array(_) | Value::Object(_) => return None,
        };
        if n.is_nan() {
            None
        } else {
            Some(n)
        }
    }

    /// Sort key of a record's `timestamp` field.
    pub fn record_key(record: &Record) -> Option<f64> {
        Self::sort_key(record.get("timestamp"))
    }

    /// Total order over sort keys: numeric keys ascending, NaN keys after all
    /// numeric ones and equal to each other.
    pub fn compare_keys(a: Option<f64>, b: Option<f64>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Compare two records by their `timestamp` field.
    pub fn compare(a: &Record, b: &Record) -> Ordering {
        Self::compare_keys(Self::record_key(a), Self::record_key(b))
    }
}

/// Read a string the way a JavaScript `Number()` conversion would.
fn parse_numeric_string(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let unsigned = trimmed.trim_start_matches(&['+', '-'][..]);
    if unsigned == "Infinity" && trimmed.len() - unsigned.len() <= 1 {
        return Some(if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => 16,
        Some("0o" | "0O") => 8,
        Some("0b" | "0B") => 2,
        _ => 10,
    };
    if radix != 10 {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0, |acc: f64, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // `f64::from_str` also accepts "inf", "infinity" and "nan".
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

// ── DataConverter ─────────────────────────────────────────────────────────────

/// Extracts grouping keys from decoded records.
pub struct DataConverter;

impl DataConverter {
    /// Turn a field value into a bucket name, or `fallback` when the value is
    /// absent or falsy (`null`, `false`, `0`, `""`).
    ///
    /// Strings are used verbatim, numbers use their shortest decimal form,
    /// `true` becomes `"true"` and composite values their compact JSON text.
    pub fn bucket_key(value: Option<&Value>, fallback: &str) -> String {
        match value {
            None | Some(Value::Null) | Some(Value::Bool(false)) => fallback.to_string(),
            Some(Value::Bool(true)) => "true".to_string(),
            Some(Value::String(s)) if s.is_empty() => fallback.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match n.as_f64() {
                Some(f) if f == 0.0 => fallback.to_string(),
                Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
                _ => n.to_string(),
            },
            Some(other) => other.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
