use chrono::{DateTime, SecondsFormat, Utc};

/// Format `date` as an ISO 8601 UTC string with millisecond precision,
/// e.g. `2024-01-15T00:00:00.000Z`.
///
/// A missing date formats the current time instead.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use grouper_core::time_utils::format_timestamp;
///
/// let date = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
/// assert_eq!(format_timestamp(Some(date)), "2024-01-15T00:00:00.000Z");
/// ```
pub fn format_timestamp(date: Option<DateTime<Utc>>) -> String {
    date.unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}
