//! Timestamp utilities

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Render a timestamp the way stored records carry it
///
/// RFC 3339, UTC, millisecond precision, `Z` suffix (e.g. `2025-03-01T09:30:00.000Z`).
pub fn to_record_string(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current time as a record timestamp string
pub fn now_string() -> String {
    to_record_string(now())
}
