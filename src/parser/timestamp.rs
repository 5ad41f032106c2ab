use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Format of the bracketed timestamp in combined-style access logs,
/// e.g. `10/Oct/2023:13:55:36 -0700`.
const LOG_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

const BOUNDARY_WITH_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%z";
const BOUNDARY_NAIVE: &str = "%Y-%m-%dT%H:%M:%S";
const BOUNDARY_DATE: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampError {
    #[error("Malformed log timestamp: '{0}'")]
    MalformedTimestamp(String),

    #[error(
        "Invalid timestamp boundary: '{0}'. Expected YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or YYYY-MM-DDTHH:MM:SS±HH:MM"
    )]
    InvalidBoundary(String),
}

/// Parses the access-log timestamp (`DD/Mon/YYYY:HH:MM:SS ±ZZZZ`).
///
/// The offset is mandatory; the whole string must match.
pub fn parse_log_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    DateTime::parse_from_str(raw, LOG_TIMESTAMP_FORMAT)
        .map_err(|_| TimestampError::MalformedTimestamp(raw.to_string()))
}

/// Parses a `--since`/`--until` value.
///
/// Accepted shapes, tried in order:
/// - `YYYY-MM-DDTHH:MM:SS` followed by `Z`, `±HH:MM` or `±HHMM`
/// - `YYYY-MM-DDTHH:MM:SS` (UTC)
/// - `YYYY-MM-DD` (UTC midnight)
pub fn parse_boundary_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, TimestampError> {
    let normalized = normalize_offset(raw);

    if let Ok(dt) = DateTime::parse_from_str(&normalized, BOUNDARY_WITH_OFFSET) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(&normalized, BOUNDARY_NAIVE) {
        return Ok(naive.and_utc().fixed_offset());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&normalized, BOUNDARY_DATE)
        && let Some(midnight) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(midnight.and_utc().fixed_offset());
    }

    Err(TimestampError::InvalidBoundary(raw.to_string()))
}

/// Rewrites a trailing `Z` to `+0000` and `±HH:MM` to `±HHMM`.
fn normalize_offset(raw: &str) -> String {
    let mut value = match raw.strip_suffix('Z') {
        Some(stripped) => format!("{stripped}+0000"),
        None => raw.to_string(),
    };

    let bytes = value.as_bytes();
    let len = bytes.len();
    if len >= 6 && matches!(bytes[len - 6], b'+' | b'-') && bytes[len - 3] == b':' {
        value.remove(len - 3);
    }

    value
}
