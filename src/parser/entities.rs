use chrono::{DateTime, FixedOffset, SecondsFormat};
use std::fmt;

/// One successfully parsed access-log line
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// Client address token, or `-`
    pub ip: String,
    /// Request time as logged, with its original offset
    pub timestamp: DateTime<FixedOffset>,
    /// HTTP method (e.g. "GET"), or `-`
    pub method: String,
    /// Request target with surrounding whitespace trimmed, or `-`
    pub path: String,
    /// Three-digit response status
    pub status: u16,
    /// Response size; `None` for `-` or an unparsable token
    pub bytes_sent: Option<u64>,
    /// Request time in seconds
    pub request_time_seconds: Option<f64>,
    /// Request time exactly as it appeared in the line
    pub raw_request_time: Option<String>,
    /// Source line number in the original file (1-indexed, 0 when not read from a file)
    pub line_number: usize,
}

impl Entry {
    /// Request time converted to milliseconds, without truncation
    pub fn request_time_ms(&self) -> Option<f64> {
        self.request_time_seconds.map(|secs| secs * 1000.0)
    }
}

/// Normalized single-line rendering used by the `filter` command:
/// `timestamp ip method path status bytes [rt=<raw>]`
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} ",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, false),
            self.ip,
            self.method,
            self.path,
            self.status
        )?;
        match self.bytes_sent {
            Some(bytes) => write!(f, "{bytes}")?,
            None => f.write_str("-")?,
        }
        if let Some(raw) = &self.raw_request_time {
            write!(f, " rt={raw}")?;
        }
        Ok(())
    }
}
