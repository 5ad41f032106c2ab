use regex::{Captures, Regex};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

mod entities;
pub mod timestamp;

pub use entities::Entry;
pub use timestamp::{TimestampError, parse_boundary_timestamp, parse_log_timestamp};

/// Combined log format, optionally followed by a request time given either
/// as a bare decimal or as `rt=<decimal>`.
static LOG_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?P<ip>\S+)\s+\S+\s+\S+\s+\[(?P<ts>[^\]]+)\]\s+"#,
        r#""(?P<method>[A-Z]+)\s+(?P<path>.*?)(?:\s+HTTP/\d\.\d)?"\s+"#,
        r#"(?P<status>\d{3})\s+(?P<bytes>\S+)"#,
        r#"(?:\s+"[^"]*"\s+"[^"]*")?"#,
        r#"(?:\s+(?P<rt>[0-9]+\.[0-9]+)|\s+rt=(?P<rt_kv>[0-9]+\.[0-9]+))?"#,
    ))
    .expect("valid access log regex")
});

/// `rt=<decimal>` anywhere in the line, at line start or after whitespace
static REQUEST_TIME_KV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|\s)rt=(?P<rt>[0-9]+\.[0-9]+)\b").expect("valid request time regex")
});

/// Errors raised while reading a log file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to open log file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read log file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a log file and returns every line that parses, in file order.
///
/// Lines that don't match the grammar are skipped. Invalid UTF-8 is replaced
/// rather than rejected, so one bad byte sequence doesn't abort the file.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<Entry>, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Open {
        path: path.display().to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut line_number = 0usize;
    let mut skipped = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| ParseError::Read {
                path: path.display().to_string(),
                source,
            })?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        match parse_line(line) {
            Some(mut entry) => {
                entry.line_number = line_number;
                entries.push(entry);
            }
            None => skipped += 1,
        }
    }

    tracing::debug!(
        path = %path.display(),
        parsed = entries.len(),
        skipped,
        "read access log"
    );

    Ok(entries)
}

/// Parses a single access-log line.
///
/// Returns `None` when the line doesn't match the grammar or its timestamp
/// or status can't be parsed.
pub fn parse_line(line: &str) -> Option<Entry> {
    let caps = LOG_LINE_RE.captures(line)?;

    let timestamp = parse_log_timestamp(caps.name("ts")?.as_str()).ok()?;
    let status = caps.name("status")?.as_str().parse::<u16>().ok()?;

    let bytes_sent = match caps.name("bytes").map(|m| m.as_str()) {
        Some("-") | None => None,
        Some(raw) => raw.parse::<u64>().ok(),
    };

    let raw_request_time = extract_request_time(&caps, line);
    let request_time_seconds = raw_request_time
        .as_deref()
        .and_then(|raw| raw.parse::<f64>().ok());

    Some(Entry {
        ip: field_or_dash(&caps, "ip"),
        timestamp,
        method: field_or_dash(&caps, "method"),
        path: field_or_dash(&caps, "path").trim().to_string(),
        status,
        bytes_sent,
        request_time_seconds,
        raw_request_time,
        line_number: 0,
    })
}

/// The trailing capture wins; the whole-line `rt=` scan is only a fallback.
fn extract_request_time(caps: &Captures<'_>, line: &str) -> Option<String> {
    caps.name("rt")
        .or_else(|| caps.name("rt_kv"))
        .map(|m| m.as_str().to_string())
        .or_else(|| {
            REQUEST_TIME_KV_RE
                .captures(line)
                .and_then(|kv| kv.name("rt"))
                .map(|m| m.as_str().to_string())
        })
}

fn field_or_dash(caps: &Captures<'_>, name: &str) -> String {
    caps.name(name)
        .map(|m| m.as_str())
        .filter(|value| !value.is_empty())
        .unwrap_or("-")
        .to_string()
}
