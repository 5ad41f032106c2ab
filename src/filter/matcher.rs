use super::status::StatusPredicate;
use crate::parser::Entry;
use chrono::{DateTime, FixedOffset};
use regex::Regex;

/// Time range, status and path gate applied to every parsed entry
///
/// `since` is inclusive, `until` is exclusive.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    since: Option<DateTime<FixedOffset>>,
    until: Option<DateTime<FixedOffset>>,
    status: StatusPredicate,
    path_pattern: Option<Regex>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn since(mut self, since: Option<DateTime<FixedOffset>>) -> Self {
        self.since = since;
        self
    }

    pub fn until(mut self, until: Option<DateTime<FixedOffset>>) -> Self {
        self.until = until;
        self
    }

    pub fn with_status(mut self, status: StatusPredicate) -> Self {
        self.status = status;
        self
    }

    pub fn with_path_pattern(mut self, pattern: Option<Regex>) -> Self {
        self.path_pattern = pattern;
        self
    }

    /// Compiles `--grep`. An invalid pattern is logged and dropped, so the
    /// path check accepts everything.
    pub fn with_path_expression(self, expr: Option<&str>) -> Self {
        let pattern = expr.and_then(|expr| match Regex::new(expr) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!(pattern = expr, error = %err, "ignoring invalid path pattern");
                None
            }
        });
        self.with_path_pattern(pattern)
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        accept(
            entry,
            self.since.as_ref(),
            self.until.as_ref(),
            &self.status,
            self.path_pattern.as_ref(),
        )
    }

    /// True when no constraint is configured
    pub fn is_empty(&self) -> bool {
        self.since.is_none()
            && self.until.is_none()
            && self.status.is_any()
            && self.path_pattern.is_none()
    }
}

/// Accept/reject test for a single entry.
pub fn accept(
    entry: &Entry,
    since: Option<&DateTime<FixedOffset>>,
    until: Option<&DateTime<FixedOffset>>,
    status: &StatusPredicate,
    path_pattern: Option<&Regex>,
) -> bool {
    if since.is_some_and(|since| entry.timestamp < *since) {
        return false;
    }
    if until.is_some_and(|until| entry.timestamp >= *until) {
        return false;
    }
    if !status.matches(entry.status) {
        return false;
    }
    if path_pattern.is_some_and(|re| !re.is_match(&entry.path)) {
        return false;
    }
    true
}
