//! Command handlers for `stats`, `filter` and `hist`.
//!
//! Each handler builds an [`EntryFilter`] from the shared flags, reads the
//! whole log, and feeds the accepted entries to its aggregation.

mod filter;
mod hist;
mod stats;

pub use filter::{cmd_filter, write_filtered};
pub use hist::{build_histogram, cmd_hist, write_histogram};
pub use stats::{cmd_stats, collect_stats, write_stats};

use crate::cli::FilterArgs;
use crate::errors::AnalyzerError;
use crate::filter::{EntryFilter, StatusPredicate};
use crate::parser::parse_boundary_timestamp;
use chrono::{DateTime, FixedOffset};

/// Builds the entry filter from the shared flags.
///
/// Only an unparsable `--since`/`--until` is an error.
pub fn build_filter(args: &FilterArgs) -> Result<EntryFilter, AnalyzerError> {
    let since = parse_boundary("since", args.since.as_deref())?;
    let until = parse_boundary("until", args.until.as_deref())?;

    let filter = EntryFilter::new()
        .since(since)
        .until(until)
        .with_status(StatusPredicate::parse(args.status.as_deref()))
        .with_path_expression(args.grep.as_deref());

    Ok(filter)
}

/// An empty value counts as no bound.
fn parse_boundary(
    flag: &'static str,
    raw: Option<&str>,
) -> Result<Option<DateTime<FixedOffset>>, AnalyzerError> {
    match raw {
        None | Some("") => Ok(None),
        Some(raw) => parse_boundary_timestamp(raw)
            .map(Some)
            .map_err(|source| AnalyzerError::InvalidBoundary { flag, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(since: Option<&str>, until: Option<&str>) -> FilterArgs {
        FilterArgs {
            path: PathBuf::from("access.log"),
            since: since.map(str::to_string),
            until: until.map(str::to_string),
            status: None,
            grep: None,
        }
    }

    #[test]
    fn test_empty_boundary_is_unbounded() {
        let filter = build_filter(&args(Some(""), None)).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_invalid_boundary_names_flag() {
        let err = build_filter(&args(None, Some("tomorrow"))).unwrap_err();
        match err {
            AnalyzerError::InvalidBoundary { flag, .. } => assert_eq!(flag, "until"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
