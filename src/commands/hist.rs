use super::build_filter;
use crate::aggregate::{Histogram, HistogramReport, format_histogram_json, format_histogram_text};
use crate::cli::FilterArgs;
use crate::config::AnalyzerConfig;
use crate::errors::AnalyzerError;
use crate::filter::EntryFilter;
use crate::parser::{Entry, read_entries};
use std::io::{self, Write};

/// Buckets the request times of accepted entries.
///
/// In strict mode the first accepted entry without a request time aborts
/// the whole histogram.
pub fn build_histogram(
    entries: &[Entry],
    filter: &EntryFilter,
    bucket_ms: u64,
    strict: bool,
) -> Result<HistogramReport, AnalyzerError> {
    let mut histogram = Histogram::new(bucket_ms);
    let mut total_considered = 0;
    let mut missing = 0;

    for entry in entries.iter().filter(|entry| filter.matches(entry)) {
        total_considered += 1;
        match entry.request_time_seconds {
            Some(seconds) => histogram.record_seconds(seconds),
            None if strict => {
                return Err(AnalyzerError::MissingRequestTime {
                    line_number: entry.line_number,
                });
            }
            None => missing += 1,
        }
    }

    Ok(HistogramReport {
        histogram,
        total_considered,
        missing,
    })
}

pub fn cmd_hist(
    args: &FilterArgs,
    bucket_ms: Option<i64>,
    json: bool,
    strict: bool,
    config: &AnalyzerConfig,
) -> Result<(), AnalyzerError> {
    let filter = build_filter(args)?;
    let bucket_ms = config.effective_bucket_ms(bucket_ms);

    let entries = read_entries(&args.path)?;
    let report = build_histogram(&entries, &filter, bucket_ms, strict)?;
    tracing::info!(
        considered = report.total_considered,
        missing = report.missing,
        bucket_ms,
        "histogram computed"
    );

    write_histogram(&report, json, &mut io::stdout().lock())?;
    Ok(())
}

/// Writes the histogram in the requested format and flushes the writer.
pub fn write_histogram<W: Write>(
    report: &HistogramReport,
    json: bool,
    out: &mut W,
) -> io::Result<()> {
    if json {
        writeln!(out, "{}", format_histogram_json(report))?;
    } else {
        write!(out, "{}", format_histogram_text(report))?;
    }
    out.flush()
}
