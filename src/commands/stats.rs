use super::build_filter;
use crate::aggregate::{StatsCollector, StatsReport, format_stats_json, format_stats_text};
use crate::cli::FilterArgs;
use crate::config::AnalyzerConfig;
use crate::errors::AnalyzerError;
use crate::filter::EntryFilter;
use crate::parser::{Entry, read_entries};
use std::io::{self, Write};

/// Aggregates the accepted entries into a stats report.
pub fn collect_stats(entries: &[Entry], filter: &EntryFilter, top: usize) -> StatsReport {
    let mut collector = StatsCollector::new();
    for entry in entries.iter().filter(|entry| filter.matches(entry)) {
        collector.add(entry);
    }
    collector.finish(top)
}

pub fn cmd_stats(
    args: &FilterArgs,
    top: Option<usize>,
    json: bool,
    config: &AnalyzerConfig,
) -> Result<(), AnalyzerError> {
    let filter = build_filter(args)?;
    let top = config.effective_top(top);

    let entries = read_entries(&args.path)?;
    let report = collect_stats(&entries, &filter, top);
    tracing::info!(accepted = report.total, read = entries.len(), "stats computed");

    write_stats(&report, json, &mut io::stdout().lock())?;
    Ok(())
}

/// Writes the report in the requested format and flushes the writer.
pub fn write_stats<W: Write>(report: &StatsReport, json: bool, out: &mut W) -> io::Result<()> {
    if json {
        writeln!(out, "{}", format_stats_json(report))?;
    } else {
        write!(out, "{}", format_stats_text(report))?;
    }
    out.flush()
}
