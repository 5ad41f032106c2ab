use super::build_filter;
use crate::cli::FilterArgs;
use crate::errors::AnalyzerError;
use crate::filter::EntryFilter;
use crate::parser::{Entry, read_entries};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes one normalized line per accepted entry and returns how many were written.
pub fn write_filtered<W: Write>(
    entries: &[Entry],
    filter: &EntryFilter,
    out: &mut W,
) -> io::Result<usize> {
    let mut written = 0;
    for entry in entries.iter().filter(|entry| filter.matches(entry)) {
        writeln!(out, "{entry}")?;
        written += 1;
    }
    Ok(written)
}

pub fn cmd_filter(args: &FilterArgs, out_path: Option<&Path>) -> Result<(), AnalyzerError> {
    let filter = build_filter(args)?;

    // The output file is created before the input is touched.
    let mut out: Box<dyn Write> = match out_path {
        Some(path) => {
            let file = File::create(path).map_err(|source| AnalyzerError::OutputOpen {
                path: path.display().to_string(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let entries = read_entries(&args.path)?;
    let written = write_filtered(&entries, &filter, &mut out)?;
    out.flush()?;

    tracing::info!(accepted = written, read = entries.len(), "filter finished");
    Ok(())
}
