pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod filter;
pub mod logging;
pub mod parser;

use std::io::IsTerminal;

pub use aggregate::{
    Histogram, HistogramReport, PathCounter, StatsReport, StatusTally, histogram, percentile,
    top_paths,
};
pub use cli::{ColorMode, Commands, FilterArgs, cli_parse};
pub use errors::AnalyzerError;
pub use filter::{EntryFilter, StatusPredicate, accept, build_status_predicate};
pub use parser::{
    Entry, ParseError, TimestampError, parse_boundary_timestamp, parse_line, parse_log_timestamp,
    read_entries,
};

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {
            if !std::io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli_parse();
    logging::init_logging(cli.verbose);
    apply_color_mode(cli.color);

    let config = config::load_config(cli.config.as_deref()).map_err(AnalyzerError::from)?;
    if let Some(path) = &cli.config {
        tracing::debug!(config = %path.display(), ?config, "loaded config file");
    }

    match &cli.command {
        Commands::Stats { filters, top, json } => {
            commands::cmd_stats(filters, *top, *json, &config)?;
        }
        Commands::Filter { filters, out } => {
            commands::cmd_filter(filters, out.as_deref())?;
        }
        Commands::Hist {
            filters,
            bucket_ms,
            json,
            strict,
        } => {
            commands::cmd_hist(filters, *bucket_ms, *json, *strict, &config)?;
        }
    }

    Ok(())
}
