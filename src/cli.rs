use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Analyze nginx/Apache combined-style access logs
#[derive(Parser, Debug)]
#[command(name = "access-log-analyzer", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// TOML file with defaults for --top and --bucket-ms
    #[arg(long, global = true, env = "ACCESS_LOG_ANALYZER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase diagnostic output on stderr (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When to color text reports
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Input file and entry filters shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Access log file to read
    #[arg(long)]
    pub path: PathBuf,

    /// Keep entries at or after this time (YYYY-MM-DD[THH:MM:SS[Z|±HH:MM]])
    #[arg(long)]
    pub since: Option<String>,

    /// Keep entries strictly before this time
    #[arg(long)]
    pub until: Option<String>,

    /// Status filter, e.g. "4xx" or "200,404,5xx"
    #[arg(long)]
    pub status: Option<String>,

    /// Regex searched within the request path
    #[arg(long)]
    pub grep: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show aggregated stats: status breakdown, latency, top paths
    Stats {
        #[command(flatten)]
        filters: FilterArgs,

        /// Number of top paths to show (default 10)
        #[arg(long)]
        top: Option<usize>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Filter and print normalized lines
    Filter {
        #[command(flatten)]
        filters: FilterArgs,

        /// Write lines to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Request time histogram
    Hist {
        #[command(flatten)]
        filters: FilterArgs,

        /// Bucket width in milliseconds (default 100, minimum 1)
        #[arg(long = "bucket-ms", allow_negative_numbers = true)]
        bucket_ms: Option<i64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Fail when an accepted entry has no request time
        #[arg(long)]
        strict: bool,
    },
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_filter_flags() {
        let cli = Cli::try_parse_from([
            "access-log-analyzer",
            "hist",
            "--path",
            "access.log",
            "--status",
            "5xx",
            "--bucket-ms",
            "-5",
            "--strict",
        ])
        .unwrap();

        match cli.command {
            Commands::Hist {
                filters,
                bucket_ms,
                strict,
                json,
            } => {
                assert_eq!(filters.path, PathBuf::from("access.log"));
                assert_eq!(filters.status.as_deref(), Some("5xx"));
                assert_eq!(bucket_ms, Some(-5));
                assert!(strict);
                assert!(!json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_path_is_required() {
        assert!(Cli::try_parse_from(["access-log-analyzer", "stats"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
