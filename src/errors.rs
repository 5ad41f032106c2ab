use crate::config::ConfigError;
use crate::parser::{ParseError, TimestampError};
use thiserror::Error;

/// Exit code for every failure the commands report themselves
pub const EXIT_FAILURE: i32 = 2;

/// Fatal conditions of a single command run
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("invalid --{flag} value: {source}")]
    InvalidBoundary {
        flag: &'static str,
        #[source]
        source: TimestampError,
    },

    #[error(transparent)]
    Input(#[from] ParseError),

    #[error("cannot open --out file '{path}': {source}")]
    OutputOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing request_time in strict mode (line {line_number})")]
    MissingRequestTime { line_number: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AnalyzerError::Write(_) => 1,
            _ => EXIT_FAILURE,
        }
    }
}
