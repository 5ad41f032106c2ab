use crate::aggregate::DEFAULT_TOP_PATHS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;

/// Histogram bucket width used when neither flag nor config sets one
pub const DEFAULT_BUCKET_MS: i64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Defaults for command flags, loaded from an optional TOML file.
///
/// ```toml
/// [stats]
/// top = 20
///
/// [hist]
/// bucket_ms = 250
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub stats: StatsDefaults,
    pub hist: HistDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsDefaults {
    pub top: usize,
}

impl Default for StatsDefaults {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP_PATHS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistDefaults {
    pub bucket_ms: i64,
}

impl Default for HistDefaults {
    fn default() -> Self {
        Self {
            bucket_ms: DEFAULT_BUCKET_MS,
        }
    }
}

impl AnalyzerConfig {
    /// `--top` wins over the config; 0 from either source means the default.
    pub fn effective_top(&self, flag: Option<usize>) -> usize {
        match flag.unwrap_or(self.stats.top) {
            0 => DEFAULT_TOP_PATHS,
            top => top,
        }
    }

    /// `--bucket-ms` wins over the config; the result is at least 1.
    pub fn effective_bucket_ms(&self, flag: Option<i64>) -> u64 {
        flag.unwrap_or(self.hist.bucket_ms).max(1).unsigned_abs()
    }
}

pub fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig, ConfigError> {
    if let Some(path) = path {
        load_config_from_path(path)
    } else {
        Ok(default_config().clone())
    }
}

pub fn load_config_from_path(path: &Path) -> Result<AnalyzerConfig, ConfigError> {
    let path_display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path_display.clone(),
        source,
    })?;

    toml::from_str::<AnalyzerConfig>(&raw).map_err(|source| ConfigError::Parse {
        path: path_display,
        source,
    })
}

pub fn default_config() -> &'static AnalyzerConfig {
    static DEFAULT_CONFIG: LazyLock<AnalyzerConfig> = LazyLock::new(AnalyzerConfig::default);
    &DEFAULT_CONFIG
}
