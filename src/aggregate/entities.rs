use super::Histogram;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Result of the `stats` command. Latencies are kept unrounded; the JSON
/// form rounds them to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    /// Number of accepted entries
    pub total: usize,
    /// Accepted entries per status code
    pub status: BTreeMap<u16, usize>,
    /// Mean request time in milliseconds
    #[serde(serialize_with = "serialize_rounded_ms")]
    pub rt_avg_ms: Option<f64>,
    /// 95th percentile (nearest rank) request time in milliseconds
    #[serde(serialize_with = "serialize_rounded_ms")]
    pub rt_p95_ms: Option<f64>,
    /// 99th percentile (nearest rank) request time in milliseconds
    #[serde(serialize_with = "serialize_rounded_ms")]
    pub rt_p99_ms: Option<f64>,
    /// Most requested paths, most frequent first
    pub top_paths: Vec<(String, usize)>,
}

/// Result of the `hist` command
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramReport {
    pub histogram: Histogram,
    /// Accepted entries, with or without a request time
    pub total_considered: usize,
    /// Accepted entries that had no request time
    pub missing: usize,
}

impl HistogramReport {
    pub fn bucket_ms(&self) -> u64 {
        self.histogram.bucket_ms()
    }
}

/// Serialized as `{"<left>-<right>": count, ...}` in ascending bucket order.
impl Serialize for HistogramReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let buckets: Vec<_> = self.histogram.buckets().collect();
        let mut map = serializer.serialize_map(Some(buckets.len()))?;
        for (left, right, count) in buckets {
            map.serialize_entry(&format!("{left}-{right}"), &count)?;
        }
        map.end()
    }
}

/// Two-decimal value taken from the same correctly rounded decimal the text
/// report prints, so exact ties round to even in both.
fn round_ms(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

fn serialize_rounded_ms<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_f64(round_ms(*v)),
        None => serializer.serialize_none(),
    }
}
