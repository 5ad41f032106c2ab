mod display;
mod entities;

pub use display::{
    format_histogram_json, format_histogram_text, format_stats_json, format_stats_text,
};
pub use entities::{HistogramReport, StatsReport};

use crate::parser::Entry;
use std::collections::{BTreeMap, HashMap};

/// Number of paths reported when no positive limit is given
pub const DEFAULT_TOP_PATHS: usize = 10;

/// Nearest-rank percentile.
///
/// Rank is `clamp(round(p / 100 * n), 1, n)` with ties rounded to even;
/// no interpolation between samples.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let rank = (p / 100.0 * n as f64).round_ties_even();
    let k = if rank.is_nan() || rank < 1.0 {
        1
    } else {
        (rank as usize).min(n)
    };
    Some(sorted[k - 1])
}

/// Arithmetic mean, `None` for no samples
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Bucket of a latency: the value is truncated to whole milliseconds first.
///
/// `u128` keeps request times past `u64::MAX` ms exact; larger values saturate.
pub fn bucket_index(value_ms: f64, bucket_ms: u64) -> u128 {
    (value_ms as u128) / u128::from(bucket_ms.max(1))
}

/// Buckets latencies given in milliseconds.
pub fn histogram(values_ms: &[f64], bucket_ms: u64) -> Histogram {
    let mut hist = Histogram::new(bucket_ms);
    for value in values_ms {
        hist.record_ms(*value);
    }
    hist
}

/// Sparse fixed-width latency histogram
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bucket_ms: u64,
    bins: BTreeMap<u128, usize>,
}

impl Histogram {
    /// Widths below 1 ms are raised to 1.
    pub fn new(bucket_ms: u64) -> Self {
        Self {
            bucket_ms: bucket_ms.max(1),
            bins: BTreeMap::new(),
        }
    }

    pub fn bucket_ms(&self) -> u64 {
        self.bucket_ms
    }

    pub fn record_ms(&mut self, value_ms: f64) {
        *self
            .bins
            .entry(bucket_index(value_ms, self.bucket_ms))
            .or_insert(0) += 1;
    }

    pub fn record_seconds(&mut self, seconds: f64) {
        self.record_ms(seconds * 1000.0);
    }

    pub fn count(&self, index: u128) -> usize {
        self.bins.get(&index).copied().unwrap_or(0)
    }

    /// Total number of recorded samples
    pub fn samples(&self) -> usize {
        self.bins.values().sum()
    }

    /// `(left_ms, right_ms, count)` for every non-empty bucket, ascending
    pub fn buckets(&self) -> impl Iterator<Item = (u128, u128, usize)> + '_ {
        let width = u128::from(self.bucket_ms);
        self.bins
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(move |(index, count)| {
                let left = index.saturating_mul(width);
                (left, left.saturating_add(width), *count)
            })
    }
}

/// Request counts per path, remembering first-seen order for ties
#[derive(Debug, Clone, Default)]
pub struct PathCounter {
    order: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl PathCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &str) {
        match self.index.get(path) {
            Some(&slot) => self.order[slot].1 += 1,
            None => {
                self.index.insert(path.to_string(), self.order.len());
                self.order.push((path.to_string(), 1));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// See [`top_paths`]
    pub fn top(&self, limit: usize) -> Vec<(String, usize)> {
        top_paths(&self.order, limit)
    }
}

/// Sorts by count descending, keeping input order among equal counts, and
/// keeps the first `limit` pairs. A limit of 0 means [`DEFAULT_TOP_PATHS`].
pub fn top_paths(counts: &[(String, usize)], limit: usize) -> Vec<(String, usize)> {
    let limit = if limit == 0 { DEFAULT_TOP_PATHS } else { limit };
    let mut ranked = counts.to_vec();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(limit);
    ranked
}

/// Exact count per status code, iterated in ascending code order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    counts: BTreeMap<u16, usize>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, status: u16) {
        *self.counts.entry(status).or_insert(0) += 1;
    }

    pub fn get(&self, status: u16) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.counts.iter().map(|(code, count)| (*code, *count))
    }

    pub fn into_map(self) -> BTreeMap<u16, usize> {
        self.counts
    }
}

/// Running state of the `stats` command
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    total: usize,
    status: StatusTally,
    paths: PathCounter,
    latencies_ms: Vec<f64>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: &Entry) {
        self.total += 1;
        self.status.add(entry.status);
        self.paths.add(&entry.path);
        if let Some(ms) = entry.request_time_ms() {
            self.latencies_ms.push(ms);
        }
    }

    pub fn finish(self, top: usize) -> StatsReport {
        StatsReport {
            total: self.total,
            rt_avg_ms: mean(&self.latencies_ms),
            rt_p95_ms: percentile(&self.latencies_ms, 95.0),
            rt_p99_ms: percentile(&self.latencies_ms, 99.0),
            top_paths: self.paths.top(top),
            status: self.status.into_map(),
        }
    }
}
