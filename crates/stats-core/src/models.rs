use std::fmt;

use serde::{Deserialize, Serialize};

/// A single `(key, value)` measurement extracted from one input line.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<K> {
    /// Grouping label for the measurement.
    pub key: K,
    /// The measured value. Always finite once produced by an extractor.
    pub value: f64,
}

impl<K> Observation<K> {
    pub fn new(key: K, value: f64) -> Self {
        Self { key, value }
    }
}

/// Two-level grouping key: a named event plus a numeric bucket such as a
/// batch size.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompoundKey {
    /// Event label, taken from the `message` field.
    pub outer: String,
    /// Numeric bucket, taken from the `items` field.
    pub inner: u64,
}

impl CompoundKey {
    pub fn new(outer: impl Into<String>, inner: u64) -> Self {
        Self {
            outer: outer.into(),
            inner,
        }
    }
}

/// Key column of a delimited line.
///
/// Integer-looking keys (batch sizes, thread counts) order numerically and
/// come before any text key; text keys order lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Int(i64),
    Text(String),
}

impl GroupKey {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => GroupKey::Int(n),
            Err(_) => GroupKey::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Int(n) => write!(f, "{}", n),
            GroupKey::Text(s) => f.write_str(s),
        }
    }
}

/// The structured fragment a benchmark emits at the end of each log line.
///
/// Only `items` and `time/item` are mandatory; `message` is required by the
/// per-event report and `time` by the latency dump, and each caller checks
/// for its own field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchRecord {
    /// Name of the benchmarked event.
    #[serde(default)]
    pub message: Option<String>,
    /// Number of items processed by the measured operation.
    pub items: u64,
    /// Wall-clock time of the whole operation.
    #[serde(default)]
    pub time: Option<f64>,
    /// Time divided by `items`.
    #[serde(rename = "time/item")]
    pub time_per_item: f64,
}

/// One row of the raw latency dump: `time, items, time_per_item`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatencyRow {
    pub time: f64,
    pub items: u64,
    pub time_per_item: f64,
}

/// Running accumulators for one key.
///
/// Never stored with `count == 0`: aggregators create a state on the first
/// observation for its key.
#[derive(Debug, Clone, PartialEq)]
pub struct RunningState {
    pub count: u64,
    pub sum: f64,
    pub sum_squares: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for RunningState {
    fn default() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            sum_squares: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl RunningState {
    /// Fold one value into the accumulators.
    pub fn observe(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "observed non-finite value {value}");
        self.count += 1;
        self.sum += value;
        self.sum_squares += value * value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    /// Combine the accumulators of `other` into `self`.
    ///
    /// Equivalent to observing every value `other` saw, up to floating-point
    /// summation order.
    pub fn merge(&mut self, other: &RunningState) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Finalized statistics for one key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: u64,
    pub mean: f64,
    /// Population standard deviation (no Bessel correction).
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}
