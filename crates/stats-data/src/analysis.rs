//! Analysis pipelines for bench-stats.
//!
//! Each pipeline drains an [`Extracted`] stream into its aggregate and
//! returns the finalized result together with run metadata. A malformed
//! line aborts the pipeline with its error; no partial result is returned.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::time::Instant;

use stats_core::error::Result;
use stats_core::models::{GroupKey, LatencyRow, Summary};
use tracing::{debug, info};

use crate::aggregator::{CompoundAggregator, RunningAggregator};
use crate::reader::{
    parse_compound_line, parse_delimited_line, parse_latency_line, DelimitedFormat, Extracted,
};

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside every analysis result.
#[derive(Debug, Clone, Default)]
pub struct AnalysisMetadata {
    /// Number of input lines consumed.
    pub lines_processed: usize,
    /// Number of distinct keys (or key pairs) aggregated.
    pub distinct_keys: usize,
    /// Wall-clock seconds spent reading and aggregating.
    pub elapsed_seconds: f64,
}

/// Result of [`analyze_compound`]: per-event, per-bucket summaries.
#[derive(Debug, Clone)]
pub struct CompoundAnalysis {
    pub summaries: BTreeMap<String, BTreeMap<u64, Summary>>,
    pub metadata: AnalysisMetadata,
}

/// Result of [`analyze_keyed`]: per-key summaries, integer keys first in
/// numeric order.
#[derive(Debug, Clone)]
pub struct KeyedAnalysis {
    pub summaries: BTreeMap<GroupKey, Summary>,
    pub metadata: AnalysisMetadata,
}

/// Result of [`collect_latencies`]: every raw row, in file order.
#[derive(Debug, Clone)]
pub struct LatencyAnalysis {
    pub rows: Vec<LatencyRow>,
    pub metadata: AnalysisMetadata,
}

impl LatencyAnalysis {
    /// The `time` column of every row, for histogramming.
    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.time).collect()
    }
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Aggregate `time/item` by `(message, items)` from embedded-JSON lines.
pub fn analyze_compound<R: BufRead>(reader: R) -> Result<CompoundAnalysis> {
    let start = Instant::now();
    let mut stream = Extracted::new(reader, parse_compound_line);
    let mut aggregator = CompoundAggregator::new();

    for obs in stream.by_ref() {
        let obs = obs?;
        aggregator.observe_key(&obs.key, obs.value);
    }

    let metadata = AnalysisMetadata {
        lines_processed: stream.lines_read(),
        distinct_keys: aggregator.len(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };
    log_metadata("compound", &metadata);

    Ok(CompoundAnalysis {
        summaries: aggregator.finalize(),
        metadata,
    })
}

/// Aggregate one value column by one key column from delimited lines.
pub fn analyze_keyed<R: BufRead>(reader: R, format: &DelimitedFormat) -> Result<KeyedAnalysis> {
    let start = Instant::now();
    let mut stream = Extracted::new(reader, |line: &str, n| parse_delimited_line(line, n, format));
    let mut aggregator = RunningAggregator::new();

    for obs in stream.by_ref() {
        let obs = obs?;
        aggregator.observe(obs.key, obs.value);
    }

    let metadata = AnalysisMetadata {
        lines_processed: stream.lines_read(),
        distinct_keys: aggregator.len(),
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };
    log_metadata("keyed", &metadata);

    Ok(KeyedAnalysis {
        summaries: aggregator.finalize(),
        metadata,
    })
}

/// Collect the raw `(time, items, time/item)` rows from embedded-JSON lines.
pub fn collect_latencies<R: BufRead>(reader: R) -> Result<LatencyAnalysis> {
    let start = Instant::now();
    let mut stream = Extracted::new(reader, parse_latency_line);
    let rows = stream.by_ref().collect::<Result<Vec<_>>>()?;

    let metadata = AnalysisMetadata {
        lines_processed: stream.lines_read(),
        distinct_keys: 0,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    };
    log_metadata("latency", &metadata);

    Ok(LatencyAnalysis { rows, metadata })
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn log_metadata(report: &str, metadata: &AnalysisMetadata) {
    info!(
        "{} analysis: {} lines, {} keys",
        report, metadata.lines_processed, metadata.distinct_keys
    );
    debug!("{} analysis took {:.3}s", report, metadata.elapsed_seconds);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
