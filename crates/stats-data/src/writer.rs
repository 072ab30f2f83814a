//! Report rendering and output for bench-stats.
//!
//! Reports are rendered fully in memory and written in one step through a
//! temporary sibling file, so an aborted run never leaves a truncated or
//! half-written output behind.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use stats_core::error::{Result, StatsError};
use stats_core::formatting::{format_compound_line, format_keyed_line};
use stats_core::models::{GroupKey, LatencyRow, Summary};
use tracing::debug;

/// Render `outer \t inner \t mean \t stddev \t min \t max` lines, outer and
/// inner keys ascending.
pub fn render_compound_report(summaries: &BTreeMap<String, BTreeMap<u64, Summary>>) -> String {
    let mut out = String::new();
    for (outer, buckets) in summaries {
        for (inner, summary) in buckets {
            out.push_str(&format_compound_line(outer, *inner, summary));
        }
    }
    out
}

/// Render `key \t mean \t stddev \t min \t max` lines in key order.
pub fn render_keyed_report(summaries: &BTreeMap<GroupKey, Summary>) -> String {
    summaries
        .iter()
        .map(|(key, summary)| format_keyed_line(key, summary))
        .collect()
}

/// Render raw latency rows as header-less CSV (`time,items,time_per_item`).
pub fn render_latency_csv(rows: &[LatencyRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| StatsError::Io(e.into_error()))
}

/// Atomically replace `path` with `contents`.
///
/// The data goes to `<path>.tmp` first and is renamed over `path`.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = temp_sibling(path);
    let to_write_error = |source| StatsError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    std::fs::write(&tmp, contents).map_err(to_write_error)?;
    if let Err(source) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(to_write_error(source));
    }

    debug!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
