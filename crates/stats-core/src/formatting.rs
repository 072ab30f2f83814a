use std::fmt::Display;

use crate::models::Summary;

/// Format a float in shortest round-trip form, keeping a trailing `.0` on
/// integral values so report columns always read as floats.
///
/// # Examples
///
/// ```
/// use stats_core::formatting::format_float;
///
/// assert_eq!(format_float(5.0), "5.0");
/// assert_eq!(format_float(-2.0), "-2.0");
/// assert_eq!(format_float(0.25), "0.25");
/// assert_eq!(format_float(2.0_f64.sqrt()), "1.4142135623730951");
/// ```
pub fn format_float(value: f64) -> String {
    let s = value.to_string();
    if value.is_finite() && !s.contains(['.', 'e', 'E']) {
        format!("{}.0", s)
    } else {
        s
    }
}

/// One report line for a single-level key:
/// `key \t mean \t stddev \t min \t max\n`.
pub fn format_keyed_line(key: impl Display, summary: &Summary) -> String {
    format!("{}\t{}\n", key, summary_columns(summary))
}

/// One report line for a compound key:
/// `outer \t inner \t mean \t stddev \t min \t max\n`.
pub fn format_compound_line(outer: &str, inner: u64, summary: &Summary) -> String {
    format!("{}\t{}\t{}\n", outer, inner, summary_columns(summary))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn summary_columns(summary: &Summary) -> String {
    [summary.mean, summary.stddev, summary.min, summary.max]
        .iter()
        .map(|v| format_float(*v))
        .collect::<Vec<_>>()
        .join("\t")
}

// ── Tests ──────────────────────────────────────────────────────────────────────
