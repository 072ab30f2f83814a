use crate::models::{RunningState, Summary};

// ── SummaryCalculator ─────────────────────────────────────────────────────────

/// Stateless finalization of running accumulators into summaries.
pub struct SummaryCalculator;

impl SummaryCalculator {
    /// Derive mean, population standard deviation, min and max from `state`.
    ///
    /// Returns `None` for an empty state, so no division by zero can occur.
    pub fn summarize(state: &RunningState) -> Option<Summary> {
        if state.is_empty() {
            return None;
        }
        let mean = state.sum / state.count as f64;
        let variance = Self::population_variance(state.sum_squares, mean, state.count);

        Some(Summary {
            count: state.count,
            mean,
            stddev: variance.max(0.0).sqrt(),
            min: state.min,
            max: state.max,
        })
    }

    /// `E[x²] − E[x]²`. May come out slightly negative from cancellation when
    /// all values are (nearly) equal; callers clamp before taking the root.
    pub fn population_variance(sum_squares: f64, mean: f64, count: u64) -> f64 {
        sum_squares / count as f64 - mean * mean
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
