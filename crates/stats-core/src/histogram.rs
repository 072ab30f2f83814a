//! Equal-width density histograms over raw samples.
//!
//! Binning follows the usual plotting convention: `bins` equal-width buckets
//! spanning `[min, max]`, every bucket half-open except the last, which
//! also includes `max`. Densities are normalised so that the histogram
//! integrates to one.

/// Default number of buckets for latency histograms.
pub const DEFAULT_BINS: usize = 1000;

/// A density histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bucket.
    pub start: f64,
    /// Width of every bucket.
    pub bin_width: f64,
    /// Number of samples per bucket.
    pub counts: Vec<u64>,
    /// Probability density per bucket: `count / (total * bin_width)`.
    pub densities: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width buckets.
    ///
    /// A degenerate range (no samples, or every sample equal) is widened to
    /// one unit around the value so bucket widths stay positive. `bins` of
    /// zero is treated as one.
    pub fn from_samples(samples: &[f64], bins: usize) -> Self {
        let bins = bins.max(1);
        let (lo, hi) = Self::range(samples);
        let bin_width = (hi - lo) / bins as f64;

        let mut counts = vec![0u64; bins];
        for &value in samples {
            let idx = (((value - lo) / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        let total = samples.len() as f64;
        let densities = counts
            .iter()
            .map(|&c| {
                if total > 0.0 {
                    c as f64 / (total * bin_width)
                } else {
                    0.0
                }
            })
            .collect();

        Self {
            start: lo,
            bin_width,
            counts,
            densities,
        }
    }

    /// Right edge of the last bucket.
    pub fn end(&self) -> f64 {
        self.start + self.bin_width * self.counts.len() as f64
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Merge adjacent buckets so that at most `columns` remain, averaging
    /// their densities. Used to fit a fine histogram onto a narrow display.
    pub fn downsample(&self, columns: usize) -> Vec<f64> {
        let columns = columns.max(1);
        let group = self.densities.len().div_ceil(columns).max(1);
        self.densities
            .chunks(group)
            .map(|chunk| chunk.iter().sum::<f64>() / chunk.len() as f64)
            .collect()
    }

    fn range(samples: &[f64]) -> (f64, f64) {
        if samples.is_empty() {
            return (0.0, 1.0);
        }
        let lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        }
    }
}
