//! Fixed-range 1D histogram.
//!
//! Bins are half-open `[low, high)`. Values outside `[low_edge, high_edge)`
//! do not touch any bin; they are tallied as underflow or overflow so the
//! reporter can show how much fell outside the range.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One bin as seen by the reporter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bin {
    pub low: f64,
    pub high: f64,
    pub count: u64,
}

impl Bin {
    pub fn center(&self) -> f64 {
        0.5 * (self.low + self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    low: f64,
    high: f64,
    counts: Vec<u64>,
    underflow: u64,
    overflow: u64,
    /// Σx and Σx² over in-range fills
    sum: f64,
    sum_squares: f64,
}

impl Histogram {
    /// Create an empty histogram of `n_bins` equal bins over `[low, high)`.
    ///
    /// # Errors
    /// `ConfigError::InvalidHistogram` if `n_bins` is zero, an edge is not
    /// finite, or `low >= high`.
    pub fn new(n_bins: usize, low: f64, high: f64) -> Result<Self, ConfigError> {
        if n_bins == 0 || !low.is_finite() || !high.is_finite() || low >= high {
            return Err(ConfigError::InvalidHistogram { n_bins, low, high });
        }

        Ok(Self {
            low,
            high,
            counts: vec![0; n_bins],
            underflow: 0,
            overflow: 0,
            sum: 0.0,
            sum_squares: 0.0,
        })
    }

    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn low_edge(&self) -> f64 {
        self.low
    }

    pub fn high_edge(&self) -> f64 {
        self.high
    }

    pub fn bin_width(&self) -> f64 {
        (self.high - self.low) / self.n_bins() as f64
    }

    /// Lower edge of bin `idx`; `edge(n_bins)` is the upper range limit.
    fn edge(&self, idx: usize) -> f64 {
        if idx >= self.n_bins() {
            self.high
        } else {
            self.low + idx as f64 * self.bin_width()
        }
    }

    /// Index of the bin containing `value`, or `None` outside the range.
    ///
    /// Agrees with the edges reported by [`Histogram::bin`]: a value equal to
    /// a bin's `low` lands in that bin.
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !(value >= self.low && value < self.high) {
            return None;
        }
        let last = self.n_bins() - 1;
        let mut idx = (((value - self.low) / self.bin_width()) as usize).min(last);
        // The quotient can round across an edge in either direction
        while idx > 0 && value < self.edge(idx) {
            idx -= 1;
        }
        while idx < last && value >= self.edge(idx + 1) {
            idx += 1;
        }
        Some(idx)
    }

    /// Add one entry. Returns `false` (and leaves every bin untouched) if the
    /// value lies outside the range or is NaN.
    pub fn fill(&mut self, value: f64) -> bool {
        match self.bin_index(value) {
            Some(idx) => {
                self.counts[idx] += 1;
                self.sum += value;
                self.sum_squares += value * value;
                true
            }
            None => {
                if value < self.low {
                    self.underflow += 1;
                } else if value >= self.high {
                    self.overflow += 1;
                }
                false
            }
        }
    }

    pub fn count(&self, idx: usize) -> Option<u64> {
        self.counts.get(idx).copied()
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    pub fn bin(&self, idx: usize) -> Option<Bin> {
        let count = self.count(idx)?;
        Some(Bin {
            low: self.edge(idx),
            high: self.edge(idx + 1),
            count,
        })
    }

    /// All bins in ascending order of their low edge.
    pub fn bins(&self) -> impl Iterator<Item = Bin> + '_ {
        (0..self.n_bins()).filter_map(move |i| self.bin(i))
    }

    /// Number of in-range entries.
    pub fn entries(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn underflow(&self) -> u64 {
        self.underflow
    }

    pub fn overflow(&self) -> u64 {
        self.overflow
    }

    /// Mean of the in-range values, `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        let n = self.entries();
        if n == 0 {
            return None;
        }
        Some(self.sum / n as f64)
    }

    /// Population standard deviation of the in-range values.
    pub fn std_dev(&self) -> Option<f64> {
        let n = self.entries() as f64;
        let mean = self.mean()?;
        let variance = (self.sum_squares / n - mean * mean).max(0.0);
        Some(variance.sqrt())
    }

    /// Bin with the highest count (first one on ties).
    pub fn peak(&self) -> Option<Bin> {
        let (idx, _) = self
            .counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .fold(None, |best: Option<(usize, u64)>, (i, &c)| match best {
                Some((_, bc)) if bc >= c => best,
                _ => Some((i, c)),
            })?;
        self.bin(idx)
    }

    pub fn same_binning(&self, other: &Histogram) -> bool {
        self.n_bins() == other.n_bins() && self.low == other.low && self.high == other.high
    }

    /// Add another histogram's contents bin by bin.
    ///
    /// # Errors
    /// `ConfigError::MismatchedHistograms` if the binning differs; `self` is
    /// left unchanged in that case.
    pub fn merge(&mut self, other: &Histogram) -> Result<(), ConfigError> {
        if !self.same_binning(other) {
            return Err(ConfigError::MismatchedHistograms);
        }
        for (a, b) in self.counts.iter_mut().zip(&other.counts) {
            *a += b;
        }
        self.underflow += other.underflow;
        self.overflow += other.overflow;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
        Ok(())
    }

    /// Zero every bin and counter, keeping the binning.
    pub fn reset(&mut self) {
        self.counts.iter_mut().for_each(|c| *c = 0);
        self.underflow = 0;
        self.overflow = 0;
        self.sum = 0.0;
        self.sum_squares = 0.0;
    }
}
