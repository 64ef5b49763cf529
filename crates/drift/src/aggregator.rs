//! Endpoint-to-observable derivation and histogram accumulation.
//!
//! The observable is the mean drift speed of one carrier,
//! `|end − start| / (t_end − t_start)`, expressed in a fixed reporting unit.
//! Pairs with a non-positive elapsed time have no speed and are discarded;
//! speeds outside the histogram range are dropped. Both are counted.

use std::fmt;

use nalgebra::distance;
use serde::{Deserialize, Serialize};
use units::{Length, Velocity};

use crate::error::ConfigError;
use crate::event::{Endpoint, StartCondition};
use crate::histogram::Histogram;

/// Unit the speed is converted to before filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    CmPerNs,
    #[default]
    CmPerUs,
    MmPerNs,
    UmPerNs,
}

impl SpeedUnit {
    pub fn convert(&self, v: Velocity) -> f64 {
        match self {
            SpeedUnit::CmPerNs => v.to_cm_per_ns(),
            SpeedUnit::CmPerUs => v.to_cm_per_us(),
            SpeedUnit::MmPerNs => v.to_mm_per_ns(),
            SpeedUnit::UmPerNs => v.to_um_per_ns(),
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SpeedUnit::CmPerNs => "cm/ns",
            SpeedUnit::CmPerUs => "cm/us",
            SpeedUnit::MmPerNs => "mm/ns",
            SpeedUnit::UmPerNs => "um/ns",
        };
        write!(f, "{}", label)
    }
}

/// Binning of the speed histogram, fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramConfig {
    pub n_bins: usize,
    pub low: f64,
    pub high: f64,
    #[serde(default)]
    pub unit: SpeedUnit,
}

impl HistogramConfig {
    pub fn new(n_bins: usize, low: f64, high: f64, unit: SpeedUnit) -> Self {
        Self {
            n_bins,
            low,
            high,
            unit,
        }
    }

    pub fn build(&self) -> Result<Histogram, ConfigError> {
        Histogram::new(self.n_bins, self.low, self.high)
    }
}

/// What happened to one (start, endpoint) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordOutcome {
    /// Speed (reporting unit) that was added to the histogram
    Recorded(f64),
    /// Elapsed time was zero or negative; nothing recorded
    NonPositiveElapsed,
    /// Speed fell outside the histogram range; nothing recorded
    OutOfRange(f64),
}

impl RecordOutcome {
    pub fn speed(&self) -> Option<f64> {
        match self {
            RecordOutcome::Recorded(v) | RecordOutcome::OutOfRange(v) => Some(*v),
            RecordOutcome::NonPositiveElapsed => None,
        }
    }
}

/// Straight-line drift speed between start and endpoint.
///
/// `None` when `end.time <= start.time`.
pub fn drift_speed(start: &StartCondition, end: &Endpoint) -> Option<Velocity> {
    let path = Length::from_cm(distance(&start.position, &end.position));
    Velocity::from_distance_time(path, end.time - start.time)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedAggregator {
    unit: SpeedUnit,
    histogram: Histogram,
    non_positive_elapsed: u64,
    out_of_range: u64,
}

impl SpeedAggregator {
    pub fn new(config: &HistogramConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            unit: config.unit,
            histogram: config.build()?,
            non_positive_elapsed: 0,
            out_of_range: 0,
        })
    }

    pub fn record(&mut self, start: &StartCondition, end: &Endpoint) -> RecordOutcome {
        let Some(velocity) = drift_speed(start, end) else {
            self.non_positive_elapsed += 1;
            return RecordOutcome::NonPositiveElapsed;
        };

        let speed = self.unit.convert(velocity);
        if self.histogram.fill(speed) {
            RecordOutcome::Recorded(speed)
        } else {
            self.out_of_range += 1;
            RecordOutcome::OutOfRange(speed)
        }
    }

    pub fn unit(&self) -> SpeedUnit {
        self.unit
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    pub fn into_histogram(self) -> Histogram {
        self.histogram
    }

    pub fn non_positive_elapsed(&self) -> u64 {
        self.non_positive_elapsed
    }

    pub fn out_of_range(&self) -> u64 {
        self.out_of_range
    }

    pub fn merge(&mut self, other: &SpeedAggregator) -> Result<(), ConfigError> {
        if self.unit != other.unit {
            return Err(ConfigError::MismatchedHistograms);
        }
        self.histogram.merge(&other.histogram)?;
        self.non_positive_elapsed += other.non_positive_elapsed;
        self.out_of_range += other.out_of_range;
        Ok(())
    }
}
