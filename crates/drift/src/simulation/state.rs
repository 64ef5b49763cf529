//! Run bookkeeping and the final, read-only run output.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregator::SpeedUnit;
use crate::error::ConfigError;
use crate::event::{Carrier, EndpointStatus};
use crate::histogram::Histogram;
use crate::signal::SignalSensor;

/// Endpoint status counts over a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    pub normal: u64,
    pub left_drift_area: u64,
    pub attached: u64,
    pub failed: u64,
}

impl StatusTally {
    pub fn add(&mut self, status: EndpointStatus) {
        match status {
            EndpointStatus::Normal => self.normal += 1,
            EndpointStatus::LeftDriftArea => self.left_drift_area += 1,
            EndpointStatus::Attached => self.attached += 1,
            EndpointStatus::Failed => self.failed += 1,
        }
    }

    pub fn get(&self, status: EndpointStatus) -> u64 {
        match status {
            EndpointStatus::Normal => self.normal,
            EndpointStatus::LeftDriftArea => self.left_drift_area,
            EndpointStatus::Attached => self.attached,
            EndpointStatus::Failed => self.failed,
        }
    }

    pub fn total(&self) -> u64 {
        self.normal + self.left_drift_area + self.attached + self.failed
    }

    pub fn merge(&mut self, other: &StatusTally) {
        self.normal += other.normal;
        self.left_drift_area += other.left_drift_area;
        self.attached += other.attached;
        self.failed += other.failed;
    }
}

/// Counters for everything the event loop did, including what it skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Events (sampled primaries) processed
    pub events: u64,
    /// Clusters received from the track generator
    pub clusters: u64,
    /// Transport invocations
    pub transport_calls: u64,
    /// Invocations skipped because transport failed
    pub transport_failures: u64,
    /// Speeds added to the histogram
    pub recorded: u64,
    /// Pairs discarded because the elapsed time was not positive
    pub non_positive_elapsed: u64,
    /// Speeds outside the histogram range
    pub out_of_range: u64,
    pub statuses: StatusTally,
}

impl RunSummary {
    /// Invocations that produced no histogram entry, for any reason.
    pub fn skipped(&self) -> u64 {
        self.transport_failures + self.non_positive_elapsed + self.out_of_range
    }

    pub fn merge(&mut self, other: &RunSummary) {
        self.events += other.events;
        self.clusters += other.clusters;
        self.transport_calls += other.transport_calls;
        self.transport_failures += other.transport_failures;
        self.recorded += other.recorded;
        self.non_positive_elapsed += other.non_positive_elapsed;
        self.out_of_range += other.out_of_range;
        self.statuses.merge(&other.statuses);
    }
}

/// One aggregated (start, endpoint) pair, kept when `keep_samples` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecordedSample {
    /// Event index within the whole run
    pub event: u64,
    /// Cluster index within the event's track (clustered mode only)
    pub cluster: Option<u64>,
    pub carrier: Carrier,
    pub status: EndpointStatus,
    /// Speed in the histogram's unit; `None` for non-positive elapsed time
    pub speed: Option<f64>,
    /// Whether the speed landed in a histogram bin
    pub in_range: bool,
}

/// Everything a finished run produced. Read-only for reporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutput {
    pub run_id: Uuid,
    pub seed: u64,
    pub unit: SpeedUnit,
    pub summary: RunSummary,
    pub histogram: Histogram,
    pub sensor: SignalSensor,
    pub samples: Vec<RecordedSample>,
}

impl RunOutput {
    /// Fold another partial output of the same run into this one.
    ///
    /// Counters, bins and signal values are summed, so the order in which
    /// partial outputs are merged does not change the result. Samples are
    /// appended and then kept sorted by event index.
    pub fn merge(&mut self, other: &RunOutput) -> Result<(), ConfigError> {
        if self.unit != other.unit || !self.histogram.same_binning(&other.histogram) {
            return Err(ConfigError::MismatchedHistograms);
        }
        if !self.sensor.is_compatible(&other.sensor) {
            return Err(ConfigError::MismatchedSignals);
        }
        self.histogram.merge(&other.histogram)?;
        self.sensor.merge(&other.sensor)?;
        self.summary.merge(&other.summary);
        self.samples.extend_from_slice(&other.samples);
        self.samples.sort_by_key(|s| s.event);
        Ok(())
    }
}
