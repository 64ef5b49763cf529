//! Monte Carlo driver for charged-particle drift simulations.
//!
//! Samples start positions on a disk-shaped footprint, hands carriers to a
//! pluggable [`Transport`] (directly, or per cluster of a [`TrackGenerator`]
//! track), histograms the resulting mean drift speeds and accumulates induced
//! current on named electrodes.

pub mod aggregator;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod event;
pub mod histogram;
pub mod physics;
pub mod report;
pub mod sampling;
pub mod signal;
pub mod simulation;

#[cfg(test)]
mod histogram_test;
#[cfg(test)]
mod sampling_test;
#[cfg(test)]
mod signal_test;

// Re-export the run driver
pub use simulation::{
    partition_events, run_parallel, EventLoop, RecordedSample, RunOutput, RunSummary, StatusTally,
};

// Re-export collaborator seams
pub use collaborators::{NoTracks, TrackGenerator, Transport};

// Re-export data types
pub use aggregator::{HistogramConfig, SpeedAggregator, SpeedUnit};
pub use config::{Mode, RunConfig, Scenario};
pub use error::{ConfigError, DriftError};
pub use event::{Carrier, Cluster, Endpoint, EndpointStatus, SamplePoint, StartCondition};
pub use histogram::{Bin, Histogram};
pub use sampling::{sample_disk, DiskSampler};
pub use signal::{SignalSensor, TimeBinnedSignal, TimeWindow};
