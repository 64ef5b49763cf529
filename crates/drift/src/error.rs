//! Error types for run configuration and result export.
//!
//! Only configuration problems are fatal. Per-invocation conditions (failed
//! transport, non-positive drift time, speeds outside the histogram range)
//! are counted in the run summary instead of being raised.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid histogram: {n_bins} bins over [{low}, {high})")]
    InvalidHistogram { n_bins: usize, low: f64, high: f64 },

    #[error("invalid time window: t_min={t_min} ns, t_step={t_step} ns, n_bins={n_bins}")]
    InvalidTimeWindow { t_min: f64, t_step: f64, n_bins: usize },

    #[error("at least one carrier species must be transported")]
    NoCarriers,

    #[error("electrodes requested without a time window to bin their signal")]
    ElectrodesWithoutTimeWindow,

    #[error("the sensor time window is already configured")]
    TimeWindowAlreadySet,

    #[error("thread count must be at least 1")]
    InvalidThreadCount,

    #[error("track direction must be a non-zero finite vector")]
    InvalidDirection,

    #[error("parameter `{0}` must be finite")]
    NonFiniteParameter(&'static str),

    #[error("histograms with different binning cannot be merged")]
    MismatchedHistograms,

    #[error("signals with different time windows or electrodes cannot be merged")]
    MismatchedSignals,
}

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
