//! Induced-signal accumulation on readout electrodes.
//!
//! The time axis is configured once per sensor (`t_min`, `t_step`, `n_bins`)
//! and never changes afterwards. Every contribution is *added* to the bins it
//! overlaps; nothing is ever overwritten.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use units::Time;

use crate::error::ConfigError;

/// Discretisation of the signal time axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub t_min: Time,
    pub t_step: Time,
    pub n_bins: usize,
}

impl TimeWindow {
    pub fn new(t_min: Time, t_step: Time, n_bins: usize) -> Self {
        Self {
            t_min,
            t_step,
            n_bins,
        }
    }

    /// Window covering `[t_min, t_max)` with `n_bins` equal bins.
    pub fn spanning(t_min: Time, t_max: Time, n_bins: usize) -> Self {
        let t_step = (t_max - t_min) / n_bins.max(1) as f64;
        Self::new(t_min, t_step, n_bins)
    }

    pub fn t_max(&self) -> Time {
        self.t_min + self.t_step * self.n_bins as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t_step = self.t_step.to_ns();
        if self.n_bins == 0 || !self.t_min.is_finite() || !t_step.is_finite() || t_step <= 0.0 {
            return Err(ConfigError::InvalidTimeWindow {
                t_min: self.t_min.to_ns(),
                t_step,
                n_bins: self.n_bins,
            });
        }
        Ok(())
    }
}

/// Current on one electrode, summed over every invocation of a run.
///
/// Values are in elementary charges per ns (average current over the bin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBinnedSignal {
    window: TimeWindow,
    values: Vec<f64>,
}

impl TimeBinnedSignal {
    pub fn new(window: TimeWindow) -> Result<Self, ConfigError> {
        window.validate()?;
        Ok(Self {
            window,
            values: vec![0.0; window.n_bins],
        })
    }

    pub fn window(&self) -> &TimeWindow {
        &self.window
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn n_bins(&self) -> usize {
        self.values.len()
    }

    /// Start time of bin `idx`.
    pub fn bin_start(&self, idx: usize) -> Time {
        self.window.t_min + self.window.t_step * idx as f64
    }

    /// `(t_start, t_end, value)` for every bin in time order.
    pub fn bins(&self) -> impl Iterator<Item = (Time, Time, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (self.bin_start(i), self.bin_start(i + 1), v))
    }

    /// Bin containing time `t`, if inside the window.
    pub fn bin_index(&self, t: Time) -> Option<usize> {
        let offset = (t - self.window.t_min) / self.window.t_step;
        if !(offset >= 0.0) {
            return None;
        }
        let idx = offset as usize;
        (idx < self.n_bins()).then_some(idx)
    }

    /// Add `value` to the bin containing `t`. Returns `false` outside the window.
    pub fn add(&mut self, t: Time, value: f64) -> bool {
        match self.bin_index(t) {
            Some(idx) => {
                self.values[idx] += value;
                true
            }
            None => false,
        }
    }

    /// Add a constant `current` flowing from `t_from` to `t_to`.
    ///
    /// Each overlapped bin receives `current × overlap / t_step`, so the
    /// integral of the signal gains `current × (t_to − t_from)` for the part
    /// of the interval that lies inside the window.
    pub fn add_current(&mut self, t_from: Time, t_to: Time, current: f64) {
        let (a, b) = if t_from <= t_to {
            (t_from.to_ns(), t_to.to_ns())
        } else {
            (t_to.to_ns(), t_from.to_ns())
        };
        let t_min = self.window.t_min.to_ns();
        let step = self.window.t_step.to_ns();
        let a = a.max(t_min);
        let b = b.min(self.window.t_max().to_ns());
        if !(b > a) {
            return;
        }

        let first = ((a - t_min) / step) as usize;
        let last = (((b - t_min) / step) as usize).min(self.n_bins() - 1);
        for idx in first..=last {
            let lo = t_min + idx as f64 * step;
            let hi = lo + step;
            let overlap = b.min(hi) - a.max(lo);
            if overlap > 0.0 {
                self.values[idx] += current * overlap / step;
            }
        }
    }

    /// Total collected charge (Σ value × t_step), in elementary charges.
    pub fn integral(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.window.t_step.to_ns()
    }

    /// Bin with the largest |value|.
    pub fn peak(&self) -> Option<(Time, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0.0)
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(i, &v)| (self.bin_start(i), v))
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = 0.0);
    }

    pub fn merge(&mut self, other: &TimeBinnedSignal) -> Result<(), ConfigError> {
        if self.window != other.window {
            return Err(ConfigError::MismatchedSignals);
        }
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += b;
        }
        Ok(())
    }
}

/// Readout side of the detector: a time window and the electrodes whose
/// induced current is recorded on it.
///
/// Transport collaborators receive a `&mut SignalSensor` and add current to
/// every electrode listed in [`SignalSensor::electrodes`]. A sensor with no
/// window or no electrodes silently accepts nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSensor {
    window: Option<TimeWindow>,
    signals: BTreeMap<String, TimeBinnedSignal>,
}

impl SignalSensor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the time axis. The window is fixed once set: a second call
    /// fails and leaves the sensor untouched.
    pub fn set_time_window(&mut self, window: TimeWindow) -> Result<(), ConfigError> {
        if self.window.is_some() {
            return Err(ConfigError::TimeWindowAlreadySet);
        }
        window.validate()?;
        self.window = Some(window);
        Ok(())
    }

    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    /// Request signal recording for `name`.
    pub fn add_electrode(&mut self, name: impl Into<String>) -> Result<(), ConfigError> {
        let window = self.window.ok_or(ConfigError::ElectrodesWithoutTimeWindow)?;
        self.signals
            .entry(name.into())
            .or_insert(TimeBinnedSignal::new(window)?);
        Ok(())
    }

    pub fn electrodes(&self) -> impl Iterator<Item = &str> {
        self.signals.keys().map(String::as_str)
    }

    pub fn has_electrodes(&self) -> bool {
        !self.signals.is_empty()
    }

    pub fn signal(&self, electrode: &str) -> Option<&TimeBinnedSignal> {
        self.signals.get(electrode)
    }

    pub fn signal_mut(&mut self, electrode: &str) -> Option<&mut TimeBinnedSignal> {
        self.signals.get_mut(electrode)
    }

    pub fn signals(&self) -> impl Iterator<Item = (&str, &TimeBinnedSignal)> {
        self.signals.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Same window and electrodes, all values zero.
    pub fn empty_like(&self) -> Self {
        let mut copy = self.clone();
        copy.clear();
        copy
    }

    pub fn clear(&mut self) {
        self.signals.values_mut().for_each(TimeBinnedSignal::clear);
    }

    /// Same time window and same electrode set.
    pub fn is_compatible(&self, other: &SignalSensor) -> bool {
        self.window == other.window
            && self.signals.len() == other.signals.len()
            && other.signals.keys().all(|k| self.signals.contains_key(k))
    }

    pub fn merge(&mut self, other: &SignalSensor) -> Result<(), ConfigError> {
        if !self.is_compatible(other) {
            return Err(ConfigError::MismatchedSignals);
        }
        for (name, signal) in &other.signals {
            if let Some(mine) = self.signals.get_mut(name) {
                mine.merge(signal)?;
            }
        }
        Ok(())
    }
}
