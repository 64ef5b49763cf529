//! Immutable run configuration.
//!
//! Everything a run needs (footprint, start plane, mode, binning, time window,
//! seed) lives in one [`RunConfig`] value that is validated once before the
//! event loop starts. Configurations round-trip through JSON so scenarios can
//! be kept next to the field maps they belong to.

use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use units::{Energy, Length, Time};

use crate::aggregator::{HistogramConfig, SpeedUnit};
use crate::error::{ConfigError, DriftError};
use crate::event::Carrier;
use crate::sampling::DiskSampler;
use crate::signal::TimeWindow;

/// How each event produces carriers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Mode {
    /// One transport invocation per carrier species at the sampled start
    SingleParticle,
    /// A primary track from the sampled start; carriers are released at
    /// every ionization cluster along it
    Clustered {
        direction: Vector3<f64>,
        energy: Energy,
        /// Transport one carrier per cluster electron instead of one per cluster
        #[serde(default)]
        drift_each_electron: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Fixed seed for reproducible runs; a random one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    pub n_events: usize,
    pub source: DiskSampler,
    pub start_z: Length,
    #[serde(default = "Time::zero")]
    pub start_t: Time,
    pub mode: Mode,
    #[serde(default = "default_carriers")]
    pub carriers: Vec<Carrier>,
    pub histogram: HistogramConfig,
    #[serde(default)]
    pub time_window: Option<TimeWindow>,
    #[serde(default)]
    pub electrodes: Vec<String>,
    /// Worker count for [`crate::run_parallel`]; rayon's default when absent
    #[serde(default)]
    pub threads: Option<usize>,
    /// Keep every recorded speed in emission order
    #[serde(default)]
    pub keep_samples: bool,
}

fn default_carriers() -> Vec<Carrier> {
    vec![Carrier::Electron]
}

fn ensure_finite(value: f64, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFiniteParameter(name))
    }
}

impl RunConfig {
    /// Single-particle electron run with no signal readout.
    pub fn single_particle(
        n_events: usize,
        source: DiskSampler,
        start_z: Length,
        histogram: HistogramConfig,
    ) -> Self {
        Self {
            seed: None,
            n_events,
            source,
            start_z,
            start_t: Time::zero(),
            mode: Mode::SingleParticle,
            carriers: default_carriers(),
            histogram,
            time_window: None,
            electrodes: Vec::new(),
            threads: None,
            keep_samples: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_carriers(mut self, carriers: Vec<Carrier>) -> Self {
        self.carriers = carriers;
        self
    }

    pub fn with_signal(mut self, window: TimeWindow, electrodes: Vec<String>) -> Self {
        self.time_window = Some(window);
        self.electrodes = electrodes;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_samples(mut self) -> Self {
        self.keep_samples = true;
        self
    }

    /// Check every parameter that would make the run meaningless.
    ///
    /// A non-positive footprint radius is *not* an error: the sampler
    /// degenerates to the centre point.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.histogram.build()?;

        if let Some(window) = &self.time_window {
            window.validate()?;
        } else if !self.electrodes.is_empty() {
            return Err(ConfigError::ElectrodesWithoutTimeWindow);
        }

        if self.carriers.is_empty() {
            return Err(ConfigError::NoCarriers);
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidThreadCount);
        }

        ensure_finite(self.source.radius.to_cm(), "source.radius")?;
        ensure_finite(self.source.center_x.to_cm(), "source.center_x")?;
        ensure_finite(self.source.center_y.to_cm(), "source.center_y")?;
        ensure_finite(self.start_z.to_cm(), "start_z")?;
        ensure_finite(self.start_t.to_ns(), "start_t")?;

        if let Mode::Clustered {
            direction, energy, ..
        } = &self.mode
        {
            let norm = direction.norm();
            if !norm.is_finite() || norm == 0.0 {
                return Err(ConfigError::InvalidDirection);
            }
            ensure_finite(energy.to_ev(), "mode.energy")?;
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self, DriftError> {
        let config: RunConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DriftError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&contents)?;
        log::info!("Loaded run configuration from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, DriftError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Ready-made scenarios for the detector setups the driver was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Electrons released just below the cathode of the argon-filled chamber
    ArgonCathodeDrift,
    /// 1 MeV electron tracks in xenon, every cluster electron drifted
    XenonTrackDrift,
    /// Electron/hole pairs from a pion crossing a planar silicon strip sensor
    SiliconStripSignal,
}

/// Cathode radius of the chamber (cm); electrons come from the inner third.
const CATHODE_RADIUS_CM: f64 = 0.5;

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::ArgonCathodeDrift,
        Scenario::XenonTrackDrift,
        Scenario::SiliconStripSignal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::ArgonCathodeDrift => "argon_cathode_drift",
            Scenario::XenonTrackDrift => "xenon_track_drift",
            Scenario::SiliconStripSignal => "silicon_strip_signal",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.name() == name)
    }

    pub fn config(&self) -> RunConfig {
        match self {
            Scenario::ArgonCathodeDrift => argon_cathode_drift(),
            Scenario::XenonTrackDrift => xenon_track_drift(),
            Scenario::SiliconStripSignal => silicon_strip_signal(),
        }
    }
}

/// Ten electrons from a 1/3-cathode-radius spot, a few mm below the cathode.
pub fn argon_cathode_drift() -> RunConfig {
    RunConfig::single_particle(
        10,
        DiskSampler::new(Length::from_cm(CATHODE_RADIUS_CM / 3.0)),
        Length::from_cm(4.52),
        HistogramConfig::new(50, 0.0, 1.0, SpeedUnit::MmPerNs),
    )
}

/// 150 primary electrons of 1 MeV heading along +z through liquid/gas xenon.
pub fn xenon_track_drift() -> RunConfig {
    RunConfig::single_particle(
        150,
        DiskSampler::new(Length::from_cm(CATHODE_RADIUS_CM / 3.0)),
        Length::from_cm(4.32),
        HistogramConfig::new(100, 0.0, 1.0, SpeedUnit::CmPerUs),
    )
    .with_mode(Mode::Clustered {
        direction: Vector3::new(0.0, 0.0, 1.0),
        energy: Energy::from_mev(1.0),
        drift_each_electron: true,
    })
}

/// One 180 GeV pion crossing the silicon sensor along the field axis;
/// electrons and holes are both drifted and the current on the strip is
/// recorded over 10 ns in 1000 bins.
pub fn silicon_strip_signal() -> RunConfig {
    RunConfig::single_particle(
        1,
        DiskSampler::new(Length::zero()),
        Length::zero(),
        HistogramConfig::new(100, 0.0, 20.0, SpeedUnit::CmPerUs),
    )
    .with_mode(Mode::Clustered {
        direction: Vector3::new(0.0, 0.0, 1.0),
        energy: Energy::from_mev(180.0e3),
        drift_each_electron: true,
    })
    .with_carriers(vec![Carrier::Electron, Carrier::Hole])
    .with_signal(
        TimeWindow::spanning(Time::zero(), Time::from_ns(10.0), 1000),
        vec!["strip".to_string()],
    )
}
