//! Clusters along a straight, ultra-relativistic primary.

use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_chacha::ChaChaRng;
use rand_distr::{Distribution, Exp1, Poisson};
use units::{Energy, Length, Time, SPEED_OF_LIGHT_CM_PER_NS};

use crate::collaborators::TrackGenerator;
use crate::event::{Cluster, StartCondition};
use crate::sampling::rng_from_seed;

/// Primary-ionization model with exponential cluster spacing.
///
/// Each cluster holds `1 + Poisson(mean_electrons - 1)` electrons and
/// deposits `n · w_value`. A track ends after `max_length` or once the
/// primary has lost all of its energy, whichever comes first. The primary
/// moves at the speed of light.
#[derive(Debug, Clone)]
pub struct StraightTrack {
    mean_free_path: Length,
    mean_electrons: f64,
    w_value: Energy,
    max_length: Length,
    rng: ChaChaRng,
    origin: Point3<f64>,
    direction: Vector3<f64>,
    t0: Time,
    travelled: f64,
    remaining: f64,
    active: bool,
}

impl StraightTrack {
    pub fn new(
        mean_free_path: Length,
        mean_electrons: f64,
        w_value: Energy,
        max_length: Length,
        seed: u64,
    ) -> Self {
        Self {
            mean_free_path,
            mean_electrons,
            w_value,
            max_length,
            rng: rng_from_seed(seed, 0),
            origin: Point3::origin(),
            direction: Vector3::z(),
            t0: Time::zero(),
            travelled: 0.0,
            remaining: 0.0,
            active: false,
        }
    }

    /// Draw from stream `worker` instead of stream 0.
    pub fn on_stream(mut self, seed: u64, worker: usize) -> Self {
        self.rng = rng_from_seed(seed, worker as u64);
        self
    }

    /// Minimum-ionizing track in argon at 1 atm, cut at 2.5 mm.
    pub fn argon_gas(seed: u64) -> Self {
        Self::new(
            Length::from_um(400.0),
            3.0,
            Energy::from_ev(26.0),
            Length::from_mm(2.5),
            seed,
        )
    }

    /// Minimum-ionizing track in xenon at 1 atm, cut at 2.5 mm.
    pub fn xenon_gas(seed: u64) -> Self {
        Self::new(
            Length::from_um(230.0),
            3.5,
            Energy::from_ev(22.0),
            Length::from_mm(2.5),
            seed,
        )
    }

    /// Minimum-ionizing track through 100 µm of silicon.
    pub fn silicon(seed: u64) -> Self {
        Self::new(
            Length::from_um(1.0),
            5.0,
            Energy::from_ev(3.6),
            Length::from_um(100.0),
            seed,
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Path length covered by the current track (cm).
    pub fn travelled(&self) -> Length {
        Length::from_cm(self.travelled)
    }

    fn electrons_in_cluster(&mut self) -> u32 {
        let extra = self.mean_electrons - 1.0;
        if extra <= 0.0 {
            return 1;
        }
        match Poisson::new(extra) {
            Ok(poisson) => {
                let k: f64 = poisson.sample(&mut self.rng);
                1 + k as u32
            }
            Err(_) => 1,
        }
    }
}

impl TrackGenerator for StraightTrack {
    fn new_track(&mut self, start: &StartCondition, direction: Vector3<f64>, energy: Energy) {
        self.origin = start.position;
        self.direction = direction.try_normalize(0.0).unwrap_or_else(Vector3::z);
        self.t0 = start.time;
        self.travelled = 0.0;
        self.remaining = energy.to_ev();
        self.active = self.mean_free_path.to_cm() > 0.0 && self.remaining > 0.0;
    }

    fn next_cluster(&mut self) -> Option<Cluster> {
        if !self.active {
            return None;
        }

        let e: f64 = self.rng.sample(Exp1);
        self.travelled += e * self.mean_free_path.to_cm();
        if self.travelled > self.max_length.to_cm() {
            self.active = false;
            return None;
        }

        let n_electrons = self.electrons_in_cluster();
        let w = self.w_value.to_ev();
        let deposit = (f64::from(n_electrons) * w).min(self.remaining);
        self.remaining -= deposit;
        if self.remaining < w {
            self.active = false;
        }

        Some(Cluster {
            position: self.origin + self.direction * self.travelled,
            time: self.t0 + Time::from_ns(self.travelled / SPEED_OF_LIGHT_CM_PER_NS),
            n_electrons,
            energy: Energy::from_ev(deposit),
            energy_fluctuation: Energy::from_ev(w * f64::from(n_electrons).sqrt()),
        })
    }
}
