//! Uniform sampling of the emission footprint.
//!
//! Carriers leave the cathode from a circular spot. Points must be uniform
//! by *area*, so the radial fraction is drawn as √u: the area inside radius r
//! grows as r², and a linear draw would crowd samples toward the centre.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};
use units::Length;

use crate::event::SamplePoint;

/// Sample a point uniformly over a disk of `radius` (cm) centred on the origin.
///
/// A non-positive or non-finite radius yields the origin.
///
/// # Example
/// ```
/// use drift::sampling::sample_disk;
/// use rand::SeedableRng;
/// use rand_chacha::ChaChaRng;
///
/// let mut rng = ChaChaRng::seed_from_u64(42);
/// let p = sample_disk(&mut rng, 0.5);
/// assert!(p.x * p.x + p.y * p.y <= 0.25);
/// ```
pub fn sample_disk(rng: &mut ChaChaRng, radius: f64) -> SamplePoint {
    if !(radius.is_finite() && radius > 0.0) {
        return SamplePoint::new(0.0, 0.0);
    }

    let theta: f64 = rng.random::<f64>() * TAU;
    let u: f64 = rng.random();
    let r = radius * u.sqrt();

    SamplePoint::new(r * theta.cos(), r * theta.sin())
}

/// Circular emission footprint, optionally displaced from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskSampler {
    pub radius: Length,
    #[serde(default = "Length::zero")]
    pub center_x: Length,
    #[serde(default = "Length::zero")]
    pub center_y: Length,
}

impl DiskSampler {
    pub fn new(radius: Length) -> Self {
        Self {
            radius,
            center_x: Length::zero(),
            center_y: Length::zero(),
        }
    }

    pub fn with_center(mut self, x: Length, y: Length) -> Self {
        self.center_x = x;
        self.center_y = y;
        self
    }

    /// Draw one point; a degenerate radius returns the centre.
    pub fn sample(&self, rng: &mut ChaChaRng) -> SamplePoint {
        let p = sample_disk(rng, self.radius.to_cm());
        SamplePoint::new(p.x + self.center_x.to_cm(), p.y + self.center_y.to_cm())
    }
}

/// Build a generator on an independent ChaCha stream.
///
/// Workers of one run share the seed but draw from distinct streams, so
/// their samples are uncorrelated and the run as a whole is reproducible.
pub fn rng_from_seed(seed: u64, stream: u64) -> ChaChaRng {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}
