use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const EV_PER_KEV: f64 = 1e3;
pub const EV_PER_MEV: f64 = 1e6;

/// Particle or deposited energy, base unit eV.
///
/// # Examples
///
/// ```rust
/// use units::Energy;
///
/// let beam = Energy::from_mev(1.0);
/// assert_eq!(beam.to_ev(), 1e6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Energy(f64); // Base unit: eV

impl Energy {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_ev(value: f64) -> Self {
        Self(value)
    }

    pub fn from_kev(value: f64) -> Self {
        Self(value * EV_PER_KEV)
    }

    pub fn from_mev(value: f64) -> Self {
        Self(value * EV_PER_MEV)
    }

    pub fn to_ev(&self) -> f64 {
        self.0
    }

    pub fn to_kev(&self) -> f64 {
        self.0 / EV_PER_KEV
    }

    pub fn to_mev(&self) -> f64 {
        self.0 / EV_PER_MEV
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Energy {
    type Output = Energy;

    fn add(self, rhs: Energy) -> Energy {
        Energy(self.0 + rhs.0)
    }
}

impl Sub for Energy {
    type Output = Energy;

    fn sub(self, rhs: Energy) -> Energy {
        Energy(self.0 - rhs.0)
    }
}

impl Mul<f64> for Energy {
    type Output = Energy;

    fn mul(self, rhs: f64) -> Energy {
        Energy(self.0 * rhs)
    }
}

impl Div<f64> for Energy {
    type Output = Energy;

    fn div(self, rhs: f64) -> Energy {
        Energy(self.0 / rhs)
    }
}

/// Division of Energy by Energy returns a dimensionless ratio
impl Div for Energy {
    type Output = f64;

    fn div(self, rhs: Energy) -> f64 {
        self.0 / rhs.0
    }
}
