use crate::length::{Length, MM_PER_CM, UM_PER_CM};
use crate::time::{Time, NS_PER_US};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Speed of light in vacuum (cm/ns)
pub const SPEED_OF_LIGHT_CM_PER_NS: f64 = 29.979_245_8;

/// Drift speed, base unit cm/ns.
///
/// Gas drift speeds are usually quoted in cm/µs; the conversion is a fixed
/// factor of 1000.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: cm/ns

impl Velocity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_cm_per_ns(value: f64) -> Self {
        Self(value)
    }

    pub fn from_cm_per_us(value: f64) -> Self {
        Self(value / NS_PER_US)
    }

    pub fn from_mm_per_ns(value: f64) -> Self {
        Self(value / MM_PER_CM)
    }

    pub fn from_um_per_ns(value: f64) -> Self {
        Self(value / UM_PER_CM)
    }

    /// Path length over elapsed time.
    ///
    /// Returns `None` when `elapsed` is not strictly positive, since the
    /// quotient is undefined there.
    ///
    /// # Examples
    /// ```
    /// use units::{Length, Time, Velocity};
    ///
    /// let v = Velocity::from_distance_time(Length::from_cm(0.5), Time::from_ns(1.0));
    /// assert_eq!(v.map(|v| v.to_cm_per_ns()), Some(0.5));
    ///
    /// assert!(Velocity::from_distance_time(Length::from_cm(0.5), Time::zero()).is_none());
    /// ```
    pub fn from_distance_time(distance: Length, elapsed: Time) -> Option<Self> {
        let t = elapsed.to_ns();
        if t > 0.0 {
            Some(Self(distance.to_cm() / t))
        } else {
            None
        }
    }

    pub fn to_cm_per_ns(&self) -> f64 {
        self.0
    }

    pub fn to_cm_per_us(&self) -> f64 {
        self.0 * NS_PER_US
    }

    pub fn to_mm_per_ns(&self) -> f64 {
        self.0 * MM_PER_CM
    }

    pub fn to_um_per_ns(&self) -> f64 {
        self.0 * UM_PER_CM
    }

    /// Time needed to cover `distance` at this speed.
    pub fn time_to_cover(&self, distance: Length) -> Time {
        Time::from_ns(distance.to_cm() / self.0)
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

/// Velocity × Time = Length
impl Mul<Time> for Velocity {
    type Output = Length;

    fn mul(self, rhs: Time) -> Length {
        Length::from_cm(self.0 * rhs.to_ns())
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}

impl Div for Velocity {
    type Output = f64;

    fn div(self, rhs: Velocity) -> f64 {
        self.0 / rhs.0
    }
}
