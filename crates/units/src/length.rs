use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub const CM_PER_M: f64 = 100.0;
pub const MM_PER_CM: f64 = 10.0;
pub const UM_PER_CM: f64 = 1e4;

/// A physical length quantity using f64 precision.
///
/// Centimetres are the base unit, matching the coordinate system of the
/// field maps and drift-line integrators this crate feeds.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let gap = Length::from_mm(3.0);
/// let pitch = Length::from_um(55.0);
///
/// assert!((gap.to_cm() - 0.3).abs() < 1e-12);
/// assert!((pitch.to_cm() - 0.0055).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: cm

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in centimetres.
    pub fn from_cm(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in millimetres.
    pub fn from_mm(value: f64) -> Self {
        Self(value / MM_PER_CM)
    }

    /// Creates a new `Length` from a value in micrometres.
    pub fn from_um(value: f64) -> Self {
        Self(value / UM_PER_CM)
    }

    /// Creates a new `Length` from a value in metres.
    pub fn from_m(value: f64) -> Self {
        Self(value * CM_PER_M)
    }

    /// Returns the length in centimetres.
    pub fn to_cm(&self) -> f64 {
        self.0
    }

    /// Converts the length to millimetres.
    pub fn to_mm(&self) -> f64 {
        self.0 * MM_PER_CM
    }

    /// Converts the length to micrometres.
    pub fn to_um(&self) -> f64 {
        self.0 * UM_PER_CM
    }

    /// Converts the length to metres.
    pub fn to_m(&self) -> f64 {
        self.0 / CM_PER_M
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns the minimum of two lengths.
    pub fn min(self, other: Self) -> Self {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two lengths.
    pub fn max(self, other: Self) -> Self {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    /// Square root of the value in centimetres (diffusion scales as √L).
    pub fn sqrt(&self) -> f64 {
        self.0.sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Length) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
