use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

pub const PS_PER_NS: f64 = 1_000.0;
pub const NS_PER_US: f64 = 1_000.0;
pub const NS_PER_S: f64 = 1e9;

/// A physical time quantity using f64 precision.
///
/// Nanoseconds are the base unit: drift times across a few centimetres of
/// gas are tens to thousands of ns, and signal windows are binned in ns.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let step = Time::from_ps(10.0);
/// let window = Time::from_us(10.0);
///
/// assert_eq!(step.to_ns(), 0.01);
/// assert_eq!(window.to_ns(), 10_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: ns

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in nanoseconds.
    pub fn from_ns(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in picoseconds.
    pub fn from_ps(value: f64) -> Self {
        Self(value / PS_PER_NS)
    }

    /// Creates a new `Time` from a value in microseconds.
    pub fn from_us(value: f64) -> Self {
        Self(value * NS_PER_US)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_s(value: f64) -> Self {
        Self(value * NS_PER_S)
    }

    /// Returns the time in nanoseconds.
    pub fn to_ns(&self) -> f64 {
        self.0
    }

    /// Converts the time to picoseconds.
    pub fn to_ps(&self) -> f64 {
        self.0 * PS_PER_NS
    }

    /// Converts the time to microseconds.
    pub fn to_us(&self) -> f64 {
        self.0 / NS_PER_US
    }

    /// Converts the time to seconds.
    pub fn to_s(&self) -> f64 {
        self.0 / NS_PER_S
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}

/// Division of Time by Time returns a dimensionless ratio
impl Div for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Time (commutative multiplication)
impl Mul<Time> for f64 {
    type Output = Time;

    fn mul(self, rhs: Time) -> Time {
        rhs * self
    }
}
