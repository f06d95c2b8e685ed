use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// One GeV⁻¹ of natural-unit time in seconds (ħ / 1 GeV)
pub const SECONDS_PER_INVERSE_GEV: f64 = 6.582_119_57e-25;

/// A physical time quantity using f64 precision.
///
/// The `Time` struct represents time with inverse GeV as the base unit,
/// which is natural for early-universe epochs where densities and rates
/// are carried in powers of GeV. The seconds conversion is available for
/// reporting against laboratory clocks.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let epoch = Time::from_inverse_gev(1.0e22);
/// let seconds = epoch.to_seconds();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: GeV⁻¹

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in inverse GeV.
    pub fn from_inverse_gev(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value / SECONDS_PER_INVERSE_GEV)
    }

    /// Returns the time in inverse GeV.
    pub fn to_inverse_gev(&self) -> f64 {
        self.0
    }

    /// Converts the time to seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 * SECONDS_PER_INVERSE_GEV
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
