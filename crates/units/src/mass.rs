use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Planck mass in grams (2.17645 × 10⁻⁵ g)
pub const PLANCK_MASS_G: f64 = 2.17645e-5;

/// Mass of the Sun in grams (1.98847 × 10³³ g)
pub const SOLAR_MASS_G: f64 = 1.98847e33;

/// A physical mass quantity using f64 precision.
///
/// The `Mass` struct represents mass values with grams as the base unit.
/// Primordial-black-hole constraint windows are quoted in grams throughout
/// the literature, so grams keep the window thresholds readable while the
/// Planck- and solar-mass constructors cover the ratio formulas.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// // Create masses using different units
/// let evaporating_now = Mass::from_grams(5.0e14);
/// let remnant = Mass::from_planck_masses(1.0);
///
/// // Convert between units
/// let in_planck = evaporating_now.to_planck_masses();
/// let in_grams = remnant.to_grams();
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
pub struct Mass(f64); // Base unit: grams

impl Mass {
    /// Creates a new `Mass` from a value in grams.
    ///
    /// This is the most direct constructor since grams are the base unit.
    ///
    /// # Arguments
    ///
    /// * `value` - The mass value in grams
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::Mass;
    ///
    /// let asteroid_scale = Mass::from_grams(1.0e18);
    /// let grb_threshold = Mass::from_grams(3.0e13);
    /// ```
    pub fn from_grams(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Mass` from a value in Planck masses.
    ///
    /// One Planck mass is approximately 2.17645 × 10⁻⁵ grams, the scale at
    /// which an evaporating black hole leaves the semiclassical regime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::Mass;
    ///
    /// let remnant = Mass::from_planck_masses(1.0);
    /// let light_pbh = Mass::from_planck_masses(1.0e11);
    /// ```
    pub fn from_planck_masses(value: f64) -> Self {
        Self(value * PLANCK_MASS_G)
    }

    /// Creates a new `Mass` from a value in solar masses.
    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_G)
    }

    /// Returns the mass value in grams.
    ///
    /// Since grams are the base unit, this simply returns the stored value.
    pub fn to_grams(&self) -> f64 {
        self.0
    }

    /// Converts the mass to Planck masses.
    ///
    /// # Returns
    ///
    /// The mass in units of the Planck mass
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::{Mass, PLANCK_MASS_G};
    ///
    /// let m = Mass::from_grams(PLANCK_MASS_G);
    /// assert_eq!(m.to_planck_masses(), 1.0);
    /// ```
    pub fn to_planck_masses(&self) -> f64 {
        self.0 / PLANCK_MASS_G
    }

    /// Converts the mass to solar masses.
    pub fn to_solar_masses(&self) -> f64 {
        self.0 / SOLAR_MASS_G
    }

    /// Power function
    pub fn powf(&self, n: f64) -> f64 {
        self.0.powf(n)
    }

    /// Natural logarithm
    pub fn ln(&self) -> f64 {
        self.0.ln()
    }

    /// Square root
    pub fn sqrt(&self) -> f64 {
        self.0.sqrt()
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Division of Mass by Mass returns a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Mass (commutative multiplication)
impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}
