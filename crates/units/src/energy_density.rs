use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Radiation energy density in GeV⁴ (natural units).
///
/// The density-evolution solver works against ln(ρ) as its independent
/// variable, so the log constructors are first-class here.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct EnergyDensity(f64); // Base unit: GeV⁴

impl EnergyDensity {
    pub fn from_gev4(value: f64) -> Self {
        Self(value)
    }

    /// Creates a density from its natural logarithm.
    pub fn from_ln_gev4(ln_value: f64) -> Self {
        Self(ln_value.exp())
    }

    pub fn to_gev4(&self) -> f64 {
        self.0
    }

    /// Natural logarithm of the density, the solver coordinate.
    pub fn ln(&self) -> f64 {
        self.0.ln()
    }
}

impl Mul<f64> for EnergyDensity {
    type Output = EnergyDensity;

    fn mul(self, rhs: f64) -> EnergyDensity {
        EnergyDensity(self.0 * rhs)
    }
}

impl Div<f64> for EnergyDensity {
    type Output = EnergyDensity;

    fn div(self, rhs: f64) -> EnergyDensity {
        EnergyDensity(self.0 / rhs)
    }
}

/// Division of EnergyDensity by EnergyDensity returns a dimensionless ratio
impl Div for EnergyDensity {
    type Output = f64;

    fn div(self, rhs: EnergyDensity) -> f64 {
        self.0 / rhs.0
    }
}
