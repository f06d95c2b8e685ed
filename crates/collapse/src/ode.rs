//! Right-hand side of the radiation-coupled collapse system.
//!
//! The state evolves against ℓ = ln(radiation density), which decreases
//! from the formation value toward the reference epoch. The state vector
//! is (b, t): the scale-factor ratio since formation and the elapsed
//! proper time. One right-hand side serves both regimes; the relativistic
//! limit drops the mass-loss factor and freezes the clock.

use nalgebra::Vector2;
use units::{Mass, PLANCK_MASS_G};

use cosmo::constants::{PLANCK_MASS_GEV, PLANCK_TIME};

/// Which limit of the collapse system is being evolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// Both state variables live; the PBH density fraction carries the
    /// mass-loss factor (1 − t/Δt)^{1/3}.
    Full,
    /// Relativistic limit used after the evaporation event: the PBH
    /// population is reduced to Planck-scale remnants, the density
    /// fraction carries M_pl/M instead, and the clock is frozen.
    Relativistic,
}

/// The collapse ODE for one (mass, beta) pair.
#[derive(Debug, Clone)]
pub struct CollapseOde {
    mass_g: f64,
    beta: f64,
    /// Evaporation lifetime Δt = t_pl · (M/M_pl)³ in GeV⁻¹.
    lifetime: f64,
    regime: Regime,
}

impl CollapseOde {
    pub fn new(mass: Mass, beta: f64, regime: Regime) -> Self {
        let mass_g = mass.to_grams();
        let ratio = mass_g / PLANCK_MASS_G;
        Self {
            mass_g,
            beta,
            lifetime: PLANCK_TIME * ratio * ratio * ratio,
            regime,
        }
    }

    /// Evaporation lifetime Δt in GeV⁻¹.
    pub fn lifetime(&self) -> f64 {
        self.lifetime
    }

    /// PBH density fraction Ω₀ at the given state.
    pub fn omega_pbh(&self, y: &Vector2<f64>) -> f64 {
        match self.regime {
            Regime::Full => self.beta * y[0] * (1.0 - y[1] / self.lifetime).cbrt(),
            Regime::Relativistic => self.beta * y[0] * (PLANCK_MASS_G / self.mass_g),
        }
    }

    /// Derivatives (db/dℓ, dt/dℓ) at log-density ℓ.
    ///
    /// `db/dℓ = −(Ω₀−1)·b / (Ω₀−4)`;
    /// `dt/dℓ = √3·M_pl / ((Ω₀−4)·ρ^{1/2})` in the full regime, zero in
    /// the relativistic limit. Ω₀ = 4 is a pole of both expressions; the
    /// adaptive solver treats a trajectory that runs into it as a failed
    /// step rather than guarding it here.
    pub fn rhs(&self, l: f64, y: &Vector2<f64>) -> Vector2<f64> {
        let om = self.omega_pbh(y);
        let db = -(om - 1.0) * y[0] / (om - 4.0);
        let dt = match self.regime {
            Regime::Full => {
                3.0_f64.sqrt() * PLANCK_MASS_GEV / ((om - 4.0) * (0.5 * l).exp())
            }
            Regime::Relativistic => 0.0,
        };
        Vector2::new(db, dt)
    }

    /// Margin of the evaporation event: positive while the remaining
    /// PBH mass M·(1 − t/Δt)^{1/3} still exceeds the Planck mass.
    ///
    /// Tracked as (1 − t/Δt) − (M_pl/M)³, the same root without a
    /// fractional power of a possibly negative base. Monotone in t, so a
    /// sign change over a step brackets the crossing.
    pub fn evaporation_margin(&self, y: &Vector2<f64>) -> f64 {
        let ratio = PLANCK_MASS_G / self.mass_g;
        (1.0 - y[1] / self.lifetime) - ratio * ratio * ratio
    }
}
