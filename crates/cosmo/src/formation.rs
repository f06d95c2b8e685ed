//! Radiation density at PBH formation.
//!
//! A black hole of mass M forms when its comoving scale re-enters the
//! horizon; the horizon-crossing ratio `k_end_over_k` fixes how far after
//! the end of inflation that happens, and `rho_f` converts the ratio into
//! the background radiation density at formation. Both depend on the
//! background equation-of-state parameter ω.

use thiserror::Error;
use units::{EnergyDensity, Mass};

use crate::constants::{GAM_RAD, H_END, PLANCK_MASS_GEV, RHO_END_INFLATION};

/// Invalid physical input to the formation model.
#[derive(Debug, Error, PartialEq)]
pub enum DomainError {
    /// Mass must be strictly positive.
    #[error("PBH mass must be positive, got {0} g")]
    NonPositiveMass(f64),
    /// The horizon-crossing exponent diverges as ω → −1.
    #[error("equation-of-state parameter must exceed -1, got {0}")]
    OmegaBelowVacuum(f64),
    /// The formation-density exponent has a pole at ω = −1/3.
    #[error("equation-of-state parameter -1/3 makes the formation density singular")]
    OmegaAtCurvaturePole,
}

/// Ratio of the end-of-inflation wavenumber to the horizon-crossing
/// wavenumber of a PBH of mass `mass`.
///
/// `(M·H_end / (γ·3·M_pl))^((1+3ω)/(3(1+ω)))`
///
/// # Arguments
///
/// * `mass` - PBH mass
/// * `omega` - Background equation-of-state parameter (ω > −1)
///
/// # Examples
///
/// ```rust
/// use cosmo::formation::k_end_over_k;
/// use units::Mass;
///
/// let ratio = k_end_over_k(Mass::from_grams(1.0e15), 1.0 / 3.0).unwrap();
/// assert!(ratio > 0.0);
/// ```
pub fn k_end_over_k(mass: Mass, omega: f64) -> Result<f64, DomainError> {
    let m = mass.to_grams();
    if !(m > 0.0) {
        return Err(DomainError::NonPositiveMass(m));
    }
    if omega <= -1.0 {
        return Err(DomainError::OmegaBelowVacuum(omega));
    }

    let exp = (1.0 + 3.0 * omega) / (3.0 * (1.0 + omega));
    Ok((m * H_END / (GAM_RAD * 3.0 * PLANCK_MASS_GEV)).powf(exp))
}

/// Background radiation energy density at the formation of a PBH of mass
/// `mass`.
///
/// `ρ_f = ρ_end_inf / k_end_over_k(M, ω)^(6(1+ω)/(1+3ω))`
///
/// Smaller black holes form earlier, at higher density; the solver
/// integrates ln ρ downward from this value to the reference epoch.
///
/// # Errors
///
/// Propagates [`DomainError`] from [`k_end_over_k`]; additionally fails
/// at ω = −1/3 where the exponent's denominator vanishes.
pub fn rho_f(mass: Mass, omega: f64) -> Result<EnergyDensity, DomainError> {
    let denom = 1.0 + 3.0 * omega;
    if denom == 0.0 {
        return Err(DomainError::OmegaAtCurvaturePole);
    }

    let ratio = k_end_over_k(mass, omega)?;
    let exp = 6.0 * (1.0 + omega) / denom;
    Ok(EnergyDensity::from_gev4(RHO_END_INFLATION / ratio.powf(exp)))
}
