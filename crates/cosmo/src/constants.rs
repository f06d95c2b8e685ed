//! Background cosmology constants.
//!
//! Centralises the fixed physical inputs used throughout the constraint
//! pipeline. Masses of PBHs are carried in grams (see `units::Mass`);
//! densities, rates and times are carried in natural units (powers of GeV).

/// Reduced Planck mass in GeV (M_pl = 1/√(8πG)).
pub const PLANCK_MASS_GEV: f64 = 2.435e18;

/// Planck time in GeV⁻¹ (5.391 × 10⁻⁴⁴ s).
pub const PLANCK_TIME: f64 = 8.19e-20;

/// Gravitational collapse efficiency of the radiation fluid.
///
/// The fraction of the horizon mass that ends up in the black hole when a
/// horizon-scale overdensity collapses; Carr's γ ≈ w^{3/2} = 0.2 for a
/// radiation background. Reported beta values are normalised by √γ.
pub const GAM_RAD: f64 = 0.2;

/// Hubble rate at the end of inflation in GeV.
pub const H_END: f64 = 1.0e13;

/// Radiation energy density at the end of inflation in GeV⁴.
///
/// Friedmann closure at the end of inflation: ρ = 3 M_pl² H_end².
pub const RHO_END_INFLATION: f64 = 3.0 * PLANCK_MASS_GEV * PLANCK_MASS_GEV * H_END * H_END;

/// Radiation energy density at the reference (constraint-evaluation)
/// epoch in GeV⁴.
///
/// Corresponds to a plasma temperature of ≈ 4 MeV, the latest moment the
/// light-element yields can still be disturbed.
pub const RHO_REFERENCE: f64 = 1.0e-8;
