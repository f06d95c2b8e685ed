//! Observational constraints on the initial PBH abundance.
//!
//! All seven constraints share one evaluation template: a set of mass
//! windows, each assigning a trial beta, and optionally an evolution of
//! the patch to the reference epoch to turn the trial beta into a relic
//! abundance. Each constraint is a configuration value consumed by the
//! shared [`Constraint::evaluate`].

use serde::Serialize;
use units::{Mass, PLANCK_MASS_G};

use collapse::{relic_abundance, Branch, Outcome, RelicError, SolverOptions};
use cosmo::constants::GAM_RAD;
use cosmo::data;
use cosmo::formation::DomainError;

use crate::bound::Bound;

/// How a window assigns its trial beta, before the √γ normalisation
/// shared by every constraint.
#[derive(Debug, Clone, Copy)]
pub enum BetaRule {
    /// `amplitude · (M / pivot)^exponent`
    PowerLaw {
        amplitude: f64,
        pivot_g: f64,
        exponent: f64,
    },
    /// A constant trial beta.
    Constant(f64),
    /// The digitised abundance-table row covering the mass.
    Tabulated,
}

impl BetaRule {
    /// Trial beta for `mass`, in the reported √γ normalisation.
    fn trial_beta(&self, mass: Mass) -> f64 {
        let raw = match *self {
            BetaRule::PowerLaw {
                amplitude,
                pivot_g,
                exponent,
            } => amplitude * (mass.to_grams() / pivot_g).powf(exponent),
            BetaRule::Constant(value) => value,
            BetaRule::Tabulated => data::abundance_bound(mass.to_grams()),
        };
        raw / GAM_RAD.sqrt()
    }
}

/// One applicability interval of a constraint.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    /// Lower mass edge in grams.
    pub lo_g: f64,
    /// Upper mass edge in grams (exclusive).
    pub hi_g: f64,
    /// Whether the lower edge itself belongs to the window.
    pub lo_inclusive: bool,
    /// Trial-beta assignment inside this window.
    pub rule: BetaRule,
}

impl Window {
    fn contains(&self, mass_g: f64) -> bool {
        let above = if self.lo_inclusive {
            mass_g >= self.lo_g
        } else {
            mass_g > self.lo_g
        };
        above && mass_g < self.hi_g
    }
}

/// A named observational constraint.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: &'static str,
    /// Applicability sub-windows, disjoint by construction.
    pub windows: Vec<Window>,
    /// Whether the bound requires evolving the patch to the reference
    /// epoch to recover a relic abundance.
    pub integrates: bool,
}

/// Filtered (mass, beta) pairs for one sub-window.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowSamples {
    pub masses: Vec<Mass>,
    pub betas: Vec<f64>,
}

/// One relic-abundance sample.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RelicSample {
    pub mass: Mass,
    pub omega: f64,
}

/// Everything one constraint produces over a mass grid.
///
/// `betas` and `omegas` are index-aligned with the grid (one entry per
/// grid mass, applicable or not); the remaining fields are the filtered
/// views restricted to the applicable windows.
#[derive(Debug, Clone, Serialize)]
pub struct ConstraintResult {
    pub name: &'static str,
    /// Grid-aligned beta bounds.
    pub betas: Vec<Bound>,
    /// Grid-aligned relic abundances.
    pub omegas: Vec<Bound>,
    /// Filtered (mass, beta) pairs, one entry per sub-window.
    pub windows: Vec<WindowSamples>,
    /// Relic samples whose evolution reached the reference epoch.
    pub reached: Vec<RelicSample>,
    /// Relic samples whose population evaporated to Planck remnants
    /// before the reference epoch.
    pub evaporated: Vec<RelicSample>,
}

impl Constraint {
    /// Present-day dark-matter halo bound. Direct abundance formulas on
    /// both the heavy surviving population and the light Planck-remnant
    /// population; no integration.
    pub fn dm_halo() -> Self {
        Self {
            name: "dm-halo",
            windows: vec![
                Window {
                    lo_g: 4.1e14,
                    hi_g: f64::INFINITY,
                    lo_inclusive: false,
                    rule: BetaRule::PowerLaw {
                        amplitude: 1.86e-18,
                        pivot_g: 1.0e15,
                        exponent: 0.5,
                    },
                },
                Window {
                    lo_g: 0.0,
                    hi_g: 1.0e11 * PLANCK_MASS_G,
                    lo_inclusive: false,
                    rule: BetaRule::PowerLaw {
                        amplitude: 2.0e-28,
                        pivot_g: PLANCK_MASS_G,
                        exponent: 1.5,
                    },
                },
            ],
            integrates: false,
        }
    }

    /// Nucleosynthesis yields. Window 1 follows the digitised table row
    /// by row; window 2 extends the last tabulated row up to 2.5e13 g.
    pub fn bbn() -> Self {
        Self {
            name: "bbn",
            windows: vec![
                Window {
                    lo_g: data::first_mass(),
                    hi_g: data::last_mass(),
                    lo_inclusive: true,
                    rule: BetaRule::Tabulated,
                },
                Window {
                    lo_g: data::last_mass(),
                    hi_g: 2.5e13,
                    lo_inclusive: true,
                    rule: BetaRule::Tabulated,
                },
            ],
            integrates: true,
        }
    }

    /// Particle self-destruction bound: a flat beta over two decades.
    pub fn self_destruction() -> Self {
        Self {
            name: "self-destruction",
            windows: vec![Window {
                lo_g: 1.0e11,
                hi_g: 1.0e13,
                lo_inclusive: false,
                rule: BetaRule::Constant(1.0e-21),
            }],
            integrates: true,
        }
    }

    /// CMB-era annihilation bound.
    pub fn cmb_annihilation() -> Self {
        Self {
            name: "cmb-annihilation",
            windows: vec![Window {
                lo_g: 2.5e13,
                hi_g: 2.4e14,
                lo_inclusive: false,
                rule: BetaRule::PowerLaw {
                    amplitude: 3.0e-30,
                    pivot_g: 1.0e13,
                    exponent: 3.1,
                },
            }],
            integrates: true,
        }
    }

    /// Gamma-ray-burst bound: a falling branch below the
    /// evaporating-today mass and a rising branch above it.
    pub fn grb() -> Self {
        Self {
            name: "grb",
            windows: vec![
                Window {
                    lo_g: 3.0e13,
                    hi_g: 4.1e14,
                    lo_inclusive: false,
                    rule: BetaRule::PowerLaw {
                        amplitude: 5.0e-28,
                        pivot_g: 4.1e14,
                        exponent: -3.3,
                    },
                },
                Window {
                    lo_g: 4.1e14,
                    hi_g: 7.0e16,
                    lo_inclusive: false,
                    rule: BetaRule::PowerLaw {
                        amplitude: 5.0e-26,
                        pivot_g: 4.1e14,
                        exponent: 3.9,
                    },
                },
            ],
            integrates: true,
        }
    }

    /// Reionization bound.
    pub fn reionization() -> Self {
        Self {
            name: "reionization",
            windows: vec![Window {
                lo_g: 1.0e15,
                hi_g: 1.0e17,
                lo_inclusive: false,
                rule: BetaRule::PowerLaw {
                    amplitude: 2.4e-26,
                    pivot_g: 4.1e14,
                    exponent: 4.3,
                },
            }],
            integrates: true,
        }
    }

    /// Lightest-supersymmetric-particle relic bound.
    pub fn lsp_relic() -> Self {
        Self {
            name: "lsp-relic",
            windows: vec![Window {
                lo_g: 0.0,
                hi_g: 1.0e11,
                lo_inclusive: false,
                rule: BetaRule::PowerLaw {
                    amplitude: 1.0e-18,
                    pivot_g: 1.0e11,
                    exponent: -0.5,
                },
            }],
            integrates: true,
        }
    }

    /// The full battery, in envelope order.
    pub fn all() -> [Constraint; 7] {
        [
            Self::dm_halo(),
            Self::bbn(),
            Self::self_destruction(),
            Self::cmb_annihilation(),
            Self::grb(),
            Self::reionization(),
            Self::lsp_relic(),
        ]
    }

    /// Evaluates this constraint over the full mass grid.
    ///
    /// Every grid mass produces exactly one entry in `betas` and one in
    /// `omegas`, applicable or not, keeping the outputs index-aligned
    /// with the grid. A mass whose integration fails numerically keeps
    /// its beta, reports an inapplicable relic abundance, and is logged;
    /// the batch continues. Invalid physical inputs (a bad
    /// equation-of-state parameter) abort the evaluation instead.
    ///
    /// # Arguments
    ///
    /// * `grid` - Ordered candidate masses
    /// * `omega` - Background equation-of-state parameter
    /// * `opts` - Solver tolerances and limits
    pub fn evaluate(
        &self,
        grid: &[Mass],
        omega: f64,
        opts: &SolverOptions,
    ) -> Result<ConstraintResult, DomainError> {
        let mut result = ConstraintResult {
            name: self.name,
            betas: Vec::with_capacity(grid.len()),
            omegas: Vec::with_capacity(grid.len()),
            windows: vec![WindowSamples::default(); self.windows.len()],
            reached: Vec::new(),
            evaporated: Vec::new(),
        };

        for &mass in grid {
            let mass_g = mass.to_grams();
            let Some(window_idx) = self.windows.iter().position(|w| w.contains(mass_g)) else {
                result.betas.push(Bound::NotApplicable);
                result.omegas.push(Bound::NotApplicable);
                continue;
            };

            let beta = self.windows[window_idx].rule.trial_beta(mass);
            result.betas.push(Bound::Applicable(beta));
            result.windows[window_idx].masses.push(mass);
            result.windows[window_idx].betas.push(beta);

            if !self.integrates {
                result.omegas.push(Bound::NotApplicable);
                continue;
            }

            match relic_abundance(mass, beta, omega, opts) {
                Ok(Outcome::FormsAfterReference) => {
                    result.omegas.push(Bound::NotApplicable);
                }
                Ok(Outcome::Relic {
                    omega: relic,
                    branch,
                }) => {
                    result.omegas.push(Bound::Applicable(relic));
                    let sample = RelicSample { mass, omega: relic };
                    match branch {
                        Branch::ReachedReference => result.reached.push(sample),
                        Branch::EvaporatedBeforeReference => result.evaporated.push(sample),
                    }
                }
                Err(RelicError::Domain(err)) => return Err(err),
                Err(RelicError::Integration(err)) => {
                    tracing::warn!(
                        constraint = self.name,
                        mass_g,
                        error = %err,
                        "relic integration failed; reporting no abundance for this mass"
                    );
                    result.omegas.push(Bound::NotApplicable);
                }
            }
        }

        Ok(result)
    }
}
