//! Batch driver: every constraint over the full grid, then the envelope.

use serde::Serialize;
use thiserror::Error;
use units::Mass;

use collapse::SolverOptions;
use cosmo::formation::DomainError;

use crate::bound::Bound;
use crate::constraint::{Constraint, ConstraintResult};
use crate::envelope::{combine, EnvelopeError};

/// The combined result of one full constraint pass.
#[derive(Debug, Clone, Serialize)]
pub struct BoundCurve {
    /// Grid-aligned minimum beta over all constraints.
    pub envelope: Vec<Bound>,
    /// The per-constraint results the envelope was reduced from.
    pub constraints: Vec<ConstraintResult>,
}

/// Failure of a full constraint pass.
#[derive(Debug, Error)]
pub enum BoundsError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Evaluates the full constraint battery over `grid` and reduces the
/// per-constraint beta curves to the enveloping minimum-beta bound.
///
/// # Arguments
///
/// * `grid` - Ordered candidate masses from [`crate::build_grid`]
/// * `omega` - Background equation-of-state parameter
/// * `opts` - Solver tolerances and limits
///
/// # Examples
///
/// ```rust
/// use bounds::{bound_curve, build_grid};
/// use collapse::SolverOptions;
///
/// let grid = build_grid(2.0).unwrap();
/// let curve = bound_curve(&grid, 1.0 / 3.0, &SolverOptions::default()).unwrap();
/// assert_eq!(curve.envelope.len(), grid.len());
/// ```
pub fn bound_curve(
    grid: &[Mass],
    omega: f64,
    opts: &SolverOptions,
) -> Result<BoundCurve, BoundsError> {
    let mut results = Vec::with_capacity(7);
    for constraint in Constraint::all() {
        tracing::debug!(
            constraint = constraint.name,
            masses = grid.len(),
            "evaluating constraint"
        );
        results.push(constraint.evaluate(grid, omega, opts)?);
    }

    let curves: Vec<&[Bound]> = results.iter().map(|r| r.betas.as_slice()).collect();
    let envelope = combine(&curves)?;

    Ok(BoundCurve {
        envelope,
        constraints: results,
    })
}
