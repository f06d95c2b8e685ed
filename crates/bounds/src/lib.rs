//! Observational constraints on the primordial-black-hole abundance.
//!
//! Builds the candidate mass grid, evaluates the seven constraint
//! configurations over it (each assigning trial betas inside its mass
//! windows and evolving the patch to the reference epoch where needed),
//! and reduces the per-constraint curves to the enveloping minimum-beta
//! bound.

pub mod bound;
pub mod constraint;
pub mod envelope;
pub mod grid;
pub mod pipeline;

#[cfg(test)]
mod pipeline_test;

pub use bound::Bound;
pub use constraint::{BetaRule, Constraint, ConstraintResult, RelicSample, Window, WindowSamples};
pub use envelope::{combine, EnvelopeError};
pub use grid::{build_grid, GridError, GRID_CEILING_G};
pub use pipeline::{bound_curve, BoundCurve, BoundsError};
