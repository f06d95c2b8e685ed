//! Density evolution of a PBH-laden radiation patch.
//!
//! The core solver of the constraint pipeline: coupled evolution of the
//! scale-factor ratio and elapsed time against decreasing log radiation
//! density, with a terminal evaporation event, and the two-branch
//! conversion of the terminal state into a relic abundance.

pub mod ode;
pub mod relic;
pub mod solver;

#[cfg(test)]
mod ode_test;
#[cfg(test)]
mod solver_test;

pub use ode::{CollapseOde, Regime};
pub use relic::{relic_abundance, Branch, Outcome, RelicError};
pub use solver::{integrate, IntegrationError, Sample, Solution, SolverOptions};
