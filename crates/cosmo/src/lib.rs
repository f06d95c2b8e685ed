//! Early-universe background for the PBH constraint pipeline.
//!
//! Supplies the fixed physical constants, the digitised nucleosynthesis
//! abundance table, and the formation density model that maps a PBH mass
//! to the radiation density at its formation time.

pub mod constants;
pub mod data;
pub mod formation;

pub use formation::{k_end_over_k, rho_f, DomainError};
