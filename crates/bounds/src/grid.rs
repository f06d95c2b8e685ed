//! Candidate PBH mass grid.
//!
//! The grid is anchored to the digitised abundance table: log-spaced
//! extrapolation below the first tabulated mass, the tabulated masses
//! verbatim, and log-spaced extrapolation above the last tabulated mass
//! up to the formation-mass ceiling.

use thiserror::Error;
use units::Mass;

use cosmo::data;

/// Upper end of the candidate formation-mass range in grams.
pub const GRID_CEILING_G: f64 = 1.0e20;

/// Invalid grid construction input.
#[derive(Debug, Error, PartialEq)]
pub enum GridError {
    /// The log-spacing resolution must be a positive finite number.
    #[error("log-spacing resolution must be positive and finite, got {0}")]
    InvalidResolution(f64),
}

/// Builds the ordered candidate mass grid for a log-spacing `resolution`
/// in decades.
///
/// Deterministic for a given resolution and data table; strictly
/// increasing with no duplicates. Consecutive below-anchor entries have
/// the exact ratio 10^resolution; every tabulated mass appears verbatim;
/// the final entry is the first extrapolated mass at or above
/// [`GRID_CEILING_G`].
///
/// # Examples
///
/// ```rust
/// use bounds::build_grid;
///
/// let grid = build_grid(0.5).unwrap();
/// assert!(grid.windows(2).all(|w| w[0] < w[1]));
/// assert!(grid.last().unwrap().to_grams() >= 1.0e20);
/// ```
pub fn build_grid(resolution: f64) -> Result<Vec<Mass>, GridError> {
    if !resolution.is_finite() || resolution <= 0.0 {
        return Err(GridError::InvalidResolution(resolution));
    }

    let anchor = data::first_mass();
    let mut grid = Vec::new();

    // Below the anchor: powers 10^(i·r) strictly below the table.
    let mut i = 0u32;
    loop {
        let m = 10.0_f64.powf(f64::from(i) * resolution);
        if m >= anchor {
            break;
        }
        grid.push(Mass::from_grams(m));
        i += 1;
    }

    // The tabulated support, verbatim.
    grid.extend(data::BBN_TABLE.iter().map(|&(m, _)| Mass::from_grams(m)));

    // Above the anchor: log-spaced from the last tabulated mass until
    // the ceiling is reached (inclusive).
    let top = data::BBN_TABLE[data::BBN_TABLE.len() - 1].0;
    let mut j = 1u32;
    loop {
        let m = top * 10.0_f64.powf(f64::from(j) * resolution);
        grid.push(Mass::from_grams(m));
        if m >= GRID_CEILING_G {
            break;
        }
        j += 1;
    }

    Ok(grid)
}
