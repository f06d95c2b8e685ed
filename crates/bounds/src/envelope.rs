//! Element-wise envelope over per-constraint bound curves.

use thiserror::Error;

use crate::bound::Bound;

/// Structural failure while combining constraint curves.
#[derive(Debug, Error, PartialEq)]
pub enum EnvelopeError {
    /// No curves were supplied.
    #[error("no constraint curves to combine")]
    Empty,
    /// A curve's length disagrees with the grid length, which means an
    /// evaluator upstream broke index alignment.
    #[error("constraint curve {index} has length {found}, expected {expected}")]
    ShapeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Element-wise minimum over equally long bound curves.
///
/// Inapplicable entries are skipped; an index where no constraint
/// applies stays inapplicable in the envelope.
///
/// # Errors
///
/// [`EnvelopeError::ShapeMismatch`] if any curve's length differs from
/// the first curve's length. This is fatal: it indicates a pipeline
/// invariant violation, not a numerical problem.
pub fn combine(curves: &[&[Bound]]) -> Result<Vec<Bound>, EnvelopeError> {
    let first = curves.first().ok_or(EnvelopeError::Empty)?;
    let expected = first.len();
    for (index, curve) in curves.iter().enumerate() {
        if curve.len() != expected {
            return Err(EnvelopeError::ShapeMismatch {
                index,
                expected,
                found: curve.len(),
            });
        }
    }

    Ok((0..expected)
        .map(|i| {
            curves
                .iter()
                .fold(Bound::NotApplicable, |acc, curve| acc.min(curve[i]))
        })
        .collect())
}
