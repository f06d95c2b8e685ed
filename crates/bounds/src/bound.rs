use serde::{Deserialize, Serialize};

/// Per-mass result of one constraint.
///
/// Either a numeric beta (or relic-abundance) bound, or an explicit
/// marker that the constraint does not apply at that mass. Keeping the
/// marker out of the numeric domain means the envelope minimum can skip
/// it instead of depending on the magnitude of a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Bound {
    /// The constraint applies and yields this value.
    Applicable(f64),
    /// The mass lies outside every window of the constraint.
    NotApplicable,
}

impl Bound {
    /// The numeric value, if the constraint applies.
    pub fn value(&self) -> Option<f64> {
        match self {
            Bound::Applicable(v) => Some(*v),
            Bound::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Bound::Applicable(_))
    }

    /// Minimum of two bounds; inapplicable entries lose to any value.
    pub fn min(self, other: Bound) -> Bound {
        match (self, other) {
            (Bound::Applicable(a), Bound::Applicable(b)) => Bound::Applicable(a.min(b)),
            (Bound::Applicable(a), Bound::NotApplicable) => Bound::Applicable(a),
            (Bound::NotApplicable, other) => other,
        }
    }
}
