//! Severity order over [`Dov`] values.
//!
//! `Dov` does not implement `PartialOrd`. The order has carve-outs for
//! indeterminate classes:
//!
//! - `Failed ≤ x` only for `x = Failed`.
//! - `Unknown ≤ x` only for `x ∈ {Unknown, Failed}`.
//! - No determinate class is `≤ Unknown` or `≤ Failed`.
//! - Polynomials compare by degree (`Constant` = 0, `Linear` = 1), every
//!   polynomial is below every exponential, exponentials compare by base.

use super::Dov;
use std::cmp::Ordering;

/// Severity rank of a determinate class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Severity {
    Polynomial(u32),
    Exponential(u32),
}

fn severity(dov: Dov) -> Option<Severity> {
    match dov {
        Dov::Exponential(b) => Some(Severity::Exponential(b)),
        Dov::Unknown | Dov::Failed => None,
        poly => poly.polynomial_degree().map(Severity::Polynomial),
    }
}

/// `a ≤ b` in severity.
pub fn le(a: Dov, b: Dov) -> bool {
    match (a, b) {
        (Dov::Failed, b) => b == Dov::Failed,
        (Dov::Unknown, b) => matches!(b, Dov::Unknown | Dov::Failed),
        (a, b) => match (severity(a), severity(b)) {
            (Some(a), Some(b)) => a <= b,
            _ => false,
        },
    }
}

/// Compare two classes, or `None` when they cannot be ranked.
pub fn compare(a: Dov, b: Dov) -> Option<Ordering> {
    match (le(a, b), le(b, a)) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => None,
    }
}

/// Whether vulnerability strictly increased from `before` to `after`.
pub fn increased(before: Dov, after: Dov) -> bool {
    compare(before, after) == Some(Ordering::Less)
}
