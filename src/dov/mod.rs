//! Degree of Vulnerability: the growth class of matching cost.

pub mod classifier;
pub mod ordering;

pub use classifier::{classify, classify_with, ClassificationObserver, NoopObserver, TraceEvent};
pub use ordering::{compare, increased, le};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest polynomial degree kept by [`Dov::trim`].
pub const MAX_REPORTED_DEGREE: u32 = 5;

/// Exponential base every exponential class is reported as.
pub const REPORTED_BASE: u32 = 2;

/// Inferred asymptotic growth of matching cost against pump length.
///
/// `Polynomial` is expected to carry a degree of at least 2 and
/// `Exponential` a base of at least 2; build polynomial classes from a raw
/// degree with [`Dov::polynomial`]. A hand-built `Polynomial(0)` or
/// `Polynomial(1)` compares unequal to `Constant`/`Linear` under `==`, but
/// displays, trims and orders as them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DovRepr", into = "DovRepr")]
pub enum Dov {
    Constant,
    Linear,
    Polynomial(u32),
    Exponential(u32),
    /// Growth matched no recognized class.
    Unknown,
    /// Too few samples to classify.
    Failed,
}

/// Every class a trimmed value can take, in report column order.
pub const REPORT_ALPHABET: [Dov; 9] = [
    Dov::Constant,
    Dov::Linear,
    Dov::Polynomial(2),
    Dov::Polynomial(3),
    Dov::Polynomial(4),
    Dov::Polynomial(5),
    Dov::Exponential(REPORTED_BASE),
    Dov::Unknown,
    Dov::Failed,
];

impl Dov {
    /// Polynomial class of the given degree; 0 and 1 collapse to
    /// `Constant` and `Linear`.
    pub fn polynomial(degree: u32) -> Self {
        match degree {
            0 => Dov::Constant,
            1 => Dov::Linear,
            d => Dov::Polynomial(d),
        }
    }

    /// Degree when the class is polynomial, counting `Constant` as 0 and
    /// `Linear` as 1.
    pub fn polynomial_degree(&self) -> Option<u32> {
        match self {
            Dov::Constant => Some(0),
            Dov::Linear => Some(1),
            Dov::Polynomial(d) => Some(*d),
            _ => None,
        }
    }

    pub fn is_polynomial(&self) -> bool {
        self.polynomial_degree().is_some()
    }

    pub fn is_exponential(&self) -> bool {
        matches!(self, Dov::Exponential(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Dov::Unknown)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Dov::Failed)
    }

    /// Super-linear growth.
    pub fn is_vulnerable(&self) -> bool {
        matches!(self, Dov::Polynomial(_) | Dov::Exponential(_))
    }

    /// Cap the class into [`REPORT_ALPHABET`].
    pub fn trim(self) -> Self {
        match self {
            Dov::Polynomial(d) => Dov::polynomial(d.min(MAX_REPORTED_DEGREE)),
            Dov::Exponential(_) => Dov::Exponential(REPORTED_BASE),
            other => other,
        }
    }

    /// Column of the trimmed class in [`REPORT_ALPHABET`].
    pub fn report_index(self) -> usize {
        match self.trim() {
            Dov::Constant => 0,
            Dov::Linear => 1,
            Dov::Polynomial(d) => d as usize,
            Dov::Exponential(_) => 6,
            Dov::Unknown => 7,
            Dov::Failed => 8,
        }
    }
}

impl fmt::Display for Dov {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dov::Constant => write!(f, "O(1)"),
            Dov::Linear => write!(f, "O(n)"),
            Dov::Polynomial(d @ (0 | 1)) => fmt::Display::fmt(&Dov::polynomial(*d), f),
            Dov::Polynomial(d) => write!(f, "O(n^{})", d),
            Dov::Exponential(b) => write!(f, "O({}^n)", b),
            Dov::Unknown => write!(f, "UNK"),
            Dov::Failed => write!(f, "FAILED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DovKind {
    Polynomial,
    Exponential,
    Unknown,
    Failed,
}

/// Wire shape: `{"type": "...", "degree": k | null}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct DovRepr {
    #[serde(rename = "type")]
    kind: DovKind,
    #[serde(default)]
    degree: Option<u32>,
}

impl From<Dov> for DovRepr {
    fn from(dov: Dov) -> Self {
        let (kind, degree) = match dov {
            Dov::Exponential(b) => (DovKind::Exponential, Some(b)),
            Dov::Unknown => (DovKind::Unknown, None),
            Dov::Failed => (DovKind::Failed, None),
            poly => (DovKind::Polynomial, poly.polynomial_degree()),
        };
        DovRepr { kind, degree }
    }
}

impl TryFrom<DovRepr> for Dov {
    type Error = String;

    fn try_from(repr: DovRepr) -> Result<Self, Self::Error> {
        match (repr.kind, repr.degree) {
            (DovKind::Polynomial, Some(d)) => Ok(Dov::polynomial(d)),
            (DovKind::Exponential, Some(b)) if b >= 2 => Ok(Dov::Exponential(b)),
            (DovKind::Exponential, Some(b)) => Err(format!("exponential base {} is below 2", b)),
            (DovKind::Unknown, None) => Ok(Dov::Unknown),
            (DovKind::Failed, None) => Ok(Dov::Failed),
            (kind, None) => Err(format!("{:?} class requires a degree", kind)),
            (kind, Some(_)) => Err(format!("{:?} class takes no degree", kind)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_polynomial_collapses_low_degrees() {
        assert_eq!(Dov::polynomial(0), Dov::Constant);
        assert_eq!(Dov::polynomial(1), Dov::Linear);
        assert_eq!(Dov::polynomial(3), Dov::Polynomial(3));
    }

    #[test]
    fn test_display_forms() {
        let rendered: Vec<String> = REPORT_ALPHABET.iter().map(|d| d.to_string()).collect();
        assert_eq!(
            rendered,
            vec!["O(1)", "O(n)", "O(n^2)", "O(n^3)", "O(n^4)", "O(n^5)", "O(2^n)", "UNK", "FAILED"]
        );
        assert_eq!(Dov::Exponential(3).to_string(), "O(3^n)");
    }

    #[test]
    fn test_trim() {
        assert_eq!(Dov::Polynomial(9).trim(), Dov::Polynomial(5));
        assert_eq!(Dov::Polynomial(4).trim(), Dov::Polynomial(4));
        assert_eq!(Dov::Exponential(10).trim(), Dov::Exponential(2));
        assert_eq!(Dov::Linear.trim(), Dov::Linear);
        assert_eq!(Dov::Failed.trim(), Dov::Failed);
    }

    #[test]
    fn test_hand_built_low_degrees_behave_as_collapsed() {
        assert_eq!(Dov::Polynomial(1).to_string(), "O(n)");
        assert_eq!(Dov::Polynomial(0).to_string(), "O(1)");
        assert_eq!(Dov::Polynomial(1).trim(), Dov::Linear);
        assert_eq!(Dov::Polynomial(0).report_index(), 0);
        assert_eq!(
            compare(Dov::Polynomial(1), Dov::Linear),
            Some(std::cmp::Ordering::Equal)
        );
    }

    #[test]
    fn test_report_index_matches_alphabet() {
        for (index, dov) in REPORT_ALPHABET.iter().enumerate() {
            assert_eq!(dov.report_index(), index);
        }
        assert_eq!(Dov::Polynomial(12).report_index(), 5);
        assert_eq!(Dov::Exponential(7).report_index(), 6);
    }

    #[test]
    fn test_vulnerable_classes() {
        assert!(!Dov::Linear.is_vulnerable());
        assert!(Dov::Polynomial(2).is_vulnerable());
        assert!(Dov::Exponential(2).is_vulnerable());
        assert!(!Dov::Unknown.is_vulnerable());
    }

    #[test]
    fn test_serialize_shape() {
        assert_eq!(
            serde_json::to_string(&Dov::Linear).unwrap(),
            r#"{"type":"polynomial","degree":1}"#
        );
        assert_eq!(
            serde_json::to_string(&Dov::Exponential(3)).unwrap(),
            r#"{"type":"exponential","degree":3}"#
        );
        assert_eq!(
            serde_json::to_string(&Dov::Unknown).unwrap(),
            r#"{"type":"unknown","degree":null}"#
        );
    }

    #[test]
    fn test_deserialize_normalizes_and_validates() {
        let linear: Dov = serde_json::from_str(r#"{"type":"polynomial","degree":1}"#).unwrap();
        assert_eq!(linear, Dov::Linear);
        let failed: Dov = serde_json::from_str(r#"{"type":"failed"}"#).unwrap();
        assert_eq!(failed, Dov::Failed);
        assert!(serde_json::from_str::<Dov>(r#"{"type":"exponential","degree":null}"#).is_err());
        assert!(serde_json::from_str::<Dov>(r#"{"type":"exponential","degree":1}"#).is_err());
        assert!(serde_json::from_str::<Dov>(r#"{"type":"unknown","degree":4}"#).is_err());
    }
}
