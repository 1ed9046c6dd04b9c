//! Engine instrumentation records.
//!
//! The matching engine reports, for every run, one counter line per
//! operation category followed by a few summary lines:
//!
//! ```text
//! MATCH: 1 (FAILED: 0)
//! CHAR: 12 (FAILED: 1)
//! PRED: 4 (FAILED: 0)
//! MEMO: 3 (FAILED: 1)
//! NUMBER OF TRANSITIONS ELIMINATED FROM FLATTENING: 0
//! NUMBER OF STATES MEMOISED: 2
//! TOTAL THREADS IN POOL: 5
//! ```
//!
//! [`parse_output`] turns that text into a [`CounterRecord`].

mod parser;

pub use parser::{parse, parse_output, ParseError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CHAR: &str = "CHAR";
pub const PRED: &str = "PRED";
pub const MEMO: &str = "MEMO";
pub const STATE: &str = "STATE";
pub const MATCH: &str = "MATCH";

/// Total and failed count for one operation category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub total: u64,
    pub failed: u64,
}

impl CategoryCount {
    pub fn new(total: u64, failed: u64) -> Self {
        Self { total, failed }
    }

    /// Operations of this category that did not fail.
    pub fn succeeded(&self) -> u64 {
        self.total.saturating_sub(self.failed)
    }
}

/// Instrumentation of a single engine run.
///
/// Categories that are not needed by any derived field are still kept, so a
/// record can be re-serialized without losing information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    pub categories: BTreeMap<String, CategoryCount>,
    /// Transitions eliminated by flattening.
    pub eliminated: u64,
    /// States memoised.
    pub memoised: u64,
    /// Threads in the pool.
    pub threads: u64,
}

impl CounterRecord {
    pub fn category(&self, label: &str) -> Option<CategoryCount> {
        self.categories.get(label).copied()
    }

    fn require(&self, label: &'static str) -> Result<CategoryCount, ParseError> {
        self.category(label)
            .ok_or(ParseError::MissingCategory { label })
    }

    /// Matching work of the run: consumed characters plus evaluated
    /// predicates.
    pub fn step(&self) -> Result<u64, ParseError> {
        let chars = self.require(CHAR)?;
        let preds = self.require(PRED)?;
        Ok(chars.total.saturating_add(preds.total))
    }

    /// Successful memo-table insertions.
    pub fn memo_entry(&self) -> Result<u64, ParseError> {
        Ok(self.require(MEMO)?.succeeded())
    }

    pub fn state(&self) -> Result<u64, ParseError> {
        Ok(self.require(STATE)?.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(entries: &[(&str, u64, u64)]) -> CounterRecord {
        CounterRecord {
            categories: entries
                .iter()
                .map(|(label, total, failed)| (label.to_string(), CategoryCount::new(*total, *failed)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_step_sums_char_and_pred() {
        let r = record(&[("CHAR", 12, 1), ("PRED", 4, 0), ("MEMO", 3, 1)]);
        assert_eq!(r.step().unwrap(), 16);
        assert_eq!(r.memo_entry().unwrap(), 2);
    }

    #[test]
    fn test_missing_category_is_recoverable() {
        let r = record(&[("CHAR", 12, 1)]);
        assert_eq!(r.step(), Err(ParseError::MissingCategory { label: PRED }));
        assert!(r.memo_entry().is_err());
        assert!(r.state().is_err());
    }

    #[test]
    fn test_memo_entry_saturates() {
        let r = record(&[("MEMO", 1, 4)]);
        assert_eq!(r.memo_entry().unwrap(), 0);
    }
}
