//! Reducing counter records to the scalars used for growth analysis.

pub mod oracle;
pub mod sequence;

pub use oracle::{measure_sequence, StepOracle};
pub use sequence::{
    input_steps, mask_across_configurations, step_increases, truncate_at_first_hole, RunValue,
    StepIncrease,
};

use crate::instrumentation::{CounterRecord, ParseError};
use serde::{Deserialize, Serialize};

/// Which scalar to take from a counter record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum Measure {
    /// Characters consumed plus predicates evaluated.
    #[default]
    Step,
    /// Successful memo-table insertions, a proxy for matcher memory.
    MemoEntry,
}

impl Measure {
    pub fn read(self, record: &CounterRecord) -> Result<u64, ParseError> {
        match self {
            Measure::Step => record.step(),
            Measure::MemoEntry => record.memo_entry(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Measure::Step => "step",
            Measure::MemoEntry => "memo entry",
        }
    }

    /// Singular and plural stems of the dataset fields written by `append`.
    pub fn field_stems(self) -> (&'static str, &'static str) {
        match self {
            Measure::Step => ("step", "steps"),
            Measure::MemoEntry => ("memo_entry", "memo_entries"),
        }
    }
}

/// Step count of a run, or `None` when the run produced no usable record.
pub fn extract(record: Option<&CounterRecord>) -> Option<u64> {
    extract_measure(record, Measure::Step)
}

pub fn extract_measure(record: Option<&CounterRecord>, measure: Measure) -> Option<u64> {
    record.and_then(|r| measure.read(r).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrumentation::parse;

    #[test]
    fn test_extract_absent_record() {
        assert_eq!(extract(None), None);
        assert_eq!(extract_measure(None, Measure::MemoEntry), None);
    }

    #[test]
    fn test_extract_step_and_memo() {
        let record = parse("CHAR: 12 (FAILED: 1)\nPRED: 4 (FAILED: 0)\nMEMO: 3 (FAILED: 1)").unwrap();
        assert_eq!(extract(Some(&record)), Some(16));
        assert_eq!(extract_measure(Some(&record), Measure::MemoEntry), Some(2));
    }

    #[test]
    fn test_extract_incomplete_record() {
        let record = parse("CHAR: 12 (FAILED: 1)").unwrap();
        assert_eq!(extract(Some(&record)), None);
    }
}
