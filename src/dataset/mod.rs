//! JSON-lines benchmark datasets.

mod reader;
mod record;

pub use reader::{load_dataset, parse_line, read_dataset, Dataset, NumberedRecord};
pub use record::{AnnotatedRecord, InputKind, PatternRecord, RawOutput};

use crate::steps::{mask_across_configurations, Measure, RunValue};
use std::collections::HashMap;

/// Records found at the same line, with the same pattern, in every dataset.
///
/// Records are matched by line number, so a line skipped in one dataset does
/// not shift the rest. Lines whose patterns differ are logged and dropped.
/// Each entry holds the line and one record per dataset, in dataset order.
pub fn align_records<'a>(datasets: &[&'a Dataset]) -> Vec<(usize, Vec<&'a PatternRecord>)> {
    let Some((&first, rest)) = datasets.split_first() else {
        return Vec::new();
    };
    let by_line: Vec<HashMap<usize, &'a PatternRecord>> = rest
        .iter()
        .map(|&dataset| {
            dataset
                .records
                .iter()
                .map(|numbered| (numbered.line, &numbered.record))
                .collect()
        })
        .collect();

    first
        .records
        .iter()
        .filter_map(|numbered| {
            let mut aligned = Vec::with_capacity(datasets.len());
            aligned.push(&numbered.record);
            for others in &by_line {
                let other = *others.get(&numbered.line)?;
                if other.pattern != numbered.record.pattern {
                    log::warn!(
                        "Line {}: pattern {:?} does not match {:?}; skipping",
                        numbered.line,
                        numbered.record.pattern,
                        other.pattern
                    );
                    return None;
                }
                aligned.push(other);
            }
            Some((numbered.line, aligned))
        })
        .collect()
}

/// Pair records of two datasets produced from the same pattern list.
pub fn pair_records<'a>(
    before: &'a Dataset,
    after: &'a Dataset,
) -> Vec<(&'a PatternRecord, &'a PatternRecord)> {
    align_records(&[before, after])
        .into_iter()
        .map(|(_, records)| (records[0], records[1]))
        .collect()
}

/// Per-input values of one input list for each configuration's record,
/// keeping a position only when every configuration measured it.
///
/// `None` when some record lacks the list.
pub fn masked_input_values(
    records: &[&PatternRecord],
    kind: InputKind,
    measure: Measure,
) -> Option<Vec<Vec<Option<u64>>>> {
    let runs = records
        .iter()
        .map(|record| {
            record
                .input_values(kind, measure)
                .map(|runs| runs.into_iter().map(RunValue::value).collect())
        })
        .collect::<Option<Vec<Vec<Option<u64>>>>>()?;
    Some(mask_across_configurations(&runs))
}
