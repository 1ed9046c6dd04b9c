use super::read_dataset_file;
use crate::dataset::{masked_input_values, pair_records, InputKind, PatternRecord};
use crate::io::{self, output::OutputFormat};
use crate::report::{InputIncrease, PatternIncrease, StepIncreaseReport};
use crate::steps::{step_increases, Measure};
use anyhow::Result;
use std::path::PathBuf;

pub struct CompareStepsConfig {
    pub before: PathBuf,
    pub after: PathBuf,
    pub kind: InputKind,
    pub threshold: u64,
    pub measure: Measure,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Inputs on which `after` needs more than `threshold` extra steps.
///
/// Only inputs that produced a value in both runs are compared. `None`
/// when either record lacks the input list or nothing grew.
pub fn pattern_increase(
    before: &PatternRecord,
    after: &PatternRecord,
    kind: InputKind,
    measure: Measure,
    threshold: u64,
) -> Option<PatternIncrease> {
    let masked = masked_input_values(&[before, after], kind, measure)?;
    let inputs = before.inputs_for(kind).unwrap_or(&[]);

    let increases: Vec<InputIncrease> = step_increases(&masked[0], &masked[1], threshold)
        .into_iter()
        .map(|increase| InputIncrease {
            input: inputs.get(increase.index).cloned(),
            increase,
        })
        .collect();

    if increases.is_empty() {
        return None;
    }
    Some(PatternIncrease {
        pattern: before.pattern.clone(),
        increases,
    })
}

pub fn compare_steps(config: CompareStepsConfig) -> Result<()> {
    let before = read_dataset_file(&config.before)?;
    let after = read_dataset_file(&config.after)?;

    let patterns: Vec<PatternIncrease> = pair_records(&before, &after)
        .into_iter()
        .filter_map(|(b, a)| pattern_increase(b, a, config.kind, config.measure, config.threshold))
        .inspect(|increase| {
            log::info!(
                "{:?}: steps increased on {} {} inputs",
                increase.pattern,
                increase.increases.len(),
                config.kind.label()
            )
        })
        .collect();

    let report = StepIncreaseReport {
        before: config.before.display().to_string(),
        after: config.after.display().to_string(),
        generated_at: chrono::Utc::now(),
        kind: config.kind,
        threshold: config.threshold,
        patterns,
    };

    let out = io::open_output(config.output.as_deref())?;
    let mut writer = io::output::create_writer(config.format, out);
    writer.write_step_increases(&report)
}
