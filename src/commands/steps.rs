use super::read_dataset_file;
use crate::aggregate::{mean_of, SummaryStatistics};
use crate::dataset::{Dataset, InputKind};
use crate::io::{self, output::OutputFormat};
use crate::report::{StepGroup, StepStatisticsReport};
use crate::steps::{input_steps, Measure};
use anyhow::Result;
use std::path::PathBuf;

pub struct StepsConfig {
    pub input: PathBuf,
    pub measure: Measure,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Average value per pattern over one input list.
///
/// Patterns without that list are ignored. A pattern whose list was
/// rejected, or measured nothing, counts as failed.
pub fn step_group(dataset: &Dataset, kind: InputKind, measure: Measure) -> StepGroup {
    let mut failed = 0;
    let mut averages = Vec::new();

    for record in dataset.patterns() {
        let Some(values) = record.input_values(kind, measure) else {
            continue;
        };
        let inputs = record.inputs_for(kind).unwrap_or(&[]);
        match input_steps(inputs, &values).as_deref().and_then(mean_of) {
            Some(average) => averages.push(average),
            None => {
                log::debug!("{:?}: no usable {} runs", record.pattern, kind.label());
                failed += 1;
            }
        }
    }

    StepGroup {
        kind,
        failed,
        statistics: SummaryStatistics::from_samples(&averages),
    }
}

pub fn summarize_steps(config: StepsConfig) -> Result<()> {
    let dataset = read_dataset_file(&config.input)?;
    let report = StepStatisticsReport {
        source: config.input.display().to_string(),
        generated_at: chrono::Utc::now(),
        measure: config.measure,
        groups: [InputKind::Positive, InputKind::Negative]
            .into_iter()
            .map(|kind| step_group(&dataset, kind, config.measure))
            .collect(),
    };

    let out = io::open_output(config.output.as_deref())?;
    let mut writer = io::output::create_writer(config.format, out);
    writer.write_step_statistics(&report)
}
