use super::{map_items, read_dataset_file};
use crate::aggregate::FrequencyTable;
use crate::config::ParallelConfig;
use crate::dataset::PatternRecord;
use crate::dov::{classify_with, Dov, TraceEvent};
use crate::io::{self, output::OutputFormat};
use crate::progress::ProgressConfig;
use crate::report::FrequencyReport;
use crate::steps::Measure;
use anyhow::Result;
use std::path::PathBuf;

/// One pattern's step sequence and the class inferred from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub pattern: String,
    pub steps: Vec<u64>,
    pub dov: Dov,
    pub trace: Vec<TraceEvent>,
}

impl Classification {
    /// Report the result at the level it deserves: undetermined growth is a
    /// warning with its trace at debug, super-linear growth is info.
    pub fn log(&self) {
        match self.dov {
            Dov::Unknown => {
                log::warn!("{:?}: growth undetermined for steps {:?}", self.pattern, self.steps);
                for event in &self.trace {
                    log::debug!("{:?}: {:?}", self.pattern, event);
                }
            }
            dov if dov.is_vulnerable() => {
                log::info!("{:?}: {}", self.pattern, dov);
            }
            dov => log::trace!("{:?}: {}", self.pattern, dov),
        }
    }
}

/// Classify the step sequence of a record. Records without a sequence
/// classify as [`Dov::Failed`].
pub fn classify_record(record: &PatternRecord) -> Classification {
    let steps = record.sequence(Measure::Step).unwrap_or_default();
    let mut trace = Vec::new();
    let dov = classify_with(&steps, &mut trace);
    Classification {
        pattern: record.pattern.clone(),
        steps,
        dov,
        trace,
    }
}

pub(super) fn classify_records(
    records: &[&PatternRecord],
    parallel: &ParallelConfig,
    progress: &ProgressConfig,
) -> Vec<Classification> {
    let classifications = map_items(records, parallel, progress, "Classifying", |record| {
        classify_record(record)
    });
    classifications.iter().for_each(Classification::log);
    classifications
}

pub struct ClassifyConfig {
    pub input: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub parallel: ParallelConfig,
    pub progress: ProgressConfig,
}

pub fn classify_dataset(config: ClassifyConfig) -> Result<()> {
    let dataset = read_dataset_file(&config.input)?;
    let records: Vec<&PatternRecord> = dataset.patterns().collect();
    let classifications = classify_records(&records, &config.parallel, &config.progress);

    let report = FrequencyReport {
        source: config.input.display().to_string(),
        generated_at: chrono::Utc::now(),
        table: FrequencyTable::from_dovs(classifications.iter().map(|c| c.dov)),
        skipped: dataset.skipped.len(),
    };

    let out = io::open_output(config.output.as_deref())?;
    let mut writer = io::output::create_writer(config.format, out);
    writer.write_frequency(&report)
}
