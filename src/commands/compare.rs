use super::{map_items, read_dataset_file};
use crate::aggregate::ContingencyTable;
use crate::commands::classify::classify_record;
use crate::config::ParallelConfig;
use crate::dataset::{pair_records, PatternRecord};
use crate::dov::{increased, Dov};
use crate::io::{self, output::OutputFormat};
use crate::progress::ProgressConfig;
use crate::report::ContingencyReport;
use anyhow::Result;
use std::path::PathBuf;

pub struct CompareConfig {
    pub before: PathBuf,
    pub after: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub parallel: ParallelConfig,
    pub progress: ProgressConfig,
}

/// Classes of paired records, logging every pattern that got worse.
pub fn compare_pairs(
    pairs: &[(&PatternRecord, &PatternRecord)],
    parallel: &ParallelConfig,
    progress: &ProgressConfig,
) -> Vec<(Dov, Dov)> {
    let classified = map_items(pairs, parallel, progress, "Comparing", |(before, after)| {
        (classify_record(before), classify_record(after))
    });

    classified
        .into_iter()
        .map(|(before, after)| {
            if increased(before.dov, after.dov) {
                log::warn!(
                    "{:?}: vulnerability increased from {} to {}",
                    before.pattern,
                    before.dov,
                    after.dov
                );
            }
            (before.dov, after.dov)
        })
        .collect()
}

pub fn compare_datasets(config: CompareConfig) -> Result<()> {
    let before = read_dataset_file(&config.before)?;
    let after = read_dataset_file(&config.after)?;
    let pairs = pair_records(&before, &after);
    log::info!("Comparing {} paired patterns", pairs.len());

    let table = ContingencyTable::from_pairs(compare_pairs(&pairs, &config.parallel, &config.progress));
    let report = ContingencyReport {
        before: config.before.display().to_string(),
        after: config.after.display().to_string(),
        generated_at: chrono::Utc::now(),
        summary: table.summary(),
        table,
    };

    let out = io::open_output(config.output.as_deref())?;
    let mut writer = io::output::create_writer(config.format, out);
    writer.write_contingency(&report)
}
