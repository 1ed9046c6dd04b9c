use super::classify::classify_records;
use super::read_dataset_file;
use crate::config::ParallelConfig;
use crate::dataset::{AnnotatedRecord, PatternRecord};
use crate::progress::ProgressConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

pub struct AnnotateConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub parallel: ParallelConfig,
    pub progress: ProgressConfig,
}

/// Write one `{"pattern", "steps", "dov"}` line per valid record.
pub fn annotate_dataset(config: AnnotateConfig) -> Result<()> {
    let dataset = read_dataset_file(&config.input)?;
    let records: Vec<&PatternRecord> = dataset.patterns().collect();
    let classifications = classify_records(&records, &config.parallel, &config.progress);

    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;
    let mut writer = BufWriter::new(file);
    for classification in classifications {
        let annotated = AnnotatedRecord {
            pattern: classification.pattern,
            steps: classification.steps,
            dov: classification.dov,
        };
        serde_json::to_writer(&mut writer, &annotated)?;
        writeln!(writer)?;
    }
    writer.flush()?;

    log::info!(
        "Annotated {} patterns into {}",
        records.len(),
        config.output.display()
    );
    Ok(())
}
