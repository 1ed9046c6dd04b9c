//! CLI command implementations for dovmap.
//!
//! Available commands:
//! - **classify**: Frequency table of the patterns' degrees of vulnerability
//! - **annotate**: Write each pattern with its sequence and classification
//! - **compare**: Contingency table between two runs over the same patterns
//! - **steps**: Statistics of average steps on positive and negative inputs
//! - **compare-steps**: Patterns whose steps grew between two runs
//! - **append**: Write masked per-input steps back into each run's dataset
//! - **init**: Initialize a new dovmap configuration file

pub mod annotate;
pub mod append;
pub mod classify;
pub mod compare;
pub mod compare_steps;
pub mod init;
pub mod steps;

pub use annotate::{annotate_dataset, AnnotateConfig};
pub use append::{append_measures, AppendConfig};
pub use classify::{classify_dataset, classify_record, Classification, ClassifyConfig};
pub use compare::{compare_datasets, CompareConfig};
pub use compare_steps::{compare_steps, CompareStepsConfig};
pub use init::init_config;
pub use steps::{summarize_steps, StepsConfig};

use crate::config::ParallelConfig;
use crate::dataset::{load_dataset, Dataset};
use crate::progress::ProgressConfig;
use anyhow::{Context, Result};
use indicatif::{ParallelProgressIterator, ProgressIterator};
use rayon::prelude::*;
use std::path::Path;

fn read_dataset_file(path: &Path) -> Result<Dataset> {
    let dataset = load_dataset(path)
        .with_context(|| format!("Failed to read dataset {}", path.display()))?;
    log::info!(
        "Loaded {} records from {} ({} skipped)",
        dataset.len(),
        path.display(),
        dataset.skipped.len()
    );
    Ok(dataset)
}

/// Apply `f` to every item, on the rayon pool unless parallelism is
/// disabled. Results keep the order of `items`.
fn map_items<T, R, F>(
    items: &[T],
    parallel: &ParallelConfig,
    progress: &ProgressConfig,
    message: &str,
    f: F,
) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> R + Sync + Send,
{
    let bar = progress.create_bar(items.len() as u64, message);
    let results = if parallel.enabled {
        items.par_iter().progress_with(bar.clone()).map(&f).collect()
    } else {
        items.iter().progress_with(bar.clone()).map(&f).collect()
    };
    bar.finish_and_clear();
    results
}
