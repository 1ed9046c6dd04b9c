use super::read_dataset_file;
use crate::aggregate::mean_of;
use crate::dataset::{align_records, masked_input_values, Dataset, InputKind, PatternRecord};
use crate::steps::Measure;
use anyhow::{ensure, Context, Result};
use serde_json::{json, Map, Value};
use std::collections::{HashMap, HashSet};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct AppendConfig {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub measure: Measure,
}

/// Fields to add to each configuration's record of one pattern.
///
/// Per input list: `<kind>_steps` (or `_memo_entries`) holds the per-input
/// values masked across configurations and `avg_<kind>_step` their mean,
/// null when nothing survived the mask. Input lists missing from any record
/// are skipped.
pub fn appended_fields(records: &[&PatternRecord], measure: Measure) -> Vec<Map<String, Value>> {
    let mut fields = vec![Map::new(); records.len()];

    for kind in [InputKind::Positive, InputKind::Negative] {
        let Some(masked) = masked_input_values(records, kind, measure) else {
            continue;
        };
        if let (Some(values), Some(record)) = (masked.first(), records.first()) {
            let dropped = values.iter().filter(|v| v.is_none()).count();
            if dropped > 0 {
                log::debug!(
                    "{:?}: {} {} inputs lack a value in some configuration",
                    record.pattern,
                    dropped,
                    kind.label()
                );
            }
        }

        let (singular, plural) = measure.field_stems();
        for (fields, values) in fields.iter_mut().zip(masked) {
            let present: Vec<u64> = values.iter().flatten().copied().collect();
            fields.insert(format!("avg_{}_{}", kind.label(), singular), json!(mean_of(&present)));
            fields.insert(format!("{}_{}", kind.label(), plural), json!(values));
        }
    }
    fields
}

/// Write every dataset to `output_dir` under its own file name, with the
/// masked per-input values appended to records present in all of them.
///
/// Records are re-serialized from their modelled fields.
pub fn append_measures(config: AppendConfig) -> Result<()> {
    ensure!(!config.inputs.is_empty(), "append needs at least one dataset");
    let outputs = output_paths(&config.inputs, &config.output_dir)?;

    let datasets = config
        .inputs
        .iter()
        .map(|path| read_dataset_file(path))
        .collect::<Result<Vec<Dataset>>>()?;
    let refs: Vec<&Dataset> = datasets.iter().collect();

    let mut appended: HashMap<(usize, usize), Map<String, Value>> = HashMap::new();
    let aligned = align_records(&refs);
    for (line, records) in &aligned {
        for (index, fields) in appended_fields(records, config.measure)
            .into_iter()
            .enumerate()
        {
            appended.insert((index, *line), fields);
        }
    }
    log::info!(
        "{} patterns present in all {} datasets",
        aligned.len(),
        datasets.len()
    );

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    for (index, (dataset, output)) in datasets.iter().zip(&outputs).enumerate() {
        let file = File::create(output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        let mut writer = BufWriter::new(file);
        for numbered in &dataset.records {
            let mut value = serde_json::to_value(&numbered.record)?;
            if let (Value::Object(object), Some(fields)) =
                (&mut value, appended.remove(&(index, numbered.line)))
            {
                object.extend(fields);
            }
            serde_json::to_writer(&mut writer, &value)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        log::info!("Wrote {} records to {}", dataset.len(), output.display());
    }
    Ok(())
}

/// One output per input, named after it. Two inputs sharing a file name, or
/// an output that is its own input, are refused.
fn output_paths(inputs: &[PathBuf], output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    inputs
        .iter()
        .map(|input| -> Result<PathBuf> {
            let name = input
                .file_name()
                .with_context(|| format!("{} has no file name", input.display()))?;
            let output = output_dir.join(name);
            ensure!(
                seen.insert(output.clone()),
                "two inputs would both be written to {}",
                output.display()
            );
            ensure!(
                !same_file(input, &output),
                "{} would overwrite its input",
                output.display()
            );
            Ok(output)
        })
        .collect()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
