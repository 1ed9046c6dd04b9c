use super::record::PatternRecord;
use crate::errors::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A dataset record tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedRecord {
    pub line: usize,
    pub record: PatternRecord,
}

/// The usable records of a dataset plus what had to be skipped.
#[derive(Debug, Default)]
pub struct Dataset {
    pub records: Vec<NumberedRecord>,
    pub skipped: Vec<Error>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &PatternRecord> {
        self.records.iter().map(|numbered| &numbered.record)
    }
}

/// Parse one dataset line.
pub fn parse_line(line_number: usize, line: &str) -> Result<PatternRecord> {
    let value: serde_json::Value = serde_json::from_str(line)
        .map_err(|e| Error::invalid_record(line_number, None, format!("not JSON: {}", e)))?;
    let pattern = value
        .get("pattern")
        .and_then(|p| p.as_str())
        .map(str::to_string);

    let record: PatternRecord = serde_json::from_value(value)
        .map_err(|e| Error::invalid_record(line_number, pattern.clone(), e.to_string()))?;
    record
        .validate()
        .map_err(|message| Error::invalid_record(line_number, pattern, message))?;
    Ok(record)
}

/// Read JSON-lines records from `reader`.
///
/// Structurally invalid records are logged and collected in
/// [`Dataset::skipped`]; only I/O failures abort the read.
pub fn read_dataset<R: BufRead>(reader: R) -> Result<Dataset> {
    let mut dataset = Dataset::default();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        match parse_line(line_number, &line) {
            Ok(record) => dataset.records.push(NumberedRecord {
                line: line_number,
                record,
            }),
            Err(e) => {
                log::error!("Skipping record: {}", e);
                dataset.skipped.push(e);
            }
        }
    }
    Ok(dataset)
}

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| Error::file_system(path, e))?;
    let dataset = read_dataset(BufReader::new(file))?;
    log::debug!(
        "Loaded {} records from {} ({} skipped)",
        dataset.len(),
        path.display(),
        dataset.skipped.len()
    );
    Ok(dataset)
}
