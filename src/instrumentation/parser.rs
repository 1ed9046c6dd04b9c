use super::{CategoryCount, CounterRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

const ELIMINATED_LABEL: &str = "NUMBER OF TRANSITIONS ELIMINATED FROM FLATTENING:";
const MEMOISED_LABEL: &str = "NUMBER OF STATES MEMOISED:";
const THREADS_LABEL: &str = "TOTAL THREADS IN POOL:";

static COUNTER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Z][A-Z_]*): (\d+) \(FAILED: (\d+)\)$").expect("counter line regex")
});

/// Instrumentation that cannot be turned into a usable counter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line that is neither a counter line nor a summary line.
    #[error("malformed instrumentation line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    /// The record parsed, but lacks a category a derived field needs.
    #[error("instrumentation has no {label} counter")]
    MissingCategory { label: &'static str },
}

/// Parse the diagnostic output of one run.
///
/// Output that is empty after trimming means the engine produced nothing for
/// the run; that is `Ok(None)`, not an error.
pub fn parse_output(text: &str) -> Result<Option<CounterRecord>, ParseError> {
    if text.trim().is_empty() {
        return Ok(None);
    }
    parse(text).map(Some)
}

/// Parse instrumentation text into a [`CounterRecord`].
///
/// The first malformed line fails the whole record.
pub fn parse(text: &str) -> Result<CounterRecord, ParseError> {
    let mut record = CounterRecord::default();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = || ParseError::MalformedLine {
            line_number: index + 1,
            line: line.to_string(),
        };

        if let Some(rest) = line.strip_prefix(ELIMINATED_LABEL) {
            record.eliminated = parse_count(rest).ok_or_else(malformed)?;
        } else if let Some(rest) = line.strip_prefix(MEMOISED_LABEL) {
            record.memoised = parse_count(rest).ok_or_else(malformed)?;
        } else if let Some(rest) = line.strip_prefix(THREADS_LABEL) {
            record.threads = parse_count(rest).ok_or_else(malformed)?;
        } else {
            let (label, count) = parse_counter_line(line).ok_or_else(malformed)?;
            record.categories.insert(label, count);
        }
    }

    Ok(record)
}

fn parse_count(rest: &str) -> Option<u64> {
    rest.trim().parse().ok()
}

fn parse_counter_line(line: &str) -> Option<(String, CategoryCount)> {
    let captures = COUNTER_LINE.captures(line)?;
    let total = captures[2].parse().ok()?;
    let failed = captures[3].parse().ok()?;
    Some((captures[1].to_string(), CategoryCount::new(total, failed)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = indoc! {"
        MATCH: 1 (FAILED: 0)
        CHAR: 12 (FAILED: 1)
        PRED: 4 (FAILED: 0)
        MEMO: 3 (FAILED: 1)
        STATE: 9 (FAILED: 0)
        NUMBER OF TRANSITIONS ELIMINATED FROM FLATTENING: 7
        NUMBER OF STATES MEMOISED: 2
        TOTAL THREADS IN POOL: 5
    "};

    #[test]
    fn test_parse_well_formed_block() {
        let record = parse(SAMPLE).unwrap();
        assert_eq!(record.step().unwrap(), 16);
        assert_eq!(record.memo_entry().unwrap(), 2);
        assert_eq!(record.state().unwrap(), 9);
        assert_eq!(record.eliminated, 7);
        assert_eq!(record.memoised, 2);
        assert_eq!(record.threads, 5);
        assert_eq!(record.categories.len(), 5);
    }

    #[test]
    fn test_unknown_labels_are_preserved() {
        let record = parse("SPLIT_EXTRA: 3 (FAILED: 2)\nCHAR: 1 (FAILED: 0)").unwrap();
        assert_eq!(
            record.category("SPLIT_EXTRA"),
            Some(CategoryCount::new(3, 2))
        );
    }

    #[test]
    fn test_blank_lines_and_padding_are_ignored() {
        let record = parse("\n  CHAR: 2 (FAILED: 0)  \n\nPRED: 3 (FAILED: 1)\n").unwrap();
        assert_eq!(record.step().unwrap(), 5);
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let err = parse("CHAR: 2 (FAILED: 0)\nsegmentation fault").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedLine {
                line_number: 2,
                line: "segmentation fault".to_string(),
            }
        );
    }

    #[test]
    fn test_bad_summary_value_is_malformed() {
        assert!(matches!(
            parse("TOTAL THREADS IN POOL: many"),
            Err(ParseError::MalformedLine { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_lowercase_label_is_malformed() {
        assert!(parse("char: 2 (FAILED: 0)").is_err());
    }

    #[test]
    fn test_empty_output_is_no_result() {
        assert_eq!(parse_output("").unwrap(), None);
        assert_eq!(parse_output("  \n \n").unwrap(), None);
        assert!(parse_output(SAMPLE).unwrap().is_some());
    }
}
