//! Dataset loading, sequence derivation and pairing against the fixtures.

use anyhow::Result;
use dovmap::dataset::{load_dataset, pair_records, read_dataset, InputKind};
use dovmap::steps::{measure_sequence, Measure};
use dovmap::{classify, CounterRecord, Dov, Error};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fixtures").join(name)
}

#[test]
fn test_fixture_skips_invalid_line() -> Result<()> {
    let dataset = load_dataset(&fixture("sl.jsonl"))?;
    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.skipped.len(), 1);
    assert!(matches!(
        dataset.skipped[0],
        Error::InvalidRecord { line: 5, pattern: None, .. }
    ));
    Ok(())
}

#[test]
fn test_outputs_become_a_sequence() -> Result<()> {
    let dataset = load_dataset(&fixture("sl.jsonl"))?;
    let record = dataset.patterns().find(|r| r.pattern == "ab").unwrap();
    let steps = record.sequence(Measure::Step).unwrap();
    assert_eq!(steps, vec![6; 6]);
    assert_eq!(classify(&steps), Dov::Constant);
    Ok(())
}

#[test]
fn test_outputs_truncate_at_first_missing_run() -> Result<()> {
    let data = indoc! {r#"
        {"pattern": "(a*)*", "evil_inputs": ["a", "aa", "aaa"], "outputs": ["CHAR: 1 (FAILED: 0)\nPRED: 0 (FAILED: 0)", null, "CHAR: 9 (FAILED: 0)\nPRED: 0 (FAILED: 0)"]}
    "#};
    let dataset = read_dataset(data.as_bytes())?;
    let record = dataset.patterns().next().unwrap();
    assert_eq!(record.sequence(Measure::Step), Some(vec![1]));
    assert_eq!(classify(&[1]), Dov::Failed);
    Ok(())
}

#[test]
fn test_garbled_run_keeps_later_pump_lengths() -> Result<()> {
    let data = indoc! {r#"
        {"pattern": "a*a*b", "outputs": ["CHAR: 1 (FAILED: 0)\nPRED: 0 (FAILED: 0)", "CHAR: 4 (FAILED: 0)\nPRED: 0 (FAILED: 0)", "CHAR: 9 (FAILED: 0)\nPRED: 0 (FAILED: 0)", "garbage line", "", "CHAR: 36 (FAILED: 0)\nPRED: 0 (FAILED: 0)", "CHAR: 49 (FAILED: 0)\nPRED: 0 (FAILED: 0)", "CHAR: 64 (FAILED: 0)\nPRED: 0 (FAILED: 0)"]}
    "#};
    let dataset = read_dataset(data.as_bytes())?;
    let record = dataset.patterns().next().unwrap();
    let steps = record.sequence(Measure::Step).unwrap();
    assert_eq!(steps, vec![1, 4, 9, 36, 49, 64]);
    assert_ne!(classify(&steps), Dov::Failed);
    Ok(())
}

#[test]
fn test_pairing_matches_line_numbers() -> Result<()> {
    let before = load_dataset(&fixture("sl.jsonl"))?;
    let after = load_dataset(&fixture("sl_memo.jsonl"))?;
    let pairs = pair_records(&before, &after);
    assert_eq!(pairs.len(), 6);
    assert!(pairs.iter().all(|(b, a)| b.pattern == a.pattern));
    Ok(())
}

#[test]
fn test_input_lists() -> Result<()> {
    let dataset = load_dataset(&fixture("all_inputs.jsonl"))?;
    let records: Vec<_> = dataset.patterns().collect();

    assert_eq!(
        records[0].input_sequence(InputKind::Positive, Measure::Step),
        Some(vec![2, 4])
    );
    // A non-empty input without output rejects the whole list.
    assert_eq!(records[1].input_sequence(InputKind::Positive, Measure::Step), None);
    // Malformed instrumentation costs only its own run.
    assert_eq!(
        records[2].input_sequence(InputKind::Positive, Measure::Step),
        Some(vec![])
    );
    assert_eq!(records[2].input_sequence(InputKind::Negative, Measure::Step), None);
    Ok(())
}

#[test]
fn test_oracle_sequence_classifies() {
    let oracle = |_pattern: &str, input: &str| -> Option<CounterRecord> {
        let n = input.len() as u64;
        let text = format!("CHAR: {} (FAILED: 0)\nPRED: {} (FAILED: 0)", n * n, n);
        dovmap::parse(&text).ok()
    };
    let inputs: Vec<String> = (0..10).map(|n| "a".repeat(n)).collect();
    let steps = measure_sequence(&oracle, "a*a*", &inputs, Measure::Step);
    assert_eq!(steps.len(), 10);
    assert_eq!(classify(&steps), Dov::Polynomial(2));
}
