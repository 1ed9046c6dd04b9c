//! End-to-end tests of the `dovmap` binary on fixture datasets.

use assert_cmd::Command;
use dovmap::dataset::AnnotatedRecord;
use dovmap::Dov;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/fixtures").join(name)
}

/// The binary, run from an empty directory so no `.dovmap.toml` is picked up.
fn dovmap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dovmap").unwrap();
    cmd.current_dir(dir.path()).env("DOVMAP_QUIET", "1").env_remove("RUST_LOG");
    cmd
}

fn stdout_json(output: std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "dovmap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not valid JSON")
}

fn count_of(table: &Value, label: &str) -> u64 {
    table
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["dov"] == label)
        .map(|row| row["count"].as_u64().unwrap())
        .unwrap()
}

#[test]
fn test_classify_json_frequency_table() {
    let dir = TempDir::new().unwrap();
    let output = dovmap(&dir)
        .args(["classify", "--format", "json"])
        .arg(fixture("sl.jsonl"))
        .output()
        .unwrap();
    let json = stdout_json(output);

    let table = &json["table"];
    assert_eq!(table.as_array().unwrap().len(), 9);
    for label in ["O(1)", "O(n)", "O(n^2)", "O(2^n)", "UNK", "FAILED"] {
        assert_eq!(count_of(table, label), 1, "count of {}", label);
    }
    assert_eq!(count_of(table, "O(n^3)"), 0);
    assert_eq!(json["skipped"], 1);
}

#[test]
fn test_classify_sequential_latex_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("table.tex");
    dovmap(&dir)
        .args(["classify", "--no-parallel", "-f", "latex", "-o"])
        .arg(&out)
        .arg(fixture("sl.jsonl"))
        .assert()
        .success();

    let content = fs::read_to_string(&out).unwrap();
    let rows: Vec<&str> = content.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], "1 & 1 & 1 & 0 & 0 & 0 & 1 & 1 & 1 \\\\ ");
}

#[test]
fn test_annotate_writes_one_line_per_record() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("annotated.jsonl");
    dovmap(&dir)
        .arg("annotate")
        .arg(fixture("sl.jsonl"))
        .arg(&out)
        .assert()
        .success();

    let records: Vec<AnnotatedRecord> = fs::read_to_string(&out)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 6);
    assert_eq!(records[1].pattern, "(a|a)*b");
    assert_eq!(records[1].dov, Dov::Exponential(2));
    assert_eq!(records[5].steps, vec![6; 6]);
    assert_eq!(records[5].dov, Dov::Constant);
}

#[test]
fn test_compare_summarizes_transitions() {
    let dir = TempDir::new().unwrap();
    let output = dovmap(&dir)
        .args(["compare", "-f", "json"])
        .arg(fixture("sl.jsonl"))
        .arg(fixture("sl_memo.jsonl"))
        .output()
        .unwrap();
    let json = stdout_json(output);

    assert_eq!(json["summary"]["increased"], 1);
    assert_eq!(json["summary"]["decreased"], 1);
    assert_eq!(json["summary"]["unchanged"], 4);
    assert_eq!(json["summary"]["incomparable"], 0);
    // O(n) row, O(n^2) column
    assert_eq!(json["table"][1]["counts"][2], 1);
}

#[test]
fn test_steps_statistics() {
    let dir = TempDir::new().unwrap();
    let output = dovmap(&dir)
        .args(["steps", "-f", "json"])
        .arg(fixture("all_inputs.jsonl"))
        .output()
        .unwrap();
    let json = stdout_json(output);

    let positive = &json["groups"][0];
    assert_eq!(positive["kind"], "positive");
    assert_eq!(positive["failed"], 2);
    assert_eq!(positive["statistics"]["count"], 1);
    assert_eq!(positive["statistics"]["mean"], 3.0);

    let negative = &json["groups"][1];
    assert_eq!(negative["failed"], 0);
    assert_eq!(negative["statistics"]["mean"], 2.0);
    assert_eq!(negative["statistics"]["max"], 3.0);
}

#[test]
fn test_compare_steps_threshold() {
    let dir = TempDir::new().unwrap();
    let after = dir.path().join("after.jsonl");
    let content = fs::read_to_string(fixture("all_inputs.jsonl"))
        .unwrap()
        .replace("CHAR: 1 (FAILED: 1)\\nPRED: 2", "CHAR: 9 (FAILED: 1)\\nPRED: 2");
    fs::write(&after, content).unwrap();

    let run = |threshold: &str| {
        let output = dovmap(&dir)
            .args(["compare-steps", "--input-type", "negative", "-f", "json", "--threshold", threshold])
            .arg(fixture("all_inputs.jsonl"))
            .arg(&after)
            .output()
            .unwrap();
        stdout_json(output)
    };

    let json = run("5");
    let patterns = json["patterns"].as_array().unwrap();
    assert_eq!(patterns.len(), 1);
    assert_eq!(patterns[0]["pattern"], "b+");
    assert_eq!(patterns[0]["increases"][0]["input"], "a");
    assert_eq!(patterns[0]["increases"][0]["after"], 11);

    assert!(run("8")["patterns"].as_array().unwrap().is_empty());
}

#[test]
fn test_append_writes_masked_steps_per_configuration() {
    let dir = TempDir::new().unwrap();
    let second = dir.path().join("second");
    fs::create_dir(&second).unwrap();
    let other = second.join("all_inputs_memo.jsonl");
    let content = fs::read_to_string(fixture("all_inputs.jsonl"))
        .unwrap()
        .replace("CHAR: 3 (FAILED: 0)\\nPRED: 1", "CHAR: 7 (FAILED: 0)\\nPRED: 1")
        .replace(r#""CHAR: 1 (FAILED: 1)\nPRED: 0 (FAILED: 0)""#, "null");
    fs::write(&other, content).unwrap();

    let out = dir.path().join("out");
    dovmap(&dir)
        .arg("append")
        .arg(fixture("all_inputs.jsonl"))
        .arg(&other)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    let read = |name: &str| -> Vec<Value> {
        fs::read_to_string(out.join(name))
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    };
    let first = read("all_inputs.jsonl");
    let second = read("all_inputs_memo.jsonl");
    assert_eq!(first.len(), 3);

    assert_eq!(first[0]["positive_steps"], serde_json::json!([null, 2, 4]));
    assert_eq!(second[0]["positive_steps"], serde_json::json!([null, 2, 8]));
    assert_eq!(first[0]["avg_positive_step"], 3.0);
    assert_eq!(second[0]["avg_positive_step"], 5.0);
    // The negative run is missing in the second configuration only.
    assert_eq!(first[0]["negative_steps"], serde_json::json!([null]));
    assert_eq!(first[0]["avg_negative_step"], Value::Null);
    assert_eq!(first[2]["pattern"], "c+");
    assert!(first[2].get("negative_steps").is_none());
}

#[test]
fn test_missing_dataset_fails() {
    let dir = TempDir::new().unwrap();
    dovmap(&dir)
        .args(["classify", "does-not-exist.jsonl"])
        .assert()
        .failure();
}

#[test]
fn test_init_creates_config_once() {
    let dir = TempDir::new().unwrap();
    dovmap(&dir).arg("init").assert().success();
    assert!(dir.path().join(".dovmap.toml").exists());
    dovmap(&dir).arg("init").assert().failure();
    dovmap(&dir).args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_default_format_is_used() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".dovmap.toml"),
        "[output]\ndefault_format = \"json\"\n",
    )
    .unwrap();
    let output = dovmap(&dir)
        .arg("classify")
        .arg(fixture("sl.jsonl"))
        .output()
        .unwrap();
    let json = stdout_json(output);
    assert_eq!(json["table"].as_array().unwrap().len(), 9);
}
