use crate::dov::Dov;
use crate::instrumentation::parse_output;
use crate::steps::{input_steps, truncate_at_first_hole, Measure, RunValue};
use serde::{Deserialize, Serialize};

/// Captured engine output of one run, either the bare diagnostic text or
/// the object the benchmark runner writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOutput {
    Text(String),
    Captured {
        stderr: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stdout: Option<String>,
    },
}

impl RawOutput {
    pub fn diagnostics(&self) -> &str {
        match self {
            RawOutput::Text(text) => text,
            RawOutput::Captured { stderr, .. } => stderr,
        }
    }
}

/// Which input list of a full benchmark record to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// Inputs the pattern matches
    Positive,
    /// Inputs the pattern rejects
    Negative,
}

impl InputKind {
    pub fn label(self) -> &'static str {
        match self {
            InputKind::Positive => "positive",
            InputKind::Negative => "negative",
        }
    }
}

/// One line of a benchmark dataset.
///
/// Three shapes share this type: a pre-computed `steps` list, super-linear
/// records with `evil_inputs`/`outputs` in pump order, and full records
/// with positive and negative inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub pattern: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<u64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evil_inputs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Option<RawOutput>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_inputs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive_outputs: Option<Vec<Option<RawOutput>>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_inputs: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_outputs: Option<Vec<Option<RawOutput>>>,
}

impl PatternRecord {
    pub fn with_steps(pattern: impl Into<String>, steps: Vec<u64>) -> Self {
        Self {
            pattern: pattern.into(),
            steps: Some(steps),
            evil_inputs: None,
            outputs: None,
            positive_inputs: None,
            positive_outputs: None,
            negative_inputs: None,
            negative_outputs: None,
        }
    }

    /// Structural check: a record must carry something to measure, and
    /// output lists must line up with their inputs.
    pub fn validate(&self) -> Result<(), String> {
        let has_sequence = self.steps.is_some() || self.outputs.is_some();
        let has_inputs = self.positive_outputs.is_some() || self.negative_outputs.is_some();
        if !has_sequence && !has_inputs {
            return Err("record has neither steps nor engine outputs".to_string());
        }

        check_lengths("evil_inputs", &self.evil_inputs, "outputs", &self.outputs)?;
        check_lengths(
            "positive_inputs",
            &self.positive_inputs,
            "positive_outputs",
            &self.positive_outputs,
        )?;
        check_lengths(
            "negative_inputs",
            &self.negative_inputs,
            "negative_outputs",
            &self.negative_outputs,
        )
    }

    /// Step sequence in pump order, truncated at the first run without
    /// output. Runs whose output is empty or malformed are dropped on their
    /// own. `None` when the record carries no sequence for `measure`.
    pub fn sequence(&self, measure: Measure) -> Option<Vec<u64>> {
        if measure == Measure::Step {
            if let Some(steps) = &self.steps {
                return Some(steps.clone());
            }
        }
        self.outputs
            .as_deref()
            .map(|outputs| truncate_at_first_hole(&values(outputs, measure)))
    }

    /// Per-input run values for one input list.
    pub fn input_values(&self, kind: InputKind, measure: Measure) -> Option<Vec<RunValue>> {
        self.outputs_for(kind).map(|outputs| values(outputs, measure))
    }

    /// Values for one input list, or `None` when the list is rejected
    /// because a non-empty input has no output.
    pub fn input_sequence(&self, kind: InputKind, measure: Measure) -> Option<Vec<u64>> {
        let values = self.input_values(kind, measure)?;
        let inputs = self.inputs_for(kind).unwrap_or(&[]);
        input_steps(inputs, &values)
    }

    pub fn inputs_for(&self, kind: InputKind) -> Option<&[String]> {
        match kind {
            InputKind::Positive => self.positive_inputs.as_deref(),
            InputKind::Negative => self.negative_inputs.as_deref(),
        }
    }

    fn outputs_for(&self, kind: InputKind) -> Option<&[Option<RawOutput>]> {
        match kind {
            InputKind::Positive => self.positive_outputs.as_deref(),
            InputKind::Negative => self.negative_outputs.as_deref(),
        }
    }
}

fn check_lengths<A, B>(
    inputs_label: &str,
    inputs: &Option<Vec<A>>,
    outputs_label: &str,
    outputs: &Option<Vec<B>>,
) -> Result<(), String> {
    match (inputs, outputs) {
        (Some(inputs), Some(outputs)) if inputs.len() != outputs.len() => Err(format!(
            "{} has {} entries but {} has {}",
            inputs_label,
            inputs.len(),
            outputs_label,
            outputs.len()
        )),
        _ => Ok(()),
    }
}

/// Read `measure` from every captured output. A JSON `null` is a missing
/// run; empty or malformed instrumentation is unusable.
fn values(outputs: &[Option<RawOutput>], measure: Measure) -> Vec<RunValue> {
    outputs
        .iter()
        .map(|output| {
            let Some(output) = output else {
                return RunValue::Missing;
            };
            match parse_output(output.diagnostics()) {
                Ok(Some(record)) => measure
                    .read(&record)
                    .map_or(RunValue::Unusable, RunValue::Value),
                Ok(None) => RunValue::Unusable,
                Err(e) => {
                    log::warn!("Dropping run with unusable instrumentation: {}", e);
                    RunValue::Unusable
                }
            }
        })
        .collect()
}

/// A record together with its classification, as written by `annotate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    pub pattern: String,
    pub steps: Vec<u64>,
    pub dov: Dov,
}
