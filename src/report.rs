//! Results of the batch commands, ready to be rendered by a
//! [`ReportWriter`](crate::io::output::ReportWriter).

use crate::aggregate::{ContingencyTable, FrequencyTable, SummaryStatistics, TransitionSummary};
use crate::dataset::InputKind;
use crate::steps::{Measure, StepIncrease};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FrequencyReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub table: FrequencyTable,
    /// Records skipped as structurally invalid.
    pub skipped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContingencyReport {
    pub before: String,
    pub after: String,
    pub generated_at: DateTime<Utc>,
    pub table: ContingencyTable,
    pub summary: TransitionSummary,
}

/// Statistics of per-pattern averages for one input list.
#[derive(Debug, Clone, Serialize)]
pub struct StepGroup {
    pub kind: InputKind,
    /// Patterns whose input list was rejected or empty.
    pub failed: usize,
    pub statistics: Option<SummaryStatistics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepStatisticsReport {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub measure: Measure,
    pub groups: Vec<StepGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputIncrease {
    pub input: Option<String>,
    #[serde(flatten)]
    pub increase: StepIncrease,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternIncrease {
    pub pattern: String,
    pub increases: Vec<InputIncrease>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepIncreaseReport {
    pub before: String,
    pub after: String,
    pub generated_at: DateTime<Utc>,
    pub kind: InputKind,
    pub threshold: u64,
    pub patterns: Vec<PatternIncrease>,
}
