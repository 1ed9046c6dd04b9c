use crate::dov::{ordering, Dov, REPORT_ALPHABET};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;

const N: usize = REPORT_ALPHABET.len();

/// Pair counts of trimmed classes, `before` on rows and `after` on columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContingencyTable {
    cells: [[usize; N]; N],
}

/// How classifications moved between two configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransitionSummary {
    pub increased: usize,
    pub decreased: usize,
    pub unchanged: usize,
    pub incomparable: usize,
}

impl ContingencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Dov, Dov)>,
    {
        let mut table = Self::new();
        for (before, after) in pairs {
            table.record(before, after);
        }
        table
    }

    pub fn record(&mut self, before: Dov, after: Dov) {
        self.cells[before.report_index()][after.report_index()] += 1;
    }

    pub fn count(&self, before: Dov, after: Dov) -> usize {
        self.cells[before.report_index()][after.report_index()]
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    pub fn row_total(&self, before: Dov) -> usize {
        self.cells[before.report_index()].iter().sum()
    }

    pub fn column_total(&self, after: Dov) -> usize {
        let column = after.report_index();
        self.cells.iter().map(|row| row[column]).sum()
    }

    /// Rows in report order, each with its counts in column order.
    pub fn rows(&self) -> impl Iterator<Item = (Dov, &[usize; N])> + '_ {
        REPORT_ALPHABET.iter().copied().zip(self.cells.iter())
    }

    /// Classify every cell by the severity comparator.
    pub fn summary(&self) -> TransitionSummary {
        let mut summary = TransitionSummary::default();
        for (before, row) in self.rows() {
            for (after, count) in REPORT_ALPHABET.iter().copied().zip(row.iter().copied()) {
                let bucket = match ordering::compare(before, after) {
                    Some(Ordering::Less) => &mut summary.increased,
                    Some(Ordering::Greater) => &mut summary.decreased,
                    Some(Ordering::Equal) => &mut summary.unchanged,
                    None => &mut summary.incomparable,
                };
                *bucket += count;
            }
        }
        summary
    }
}

#[derive(Serialize)]
struct ContingencyRow {
    before: String,
    counts: Vec<usize>,
}

impl Serialize for ContingencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows().map(|(before, counts)| ContingencyRow {
            before: before.to_string(),
            counts: counts.to_vec(),
        }))
    }
}
