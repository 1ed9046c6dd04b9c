use crate::dov::{Dov, REPORT_ALPHABET};
use serde::{Serialize, Serializer};

/// Number of patterns per trimmed class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [usize; REPORT_ALPHABET.len()],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dovs<I>(dovs: I) -> Self
    where
        I: IntoIterator<Item = Dov>,
    {
        let mut table = Self::new();
        for dov in dovs {
            table.record(dov);
        }
        table
    }

    pub fn record(&mut self, dov: Dov) {
        self.counts[dov.report_index()] += 1;
    }

    pub fn count(&self, dov: Dov) -> usize {
        self.counts[dov.report_index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Rows in report order, zero counts included.
    pub fn rows(&self) -> impl Iterator<Item = (Dov, usize)> + '_ {
        REPORT_ALPHABET.iter().copied().zip(self.counts.iter().copied())
    }

    pub fn merge(mut self, other: &Self) -> Self {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self
    }
}

#[derive(Serialize)]
struct FrequencyRow {
    dov: String,
    count: usize,
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows().map(|(dov, count)| FrequencyRow {
            dov: dov.to_string(),
            count,
        }))
    }
}
