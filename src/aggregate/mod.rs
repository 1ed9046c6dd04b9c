//! Corpus-level reductions over classifications and step samples.
//!
//! Tables are keyed by the trimmed [`Dov`](crate::dov::Dov) and always carry
//! every class of [`REPORT_ALPHABET`](crate::dov::REPORT_ALPHABET), so their
//! shape does not depend on which classes a corpus happens to contain.

mod contingency;
mod frequency;
mod statistics;

pub use contingency::{ContingencyTable, TransitionSummary};
pub use frequency::FrequencyTable;
pub use statistics::{mean_of, SummaryStatistics};
