//! Degree-of-vulnerability analysis of regular expressions.
//!
//! An instrumented matching engine reports how many elementary steps each
//! run takes. Feeding it inputs of growing pump length yields a step
//! sequence whose growth rate ([`Dov`]) tells how badly the pattern
//! backtracks.
//!
//! ```rust
//! use dovmap::{classify, Dov};
//!
//! assert_eq!(classify(&[0, 1, 4, 9, 16, 25, 36, 49]), Dov::Polynomial(2));
//! assert_eq!(classify(&[0, 1, 2, 4, 8, 16, 32, 64]), Dov::Exponential(2));
//! ```

// Export modules for library usage
pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dataset;
pub mod dov;
pub mod errors;
pub mod instrumentation;
pub mod io;
pub mod progress;
pub mod report;
pub mod steps;

// Re-export commonly used types
pub use crate::aggregate::{ContingencyTable, FrequencyTable, SummaryStatistics};
pub use crate::dataset::{load_dataset, read_dataset, Dataset, PatternRecord};
pub use crate::dov::{
    classify, classify_with, compare, increased, le, ClassificationObserver, Dov, TraceEvent,
    REPORT_ALPHABET,
};
pub use crate::errors::{Error, Result};
pub use crate::instrumentation::{parse, parse_output, CounterRecord, ParseError};
pub use crate::io::output::{create_writer, OutputFormat, ReportWriter};
pub use crate::steps::{extract, measure_sequence, Measure, StepOracle};
