//! The matching engine as an injected capability.

use super::Measure;
use crate::instrumentation::CounterRecord;

/// Source of instrumentation for one (pattern, input) run.
///
/// Implementations wrap whatever actually executes the engine. `None` means
/// the run produced no output, typically because it timed out.
pub trait StepOracle {
    fn run(&self, pattern: &str, input: &str) -> Option<CounterRecord>;
}

impl<F> StepOracle for F
where
    F: Fn(&str, &str) -> Option<CounterRecord>,
{
    fn run(&self, pattern: &str, input: &str) -> Option<CounterRecord> {
        self(pattern, input)
    }
}

/// Run `inputs` in pump order and collect one value per run.
///
/// Stops at the first run without a record: later inputs are longer and are
/// not attempted. A record lacking `measure` drops only its own run.
pub fn measure_sequence<O, S>(oracle: &O, pattern: &str, inputs: &[S], measure: Measure) -> Vec<u64>
where
    O: StepOracle + ?Sized,
    S: AsRef<str>,
{
    let mut values = Vec::with_capacity(inputs.len());
    for input in inputs {
        let Some(record) = oracle.run(pattern, input.as_ref()) else {
            log::debug!("No output for {:?} on {:?}; stopping", pattern, input.as_ref());
            break;
        };
        match measure.read(&record) {
            Ok(value) => values.push(value),
            Err(e) => log::debug!("Skipping run of {:?}: {}", pattern, e),
        }
    }
    values
}
