//! Building step sequences out of per-run values.

use serde::Serialize;

/// What a single engine run contributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunValue {
    /// No output at all: the engine stopped responding.
    Missing,
    /// Output was captured but holds no usable value.
    Unusable,
    Value(u64),
}

impl RunValue {
    pub fn value(self) -> Option<u64> {
        match self {
            RunValue::Value(value) => Some(value),
            RunValue::Missing | RunValue::Unusable => None,
        }
    }
}

/// Values up to the first missing run, skipping unusable ones.
///
/// A missing run means the engine stopped responding; every later pump
/// length is at least as expensive, so those entries are dropped rather than
/// imputed. An unusable run costs only itself.
pub fn truncate_at_first_hole(runs: &[RunValue]) -> Vec<u64> {
    runs.iter()
        .take_while(|run| **run != RunValue::Missing)
        .filter_map(|run| run.value())
        .collect()
}

/// Values for a list of positive or negative inputs.
///
/// Returns `None` when a non-empty input has no output: the whole list is
/// rejected. A missing output for the empty input is dropped, since some
/// engines print nothing for it. Unusable runs are dropped one by one.
pub fn input_steps<S: AsRef<str>>(inputs: &[S], runs: &[RunValue]) -> Option<Vec<u64>> {
    let mut steps = Vec::with_capacity(runs.len());
    for (index, run) in runs.iter().enumerate() {
        match run {
            RunValue::Value(step) => steps.push(*step),
            RunValue::Unusable => {}
            RunValue::Missing => {
                let empty_input = inputs.get(index).is_none_or(|s| s.as_ref().is_empty());
                if !empty_input {
                    return None;
                }
            }
        }
    }
    Some(steps)
}

/// Keep a position only when every configuration produced a value for it.
///
/// Each inner vector holds the values of one engine configuration over the
/// same list of inputs. The shortest configuration bounds the result.
pub fn mask_across_configurations(per_configuration: &[Vec<Option<u64>>]) -> Vec<Vec<Option<u64>>> {
    let len = per_configuration.iter().map(Vec::len).min().unwrap_or(0);
    let keep: Vec<bool> = (0..len)
        .map(|i| per_configuration.iter().all(|values| values[i].is_some()))
        .collect();

    per_configuration
        .iter()
        .map(|values| {
            values
                .iter()
                .zip(&keep)
                .map(|(value, keep)| if *keep { *value } else { None })
                .collect()
        })
        .collect()
}

/// One input whose step count grew between two configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepIncrease {
    pub index: usize,
    pub before: u64,
    pub after: u64,
}

impl StepIncrease {
    pub fn delta(&self) -> u64 {
        self.after - self.before
    }
}

/// Positions where `after - before` exceeds `threshold`.
pub fn step_increases(
    before: &[Option<u64>],
    after: &[Option<u64>],
    threshold: u64,
) -> Vec<StepIncrease> {
    before
        .iter()
        .zip(after)
        .enumerate()
        .filter_map(|(index, pair)| match pair {
            (Some(before), Some(after)) if after.saturating_sub(*before) > threshold => {
                Some(StepIncrease {
                    index,
                    before: *before,
                    after: *after,
                })
            }
            _ => None,
        })
        .collect()
}
