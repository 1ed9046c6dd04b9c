//! Growth classification of step sequences.
//!
//! Polynomial growth of degree *k* becomes constant after *k* rounds of
//! finite differencing. Exponential growth never does, but keeps a constant
//! ratio between successive differences. The classifier differentiates
//! until the two halves of the current sequence agree, and falls back to the
//! ratio estimate when the sequence runs out.
//!
//! Agreement is tested on half maxima rather than exact equality so that
//! engine measurement noise does not push a sequence into a higher degree.

use super::Dov;
use serde::Serialize;

/// Shortest sequence worth classifying.
pub const MIN_SAMPLES: usize = 3;

/// Reduced sequences shorter than this skip differencing.
const MIN_DIFFERENCING_SAMPLES: usize = 4;

/// A decision point inside the classifier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    InsufficientSamples {
        len: usize,
    },
    /// Max-based convergence test of one differencing round.
    Round {
        degree: u32,
        len: usize,
        max_gap: i128,
        half: usize,
    },
    /// Mean-based test, taken when a round contains negative values.
    RobustRound {
        degree: u32,
        mean_gap: f64,
        half: usize,
    },
    RatioFallback {
        last: i128,
        previous: i128,
        base: Option<i128>,
    },
}

/// Receives the classifier's decisions as they are made.
pub trait ClassificationObserver {
    fn observe(&mut self, event: TraceEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ClassificationObserver for NoopObserver {
    fn observe(&mut self, _event: TraceEvent) {}
}

impl ClassificationObserver for Vec<TraceEvent> {
    fn observe(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Classify a step sequence indexed by increasing pump length.
pub fn classify(steps: &[u64]) -> Dov {
    classify_with(steps, &mut NoopObserver)
}

/// [`classify`], reporting every decision to `observer`.
pub fn classify_with<O>(steps: &[u64], observer: &mut O) -> Dov
where
    O: ClassificationObserver + ?Sized,
{
    if steps.len() < MIN_SAMPLES {
        observer.observe(TraceEvent::InsufficientSamples { len: steps.len() });
        return Dov::Failed;
    }

    // The baseline run often behaves differently from the pumped ones.
    let reduced: Vec<i128> = steps[1..].iter().map(|&s| i128::from(s)).collect();
    if reduced.len() < MIN_DIFFERENCING_SAMPLES {
        return exponential_fallback(&reduced, observer);
    }

    let mut current = reduced.clone();
    let mut degree = 0u32;
    loop {
        let half = current.len() / 2;
        let (first, last) = halves(&current);

        let max_gap = max(last) - max(first);
        observer.observe(TraceEvent::Round {
            degree,
            len: current.len(),
            max_gap,
            half,
        });
        if max_gap < half as i128 {
            return Dov::polynomial(degree);
        }

        if current.iter().any(|&v| v < 0) {
            let mean_gap = robust_mean_gap(first, last);
            observer.observe(TraceEvent::RobustRound {
                degree,
                mean_gap,
                half,
            });
            return if mean_gap < half as f64 {
                Dov::polynomial(degree)
            } else {
                Dov::Unknown
            };
        }

        if current.len() == 2 {
            break;
        }

        degree += 1;
        current = differences(&current);
    }

    exponential_fallback(&reduced, observer)
}

/// Estimate an exponential base from the last two first differences.
fn exponential_fallback<O>(seq: &[i128], observer: &mut O) -> Dov
where
    O: ClassificationObserver + ?Sized,
{
    if seq.len() < MIN_SAMPLES {
        observer.observe(TraceEvent::InsufficientSamples { len: seq.len() });
        return Dov::Failed;
    }

    let deltas = differences(seq);
    let last = deltas[deltas.len() - 1];
    let previous = deltas[deltas.len() - 2];
    let base = rounded_ratio(last, previous);
    observer.observe(TraceEvent::RatioFallback {
        last,
        previous,
        base,
    });

    match base {
        Some(base) if base >= 2 => Dov::Exponential(u32::try_from(base).unwrap_or(u32::MAX)),
        _ => Dov::Unknown,
    }
}

fn differences(seq: &[i128]) -> Vec<i128> {
    seq.windows(2).map(|w| w[1].saturating_sub(w[0])).collect()
}

/// Equal-length leading and trailing halves; the middle element of an odd
/// sequence belongs to neither.
fn halves(seq: &[i128]) -> (&[i128], &[i128]) {
    let half = seq.len() / 2;
    (&seq[..half], &seq[seq.len() - half..])
}

fn max(values: &[i128]) -> i128 {
    values.iter().copied().max().unwrap_or(0)
}

fn mean(values: &[i128]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}

/// Gap between the half means. The last half is also measured without its
/// final element and the smaller mean wins, so one outlier at the end cannot
/// decide the round alone.
fn robust_mean_gap(first: &[i128], last: &[i128]) -> f64 {
    let first_mean = mean(first).unwrap_or(0.0);
    let last_mean = mean(last).unwrap_or(0.0);
    let trimmed_mean = mean(&last[..last.len().saturating_sub(1)]).unwrap_or(last_mean);
    last_mean.min(trimmed_mean) - first_mean
}

/// `round(last / previous)`, or `None` when `previous` is zero.
fn rounded_ratio(last: i128, previous: i128) -> Option<i128> {
    if previous == 0 {
        return None;
    }
    Some((last as f64 / previous as f64).round() as i128)
}
