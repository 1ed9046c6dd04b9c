use serde::Serialize;

/// Descriptive statistics of a list of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; zero for fewer than two samples.
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryStatistics {
    /// `None` for an empty sample list.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };
        let stdev = if count < 2 {
            0.0
        } else {
            let variance =
                sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        };

        Some(Self {
            count,
            mean,
            median,
            stdev,
            min: sorted[0],
            max: sorted[count - 1],
        })
    }
}

/// Arithmetic mean of integer samples.
pub fn mean_of(values: &[u64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64)
}
