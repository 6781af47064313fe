//! Summary statistics over report amounts
//!
//! Reduces a non-empty sample of amounts to count, extrema, mean, median and
//! sample standard deviation.

use serde::Serialize;

use crate::error::{PfimError, PfimResult};

/// Descriptive statistics of a non-empty sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of amounts
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; absent for a single amount
    #[serde(rename = "stdev")]
    pub sample_stdev: Option<f64>,
    /// Sum of all amounts
    pub total: f64,
}

impl Summary {
    /// Compute the statistics of `amounts`
    ///
    /// The input is left untouched; the median is taken from a sorted copy.
    pub fn compute(amounts: &[f64]) -> PfimResult<Self> {
        if amounts.is_empty() {
            return Err(PfimError::EmptySample);
        }
        if let Some(bad) = amounts.iter().find(|a| !a.is_finite()) {
            return Err(PfimError::Validation(format!(
                "Cannot summarize non-finite amount {}",
                bad
            )));
        }

        let count = amounts.len();
        let total: f64 = amounts.iter().sum();

        let mut sorted = amounts.to_vec();
        sorted.sort_by(f64::total_cmp);
        let min = sorted[0];
        let max = sorted[count - 1];
        // Summation rounding can push the quotient just past the extrema
        let mean = (total / count as f64).clamp(min, max);
        let median = if count % 2 == 1 {
            sorted[count / 2]
        } else {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        };

        let sample_stdev = (count >= 2).then(|| {
            let squares: f64 = amounts.iter().map(|a| (a - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Ok(Self {
            count,
            min,
            max,
            mean,
            median,
            sample_stdev,
            total,
        })
    }

    /// Sample standard deviation, or an error when it is undefined
    pub fn stdev(&self) -> PfimResult<f64> {
        self.sample_stdev.ok_or(PfimError::StdevUndefined)
    }

    /// Format the statistics block shown under a report
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("{:<10} {:>12}\n", "Count:", self.count));
        output.push_str(&format!("{:<10} {:>12.2}\n", "Min:", self.min));
        output.push_str(&format!("{:<10} {:>12.2}\n", "Max:", self.max));
        output.push_str(&format!("{:<10} {:>12.2}\n", "Mean:", self.mean));
        output.push_str(&format!("{:<10} {:>12.2}\n", "Median:", self.median));
        match self.sample_stdev {
            Some(stdev) => output.push_str(&format!("{:<10} {:>12.2}\n", "Stdev:", stdev)),
            None => output.push_str(&format!("{:<10} {:>12}\n", "Stdev:", "n/a")),
        }
        output.push_str(&format!("{:<10} {:>12.2}\n", "Total:", self.total));
        output
    }
}
