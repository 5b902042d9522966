//! Summary statistics over simulated project durations

use crate::error::{MonacoError, Result};
use serde::{Deserialize, Serialize};

/// Two-sided 95% z-score used for the confidence interval
pub const Z_95: f64 = 1.96;

/// Fixed percentile set reported for every run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p10: f64,
    pub p50: f64,
    pub p85: f64,
    pub p90: f64,
    pub p95: f64,
}

impl Percentiles {
    /// `(label, value)` pairs in ascending order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("P10", self.p10),
            ("P50", self.p50),
            ("P85", self.p85),
            ("P90", self.p90),
            ("P95", self.p95),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceIntervals {
    /// `mean ± 1.96·std_dev`
    ///
    /// A normal approximation; simulated durations are usually right-skewed,
    /// so treat this as indicative rather than exact coverage.
    #[serde(rename = "95%")]
    pub ci_95: (f64, f64),
}

/// Read-only summary of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    pub unit: String,
    pub n_simulations: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation (n - 1 denominator)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Percentiles,
    pub confidence_intervals: ConfidenceIntervals,
}

/// Percentile from sorted data by linear interpolation between closest ranks
///
/// `percentile` is on the 0-100 scale.
pub fn calculate_percentile(sorted_data: &[f64], percentile: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    if sorted_data.len() == 1 {
        return sorted_data[0];
    }

    let index = (percentile / 100.0) * (sorted_data.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_data[lower]
    } else {
        let weight = index - lower as f64;
        sorted_data[lower] * (1.0 - weight) + sorted_data[upper] * weight
    }
}

impl StatisticsReport {
    /// Reduce a duration sequence to a report
    ///
    /// Fails with [`MonacoError::EmptySample`] on an empty sequence. A single
    /// observation has a standard deviation of 0.
    pub fn from_durations(durations: &[f64], unit: &str) -> Result<Self> {
        if durations.is_empty() {
            return Err(MonacoError::EmptySample);
        }

        let n = durations.len();
        let mean = durations.iter().sum::<f64>() / n as f64;
        let std_dev = if n > 1 {
            let sum_sq: f64 = durations.iter().map(|d| (d - mean).powi(2)).sum();
            (sum_sq / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let mut sorted = durations.to_vec();
        sorted.sort_by(f64::total_cmp);

        let percentiles = Percentiles {
            p10: calculate_percentile(&sorted, 10.0),
            p50: calculate_percentile(&sorted, 50.0),
            p85: calculate_percentile(&sorted, 85.0),
            p90: calculate_percentile(&sorted, 90.0),
            p95: calculate_percentile(&sorted, 95.0),
        };

        Ok(Self {
            unit: unit.to_string(),
            n_simulations: n,
            mean,
            median: percentiles.p50,
            std_dev,
            min: sorted[0],
            max: sorted[n - 1],
            percentiles,
            confidence_intervals: ConfidenceIntervals {
                ci_95: (mean - Z_95 * std_dev, mean + Z_95 * std_dev),
            },
        })
    }

    /// Human-readable report, as printed by `monaco stats`
    pub fn format_summary(&self, project_name: Option<&str>) -> String {
        let unit = &self.unit;
        let mut out = String::new();

        out.push('\n');
        out.push_str(&format!("Project: {}\n", project_name.unwrap_or("Unnamed")));
        out.push_str(&"=".repeat(50));
        out.push_str("\n\n");
        out.push_str(&format!(
            "Simulations: {}\n",
            group_thousands(self.n_simulations)
        ));
        out.push_str(&format!("Time Unit: {}\n\n", unit));

        out.push_str("Duration Estimates:\n");
        let estimates = [
            ("Mean:             ", self.mean),
            ("Median (P50):     ", self.median),
            ("Std Deviation:    ", self.std_dev),
            ("Min:              ", self.min),
            ("Max:              ", self.max),
        ];
        for (label, value) in estimates {
            out.push_str(&format!("  {} {:.1} {}\n", label, value, unit));
        }
        out.push('\n');

        out.push_str("Percentiles:\n");
        for (label, value) in self.percentiles.entries() {
            out.push_str(&format!("  {}:               {:.1} {}\n", label, value, unit));
        }
        out.push('\n');

        let (lower, upper) = self.confidence_intervals.ci_95;
        out.push_str("Confidence Interval:\n");
        out.push_str(&format!(
            "  95% CI:            [{:.1}, {:.1}] {}\n",
            lower, upper, unit
        ));
        out
    }

    /// Print the report to stdout
    pub fn print_summary(&self, project_name: Option<&str>) {
        println!("{}", self.format_summary(project_name));
    }
}

/// `10000` -> `10,000`
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
