//! CSV export of a simulation run
//!
//! Summary rows (`label,value`) come first, then a blank line and one
//! `Run,Duration` row per trial, numbered from 1.

use crate::stats::StatisticsReport;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvExport<'a> {
    project_name: Option<&'a str>,
    statistics: &'a StatisticsReport,
    simulations: &'a [f64],
}

impl<'a> CsvExport<'a> {
    /// `statistics` must be computed from `simulations`
    pub fn new(
        project_name: Option<&'a str>,
        statistics: &'a StatisticsReport,
        simulations: &'a [f64],
    ) -> Self {
        Self {
            project_name,
            statistics,
            simulations,
        }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn row(output: &mut String, label: &str, value: &str) {
        output.push_str(&Self::escape_field(label));
        output.push(',');
        output.push_str(&Self::escape_field(value));
        output.push('\n');
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let stats = self.statistics;
        let (ci_lower, ci_upper) = stats.confidence_intervals.ci_95;
        let mut output = String::new();

        Self::row(&mut output, "Project Name", self.project_name.unwrap_or(""));
        Self::row(&mut output, "Unit", &stats.unit);
        Self::row(
            &mut output,
            "Number of Simulations",
            &stats.n_simulations.to_string(),
        );
        let numeric = [
            ("Mean", stats.mean),
            ("Median (P50)", stats.median),
            ("Std Dev", stats.std_dev),
            ("Min", stats.min),
            ("Max", stats.max),
            ("P10", stats.percentiles.p10),
            ("P85", stats.percentiles.p85),
            ("P90", stats.percentiles.p90),
            ("P95", stats.percentiles.p95),
            ("95% CI Lower", ci_lower),
            ("95% CI Upper", ci_upper),
        ];
        for (label, value) in numeric {
            Self::row(&mut output, label, &value.to_string());
        }

        output.push('\n');
        output.push_str("Simulation Results\n");
        output.push_str("Run,Duration\n");
        for (i, duration) in self.simulations.iter().enumerate() {
            output.push_str(&format!("{},{}\n", i + 1, duration));
        }

        output
    }
}
