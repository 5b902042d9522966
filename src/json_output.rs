//! JSON export of a simulation run

use crate::simulation::CriticalPathAnalysis;
use crate::stats::StatisticsReport;
use serde::Serialize;

/// Full export: summary statistics plus every simulated duration
#[derive(Debug, Clone, Serialize)]
pub struct JsonExport {
    /// Monaco version that produced this file
    pub version: String,
    /// Format identifier
    pub format: String,
    pub project_name: Option<String>,
    pub unit: String,
    pub statistics: StatisticsReport,
    /// Project duration of each trial, in trial order
    pub simulations: Vec<f64>,
    /// Critical-path frequencies (if requested)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical_path: Option<CriticalPathAnalysis>,
}

impl JsonExport {
    /// `statistics` must be computed from `simulations`
    pub fn new(
        project_name: Option<&str>,
        statistics: StatisticsReport,
        simulations: Vec<f64>,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            format: "monaco-json-v1".to_string(),
            project_name: project_name.map(str::to_string),
            unit: statistics.unit.clone(),
            statistics,
            simulations,
            critical_path: None,
        }
    }

    pub fn with_critical_path(mut self, analysis: CriticalPathAnalysis) -> Self {
        self.critical_path = Some(analysis);
        self
    }

    /// Serialize to a pretty-printed JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export() -> JsonExport {
        let sims = vec![3.0, 1.0, 2.0];
        let stats = StatisticsReport::from_durations(&sims, "days").unwrap();
        JsonExport::new(Some("Website"), stats, sims)
    }

    #[test]
    fn test_json_export_creation() {
        let export = export();
        assert_eq!(export.format, "monaco-json-v1");
        assert_eq!(export.unit, "days");
        assert_eq!(export.simulations.len(), export.statistics.n_simulations);
    }

    #[test]
    fn test_json_serialization() {
        let json = export().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["project_name"], "Website");
        assert_eq!(value["statistics"]["median"], 2.0);
        assert_eq!(value["simulations"][0], 3.0);
    }

    #[test]
    fn test_optional_fields_omitted() {
        let json = export().to_json().unwrap();
        assert!(!json.contains("critical_path"));

        let sims = vec![1.0];
        let stats = StatisticsReport::from_durations(&sims, "days").unwrap();
        let unnamed = JsonExport::new(None, stats, sims).to_json().unwrap();
        assert!(unnamed.contains("\"project_name\": null"));
    }
}
