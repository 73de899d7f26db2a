//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::AggregatedReport;
use crate::report::write_atomic;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Generate JSON report from aggregated results
    fn generate(&self, report: &AggregatedReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Generates JSON reports from aggregated results
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:intent Generate JSON report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &AggregatedReport, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        write_atomic(output_path, json.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricSample, MetricsAggregator, RunResult, SummaryRow, Unit};
    use tempfile::TempDir;

    #[test]
    fn test_generate_json_report() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("summary.json");

        let mut run = RunResult::empty(1);
        run.insert(MetricSample::new("bandwidth", 2.0, Unit::MebibytesPerSec));
        let report = MetricsAggregator::aggregate(&[run]).unwrap();

        reporter.generate(&report, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.contains("\"MiB/s\""));
        assert!(content.contains("\"kind\": \"stats\""));

        let parsed: AggregatedReport = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, report);
        assert!(matches!(
            parsed.summary[0],
            SummaryRow::Stats { stdev: None, .. }
        ));
    }
}
