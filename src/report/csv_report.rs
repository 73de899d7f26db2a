//! @ai:module:intent CSV report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvReporter, CsvReporterTrait
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::aggregator::{
    AggregatedReport, RUN_SECTION_TITLE, SUMMARY_HEADER, SUMMARY_SECTION_TITLE,
};
use crate::report::write_atomic;
use std::path::Path;

const ROW_TERMINATOR: &[u8] = b"\r\n";

/// @ai:intent Trait for CSV report generation
pub trait CsvReporterTrait: Send + Sync {
    /// @ai:intent Generate CSV report from aggregated results
    fn generate(&self, report: &AggregatedReport, output_path: &Path) -> Result<()>;
}

/// @ai:intent Writes the per-run and aggregated sections as one CSV file
pub struct CsvReporter;

impl CsvReporter {
    /// @ai:intent Create a new CSV reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Render both sections, separated by a blank line
    /// @ai:effects pure
    pub fn render(report: &AggregatedReport) -> Result<Vec<u8>> {
        let mut writer = Self::section_writer(Vec::new());

        writer.write_record([RUN_SECTION_TITLE])?;
        writer.write_record(report.run_header())?;
        for row in report.run_table() {
            writer.write_record(row)?;
        }

        // An empty csv record renders as `""`, so the separator goes in raw.
        let mut buf = writer.into_inner().map_err(|e| e.into_error())?;
        buf.extend_from_slice(ROW_TERMINATOR);

        let mut writer = Self::section_writer(buf);

        writer.write_record([SUMMARY_SECTION_TITLE])?;
        writer.write_record(SUMMARY_HEADER)?;
        for row in report.summary_table() {
            writer.write_record(row)?;
        }

        Ok(writer.into_inner().map_err(|e| e.into_error())?)
    }

    fn section_writer(buf: Vec<u8>) -> csv::Writer<Vec<u8>> {
        csv::WriterBuilder::new()
            .flexible(true)
            .terminator(csv::Terminator::CRLF)
            .from_writer(buf)
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReporterTrait for CsvReporter {
    /// @ai:intent Generate CSV report to file
    /// @ai:effects fs:write
    fn generate(&self, report: &AggregatedReport, output_path: &Path) -> Result<()> {
        let content = Self::render(report)?;
        write_atomic(output_path, &content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricSample, MetricsAggregator, RunResult, Unit};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_report() -> AggregatedReport {
        let mut first = RunResult::empty(1);
        first.insert(MetricSample::new("iops", 10.0, Unit::OpsPerSec));
        first.insert(MetricSample::new("avg_latency", 1.5, Unit::Millis));

        let mut third = RunResult::empty(3);
        third.insert(MetricSample::new("iops", 30.0, Unit::OpsPerSec));
        third.insert(MetricSample::new("avg_latency", 2.5, Unit::Millis));

        MetricsAggregator::aggregate(&[first, third]).unwrap()
    }

    #[test]
    fn test_render_layout() {
        let content = String::from_utf8(CsvReporter::render(&sample_report()).unwrap()).unwrap();

        let expected = [
            "Individual Run Metrics",
            "Run,iops (ops/s),avg_latency (ms)",
            "1,10.00,1.50",
            "3,30.00,2.50",
            "",
            "Aggregated Metrics",
            "Metric,Average,Std Dev,Unit,Min,Max",
            "Iops,20.00,14.14,ops/s,10.00,30.00",
            "Avg Latency,2.00,0.71,ms,1.50,2.50",
            "Average Latency,,,ms,1.50,2.50",
            "",
        ]
        .join("\r\n");
        assert_eq!(content, expected);
    }

    #[test]
    fn test_generate_csv_report() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("fio_results.csv");

        CsvReporter::new().generate(&sample_report(), &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert!(content.starts_with("Individual Run Metrics\r\n"));
        assert!(content.contains("\r\n\r\nAggregated Metrics\r\n"));
        assert!(!content.contains("\"\""));
    }

    #[test]
    fn test_generate_into_missing_directory_fails() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("missing").join("fio_results.csv");

        let result = CsvReporter::new().generate(&sample_report(), &output);
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
