//! @ai:module:intent Report generation for aggregated fio results
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, CsvReporter, JsonReporter

pub mod csv_report;
pub mod json_report;

pub use csv_report::{CsvReporter, CsvReporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};

use crate::error::{Error, Result};
use crate::metrics::AggregatedReport;
use std::io::Write;
use std::path::Path;

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    csv: CsvReporter,
    json: JsonReporter,
}

impl ReportGenerator {
    /// @ai:intent Create a new report generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            csv: CsvReporter::new(),
            json: JsonReporter::new(),
        }
    }

    /// @ai:intent Write the CSV report and, when requested, the JSON export
    /// @ai:effects fs:write
    pub fn generate_all(
        &self,
        report: &AggregatedReport,
        csv_path: &Path,
        json_path: Option<&Path>,
    ) -> Result<()> {
        self.csv.generate(report, csv_path)?;
        tracing::info!("CSV report written to {}", csv_path.display());

        if let Some(json_path) = json_path {
            self.json.generate(report, json_path)?;
            tracing::info!("JSON report written to {}", json_path.display());
        }

        Ok(())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// @ai:intent Replace `path` with `content` or leave it untouched on failure
/// @ai:effects fs:write
pub(crate) fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let report_err = |source: std::io::Error| Error::ReportWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(dir).map_err(report_err)?;
    file.write_all(content).map_err(report_err)?;
    file.as_file().sync_all().map_err(report_err)?;
    file.persist(path).map_err(|e| report_err(e.error))?;

    Ok(())
}
