//! @ai:module:intent fio run result aggregation library
//! @ai:module:layer application
//! @ai:module:public_api config, error, input, metrics, pipeline, report

pub mod config;
pub mod error;
pub mod input;
pub mod metrics;
pub mod pipeline;
pub mod report;

pub use config::ReportConfig;
pub use error::{Error, Result};
pub use input::{run_filenames, DocumentLoader, FioDocument};
pub use metrics::{AggregatedReport, Extractor, MetricsAggregator, RunResult, SummaryRow, Unit};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use report::ReportGenerator;
