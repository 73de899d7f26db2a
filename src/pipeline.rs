//! @ai:module:intent Sequential orchestration: name runs, extract, aggregate, report
//! @ai:module:layer application
//! @ai:module:public_api Pipeline, PipelineOutcome

use crate::config::ReportConfig;
use crate::error::Result;
use crate::input::{run_filenames, DocumentLoader, DocumentLoaderTrait};
use crate::metrics::{AggregatedReport, Extractor, MetricsAggregator};
use crate::report::ReportGenerator;
use std::path::PathBuf;

/// @ai:intent Result of a pipeline execution
#[derive(Debug)]
pub enum PipelineOutcome {
    /// Reports were written
    Written {
        report: AggregatedReport,
        attempted: u32,
    },
    /// No run yielded a metric; nothing was written
    NoData { attempted: u32 },
}

/// @ai:intent Drives extraction and aggregation over the configured runs
pub struct Pipeline<L = DocumentLoader> {
    config: ReportConfig,
    extractor: Extractor<L>,
    reporter: ReportGenerator,
}

impl Pipeline<DocumentLoader> {
    /// @ai:intent Create a pipeline reading run files from disk
    /// @ai:pre config has been validated or will be validated by run()
    /// @ai:effects pure
    pub fn new(config: ReportConfig) -> Self {
        Self::with_extractor(config, Extractor::new())
    }
}

impl<L: DocumentLoaderTrait> Pipeline<L> {
    pub fn with_extractor(config: ReportConfig, extractor: Extractor<L>) -> Self {
        Self {
            config,
            extractor,
            reporter: ReportGenerator::new(),
        }
    }

    /// @ai:intent Run files in 1-based order
    /// @ai:effects pure
    pub fn run_files(&self) -> Result<Vec<PathBuf>> {
        run_filenames(
            self.config.iterations,
            &self.config.input_prefix,
            &self.config.extension,
        )
    }

    /// @ai:intent Extract every run and fold the results in run order
    /// @ai:post None when no run yielded a metric
    /// @ai:effects fs:read, log
    pub fn collect(&self) -> Result<Option<AggregatedReport>> {
        self.config.validate()?;

        let mut aggregator = MetricsAggregator::new();

        for (run, path) in (1u32..).zip(self.run_files()?) {
            tracing::info!(
                "[{}/{}] Parsing {}",
                run,
                self.config.iterations,
                path.display()
            );
            let result = self.extractor.extract_file(run, &path);

            if !aggregator.add_run(&result) {
                tracing::warn!(
                    "Could not extract metrics from {}. Skipping.",
                    path.display()
                );
                continue;
            }

            for sample in result.iter() {
                tracing::debug!("  {}: {:.2} {}", sample.name, sample.value, sample.unit);
            }
        }

        tracing::info!(
            "Extracted metrics from {} of {} runs",
            aggregator.run_count(),
            self.config.iterations
        );

        Ok(aggregator.finish())
    }

    /// @ai:intent Collect all runs and write the configured reports
    /// @ai:post reports are written only when at least one run yielded metrics
    /// @ai:effects fs:read, fs:write, log
    pub fn run(&self) -> Result<PipelineOutcome> {
        let attempted = self.config.iterations;

        let Some(report) = self.collect()? else {
            tracing::warn!("No metrics extracted from any fio output files");
            return Ok(PipelineOutcome::NoData { attempted });
        };

        self.reporter.generate_all(
            &report,
            &self.config.csv_output,
            self.config.json_output.as_deref(),
        )?;

        Ok(PipelineOutcome::Written { report, attempted })
    }
}
