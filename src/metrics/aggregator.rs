//! @ai:module:intent Statistical aggregation of fio run metrics
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, MetricSeries, SeriesStats, SummaryRow, RunRow, AggregatedReport
//! @ai:module:stateless false

use crate::metrics::types::{MetricSample, RunResult, Unit, AVG_LATENCY, STDEV_LATENCY};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

pub const RUN_SECTION_TITLE: &str = "Individual Run Metrics";
pub const SUMMARY_SECTION_TITLE: &str = "Aggregated Metrics";
pub const SUMMARY_HEADER: [&str; 6] = ["Metric", "Average", "Std Dev", "Unit", "Min", "Max"];

const RUN_COLUMN: &str = "Run";
const NOT_APPLICABLE: &str = "N/A";
const AVG_LATENCY_RANGE_LABEL: &str = "Average Latency";
const STDEV_LATENCY_RANGE_LABEL: &str = "Standard Deviation Latency";

/// @ai:intent Values of one metric across runs, with its last reported unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub unit: Unit,
    pub values: Vec<f64>,
}

/// @ai:intent Descriptive statistics of a non-empty series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    /// Sample standard deviation; None below two samples
    pub stdev: Option<f64>,
    pub min: f64,
    pub max: f64,
}

impl MetricSeries {
    pub fn new(unit: Unit) -> Self {
        Self {
            unit,
            values: Vec::new(),
        }
    }

    /// @ai:intent Mean, sample stdev, min and max of the series
    /// @ai:post None when the series is empty
    /// @ai:effects pure
    pub fn stats(&self) -> Option<SeriesStats> {
        let (min, max) = min_max(&self.values)?;
        let n = self.values.len();
        let mean = self.values.iter().sum::<f64>() / n as f64;

        let stdev = (n >= 2).then(|| {
            let sum_sq_diff: f64 = self.values.iter().map(|x| (x - mean).powi(2)).sum();
            (sum_sq_diff / (n - 1) as f64).sqrt()
        });

        Some(SeriesStats {
            mean,
            stdev,
            min,
            max,
        })
    }
}

/// @ai:intent Smallest and largest value, None for an empty slice
/// @ai:effects pure
fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

/// @ai:intent One row of the aggregated table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryRow {
    /// Full statistics for a metric
    Stats {
        metric: String,
        mean: f64,
        stdev: Option<f64>,
        unit: Unit,
        min: f64,
        max: f64,
    },
    /// Metric registered without any value
    NoData { metric: String },
    /// Cross-run extremes restricted to runs with real latency data
    Range {
        metric: String,
        unit: Unit,
        min: f64,
        max: f64,
    },
}

impl SummaryRow {
    pub fn metric(&self) -> &str {
        match self {
            SummaryRow::Stats { metric, .. }
            | SummaryRow::NoData { metric }
            | SummaryRow::Range { metric, .. } => metric,
        }
    }

    /// @ai:intent Render the row as table cells matching SUMMARY_HEADER
    /// @ai:effects pure
    pub fn cells(&self) -> Vec<String> {
        match self {
            SummaryRow::Stats {
                metric,
                mean,
                stdev,
                unit,
                min,
                max,
            } => vec![
                metric.clone(),
                format_value(*mean),
                stdev.map(format_value).unwrap_or_else(|| NOT_APPLICABLE.to_string()),
                unit.to_string(),
                format_value(*min),
                format_value(*max),
            ],
            SummaryRow::NoData { metric } => vec![
                metric.clone(),
                "No data".to_string(),
                NOT_APPLICABLE.to_string(),
                NOT_APPLICABLE.to_string(),
                NOT_APPLICABLE.to_string(),
                NOT_APPLICABLE.to_string(),
            ],
            SummaryRow::Range {
                metric,
                unit,
                min,
                max,
            } => vec![
                metric.clone(),
                String::new(),
                String::new(),
                unit.to_string(),
                format_value(*min),
                format_value(*max),
            ],
        }
    }
}

/// @ai:intent Values of one successfully parsed run keyed by column label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRow {
    pub run: u32,
    pub values: IndexMap<String, f64>,
}

/// @ai:intent Final per-run and summary tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedReport {
    /// Per-run column labels (`name (unit)`) in first-seen order
    pub columns: Vec<String>,
    pub runs: Vec<RunRow>,
    pub summary: Vec<SummaryRow>,
}

impl AggregatedReport {
    /// @ai:intent Header of the per-run section
    /// @ai:effects pure
    pub fn run_header(&self) -> Vec<String> {
        std::iter::once(RUN_COLUMN.to_string())
            .chain(self.columns.iter().cloned())
            .collect()
    }

    /// @ai:intent Per-run rows; a column a run did not report renders empty
    /// @ai:effects pure
    pub fn run_table(&self) -> Vec<Vec<String>> {
        self.runs
            .iter()
            .map(|row| {
                std::iter::once(row.run.to_string())
                    .chain(self.columns.iter().map(|column| {
                        row.values
                            .get(column)
                            .map(|v| format_value(*v))
                            .unwrap_or_default()
                    }))
                    .collect()
            })
            .collect()
    }

    /// @ai:intent Aggregated rows rendered as cells
    /// @ai:effects pure
    pub fn summary_table(&self) -> Vec<Vec<String>> {
        self.summary.iter().map(SummaryRow::cells).collect()
    }
}

/// @ai:intent Folds run results, in order, into series and table rows
#[derive(Debug, Default)]
pub struct MetricsAggregator {
    series: IndexMap<String, MetricSeries>,
    columns: IndexSet<String>,
    runs: Vec<RunRow>,
    avg_latency: Vec<f64>,
    stdev_latency: Vec<f64>,
}

impl MetricsAggregator {
    /// @ai:intent Create an empty aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Aggregate a complete sequence of runs
    /// @ai:post None when no run contributed a metric
    /// @ai:effects pure
    pub fn aggregate<'a, I>(runs: I) -> Option<AggregatedReport>
    where
        I: IntoIterator<Item = &'a RunResult>,
    {
        let mut aggregator = Self::new();
        for run in runs {
            aggregator.add_run(run);
        }
        aggregator.finish()
    }

    /// @ai:intent Fold one run into the accumulated state
    /// @ai:post returns false and changes nothing when the run has no metrics
    /// @ai:effects state
    pub fn add_run(&mut self, result: &RunResult) -> bool {
        if result.is_empty() {
            return false;
        }

        let mut values = IndexMap::with_capacity(result.len());

        for sample in result.iter() {
            let series = self
                .series
                .entry(sample.name.clone())
                .or_insert_with(|| MetricSeries::new(sample.unit));
            series.unit = sample.unit;
            series.values.push(sample.value);

            let column = sample.column_label();
            self.columns.insert(column.clone());
            values.insert(column, sample.value);
        }

        Self::collect_latency(result.get(AVG_LATENCY), &mut self.avg_latency);
        Self::collect_latency(result.get(STDEV_LATENCY), &mut self.stdev_latency);

        self.runs.push(RunRow {
            run: result.run,
            values,
        });

        true
    }

    /// Runs folded so far.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    fn collect_latency(sample: Option<&MetricSample>, into: &mut Vec<f64>) {
        if let Some(sample) = sample.filter(|s| s.unit.is_available()) {
            into.push(sample.value);
        }
    }

    /// @ai:intent Build the final tables
    /// @ai:post None when no run was folded ("no data to report")
    /// @ai:effects pure
    pub fn finish(self) -> Option<AggregatedReport> {
        if self.series.is_empty() {
            return None;
        }

        let mut summary: Vec<SummaryRow> = self
            .series
            .iter()
            .map(|(name, series)| {
                let metric = display_name(name);
                match series.stats() {
                    Some(stats) => SummaryRow::Stats {
                        metric,
                        mean: stats.mean,
                        stdev: stats.stdev,
                        unit: series.unit,
                        min: stats.min,
                        max: stats.max,
                    },
                    None => SummaryRow::NoData { metric },
                }
            })
            .collect();

        summary.extend(latency_range(AVG_LATENCY_RANGE_LABEL, &self.avg_latency));
        summary.extend(latency_range(STDEV_LATENCY_RANGE_LABEL, &self.stdev_latency));

        Some(AggregatedReport {
            columns: self.columns.into_iter().collect(),
            runs: self.runs,
            summary,
        })
    }
}

/// @ai:intent Min/max row over valid latency values, omitted when there are none
/// @ai:effects pure
fn latency_range(label: &str, values: &[f64]) -> Option<SummaryRow> {
    let (min, max) = min_max(values)?;
    Some(SummaryRow::Range {
        metric: label.to_string(),
        unit: Unit::Millis,
        min,
        max,
    })
}

/// @ai:intent Human-readable metric name: `avg_latency` -> `Avg Latency`
/// @ai:effects pure
pub fn display_name(metric: &str) -> String {
    let mut out = String::with_capacity(metric.len());
    let mut prev_alpha = false;

    for c in metric.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// @ai:intent Fixed two-decimal rendering used for every numeric cell
/// @ai:effects pure
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}
