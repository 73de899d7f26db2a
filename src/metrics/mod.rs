//! @ai:module:intent Metric extraction and aggregation
//! @ai:module:layer application
//! @ai:module:public_api Unit, MetricSample, RunResult, Extractor, MetricsAggregator, AggregatedReport, SummaryRow

pub mod aggregator;
pub mod extractor;
pub mod types;

pub use aggregator::{
    display_name, format_value, AggregatedReport, MetricSeries, MetricsAggregator, RunRow,
    SeriesStats, SummaryRow,
};
pub use extractor::Extractor;
pub use types::{MetricSample, RunResult, Unit};
