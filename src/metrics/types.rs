//! @ai:module:intent Metric types extracted from fio runs
//! @ai:module:layer domain
//! @ai:module:public_api Unit, MetricSample, RunResult, metric names
//! @ai:module:stateless true

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CPU_USR: &str = "cpu_usr";
pub const CPU_SYS: &str = "cpu_sys";
pub const CPU_TOTAL: &str = "cpu_total";
pub const BANDWIDTH: &str = "bandwidth";
pub const AVG_LATENCY: &str = "avg_latency";
pub const STDEV_LATENCY: &str = "stdev_latency";
pub const IOPS: &str = "iops";

/// @ai:intent Measurement unit attached to every metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "MiB/s")]
    MebibytesPerSec,
    #[serde(rename = "ms")]
    Millis,
    #[serde(rename = "ops/s")]
    OpsPerSec,
    /// No source data; the value is a placeholder 0, not a measurement
    #[serde(rename = "N/A")]
    NotAvailable,
}

impl Unit {
    /// @ai:intent Unit label as written in reports
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Percent => "%",
            Unit::MebibytesPerSec => "MiB/s",
            Unit::Millis => "ms",
            Unit::OpsPerSec => "ops/s",
            Unit::NotAvailable => "N/A",
        }
    }

    pub fn is_available(&self) -> bool {
        *self != Unit::NotAvailable
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent One named scalar observation from a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
    pub unit: Unit,
}

impl MetricSample {
    pub fn new(name: &str, value: f64, unit: Unit) -> Self {
        Self {
            name: name.to_string(),
            value,
            unit,
        }
    }

    /// @ai:intent Column label used in the per-run table, e.g. `bandwidth (MiB/s)`
    /// @ai:effects pure
    pub fn column_label(&self) -> String {
        format!("{} ({})", self.name, self.unit)
    }
}

/// @ai:intent Metrics extracted from one run, in extraction order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// 1-based index of the run among all attempted runs
    pub run: u32,
    pub samples: IndexMap<String, MetricSample>,
}

impl RunResult {
    /// @ai:intent Create a run result with no metrics
    /// @ai:effects pure
    pub fn empty(run: u32) -> Self {
        Self {
            run,
            samples: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, sample: MetricSample) {
        self.samples.insert(sample.name.clone(), sample);
    }

    pub fn get(&self, name: &str) -> Option<&MetricSample> {
        self.samples.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricSample> {
        self.samples.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_labels() {
        assert_eq!(Unit::Percent.to_string(), "%");
        assert_eq!(Unit::MebibytesPerSec.to_string(), "MiB/s");
        assert_eq!(Unit::NotAvailable.to_string(), "N/A");
        assert!(!Unit::NotAvailable.is_available());
        assert!(Unit::Millis.is_available());
    }

    #[test]
    fn test_unit_serializes_as_label() {
        let json = serde_json::to_string(&Unit::OpsPerSec).unwrap();
        assert_eq!(json, "\"ops/s\"");
    }

    #[test]
    fn test_column_label() {
        let sample = MetricSample::new(AVG_LATENCY, 1.25, Unit::Millis);
        assert_eq!(sample.column_label(), "avg_latency (ms)");
    }

    #[test]
    fn test_run_result_preserves_insertion_order() {
        let mut run = RunResult::empty(1);
        run.insert(MetricSample::new(IOPS, 10.0, Unit::OpsPerSec));
        run.insert(MetricSample::new(CPU_USR, 1.0, Unit::Percent));

        let names: Vec<_> = run.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![IOPS, CPU_USR]);
        assert_eq!(run.len(), 2);
    }
}
