//! @ai:module:intent Typed view over a fio JSON result document
//! @ai:module:layer domain
//! @ai:module:public_api FioDocument, Job, DirectionStats, LatencyStats
//! @ai:module:stateless true
//!
//! Every field fio may omit is optional. Defaults are applied by the
//! accessor methods, not by callers:
//!
//! | field                         | default |
//! |-------------------------------|---------|
//! | `usr_cpu`, `sys_cpu`          | 0       |
//! | `read.bw`, `write.bw`         | 0       |
//! | `read.iops`, `write.iops`     | 0       |
//! | `lat_*.mean`, `lat_*.stddev`  | 0       |
//! | `read`, `write`               | empty   |

use serde::Deserialize;
use serde_json::{Map, Value};

/// @ai:intent Top-level fio `--output-format=json` document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FioDocument {
    #[serde(default)]
    pub jobs: Option<Vec<Job>>,
}

impl FioDocument {
    /// @ai:intent First job entry, the only one the extractor reads
    /// @ai:effects pure
    pub fn first_job(&self) -> Option<&Job> {
        self.jobs.as_ref().and_then(|jobs| jobs.first())
    }
}

/// @ai:intent One workload entry within a run
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub usr_cpu: Option<f64>,
    #[serde(default)]
    pub sys_cpu: Option<f64>,
    #[serde(default)]
    pub read: Option<DirectionStats>,
    #[serde(default)]
    pub write: Option<DirectionStats>,
}

impl Job {
    pub fn usr_cpu(&self) -> f64 {
        self.usr_cpu.unwrap_or(0.0)
    }

    pub fn sys_cpu(&self) -> f64 {
        self.sys_cpu.unwrap_or(0.0)
    }

    /// @ai:intent Read-side stats, empty when absent
    /// @ai:effects pure
    pub fn read(&self) -> DirectionStats {
        self.read.clone().unwrap_or_default()
    }

    /// @ai:intent Write-side stats, empty when absent
    /// @ai:effects pure
    pub fn write(&self) -> DirectionStats {
        self.write.clone().unwrap_or_default()
    }
}

/// @ai:intent Per-direction (read or write) results of a job
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectionStats {
    /// Bandwidth in KiB/s
    #[serde(default)]
    pub bw: Option<f64>,
    #[serde(default)]
    pub iops: Option<f64>,
    #[serde(default)]
    pub lat_ns: Option<LatencyStats>,
    #[serde(default)]
    pub lat_us: Option<LatencyStats>,
    #[serde(default)]
    pub lat_ms: Option<LatencyStats>,
}

impl DirectionStats {
    pub fn bw(&self) -> f64 {
        self.bw.unwrap_or(0.0)
    }

    pub fn iops(&self) -> f64 {
        self.iops.unwrap_or(0.0)
    }
}

/// @ai:intent Latency distribution block (`lat_ns`, `lat_us` or `lat_ms`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatencyStats {
    #[serde(default)]
    pub mean: Option<f64>,
    #[serde(default)]
    pub stddev: Option<f64>,
    /// min, max, N, percentiles and anything else fio reports
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl LatencyStats {
    pub fn mean(&self) -> f64 {
        self.mean.unwrap_or(0.0)
    }

    pub fn stddev(&self) -> f64 {
        self.stddev.unwrap_or(0.0)
    }

    /// @ai:intent A block written as `{}` carries no data and does not count as present
    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.mean.is_none() && self.stddev.is_none() && self.other.is_empty()
    }
}
