//! @ai:module:intent Extract performance metrics from a fio result document
//! @ai:module:layer application
//! @ai:module:public_api Extractor
//! @ai:module:stateless true

use crate::input::{DocumentLoader, DocumentLoaderTrait, FioDocument, Job, LatencyStats};
use crate::metrics::types::{
    MetricSample, RunResult, Unit, AVG_LATENCY, BANDWIDTH, CPU_SYS, CPU_TOTAL, CPU_USR, IOPS,
    STDEV_LATENCY,
};
use std::path::Path;

const KIB_PER_MIB: f64 = 1024.0;

type LatencyAccessor = fn(&Job) -> Option<&LatencyStats>;

/// Latency sources in priority order, each with its divisor to milliseconds.
/// The first present, non-empty block wins.
const LATENCY_SOURCES: [(&str, LatencyAccessor, f64); 6] = [
    ("read.lat_ns", read_lat_ns, 1_000_000.0),
    ("read.lat_us", read_lat_us, 1_000.0),
    ("read.lat_ms", read_lat_ms, 1.0),
    ("write.lat_ns", write_lat_ns, 1_000_000.0),
    ("write.lat_us", write_lat_us, 1_000.0),
    ("write.lat_ms", write_lat_ms, 1.0),
];

fn read_lat_ns(job: &Job) -> Option<&LatencyStats> {
    job.read.as_ref()?.lat_ns.as_ref()
}

fn read_lat_us(job: &Job) -> Option<&LatencyStats> {
    job.read.as_ref()?.lat_us.as_ref()
}

fn read_lat_ms(job: &Job) -> Option<&LatencyStats> {
    job.read.as_ref()?.lat_ms.as_ref()
}

fn write_lat_ns(job: &Job) -> Option<&LatencyStats> {
    job.write.as_ref()?.lat_ns.as_ref()
}

fn write_lat_us(job: &Job) -> Option<&LatencyStats> {
    job.write.as_ref()?.lat_us.as_ref()
}

fn write_lat_ms(job: &Job) -> Option<&LatencyStats> {
    job.write.as_ref()?.lat_ms.as_ref()
}

/// @ai:intent Turns fio documents into run results
/// @ai:effects fs:read (via loader)
pub struct Extractor<L = DocumentLoader> {
    loader: L,
}

impl Extractor<DocumentLoader> {
    /// @ai:intent Create an extractor reading from the filesystem
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            loader: DocumentLoader::new(),
        }
    }
}

impl Default for Extractor<DocumentLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: DocumentLoaderTrait> Extractor<L> {
    /// @ai:intent Create an extractor with a custom document source
    /// @ai:effects pure
    pub fn with_loader(loader: L) -> Self {
        Self { loader }
    }

    /// @ai:intent Extract metrics for one run file
    /// @ai:post never fails; unreadable or malformed files yield an empty result
    /// @ai:effects fs:read, log
    pub fn extract_file(&self, run: u32, path: &Path) -> RunResult {
        match self.loader.load(path) {
            Ok(doc) => Self::extract(run, &doc),
            Err(e) => {
                tracing::warn!("Skipping run {}: {}", run, e);
                RunResult::empty(run)
            }
        }
    }

    /// @ai:intent Extract metrics from the first job of a parsed document
    /// @ai:post empty when the document has no jobs
    /// @ai:effects pure
    pub fn extract(run: u32, doc: &FioDocument) -> RunResult {
        let mut result = RunResult::empty(run);

        let Some(job) = doc.first_job() else {
            return result;
        };

        let usr = job.usr_cpu();
        let sys = job.sys_cpu();
        result.insert(MetricSample::new(CPU_USR, usr, Unit::Percent));
        result.insert(MetricSample::new(CPU_SYS, sys, Unit::Percent));
        result.insert(MetricSample::new(CPU_TOTAL, usr + sys, Unit::Percent));

        let read = job.read();
        let write = job.write();

        let bandwidth = (read.bw() + write.bw()) / KIB_PER_MIB;
        result.insert(MetricSample::new(BANDWIDTH, bandwidth, Unit::MebibytesPerSec));

        let (avg, stdev) = Self::latency(job);
        result.insert(avg);
        result.insert(stdev);

        result.insert(MetricSample::new(IOPS, read.iops() + write.iops(), Unit::OpsPerSec));

        result
    }

    /// @ai:intent Pick the highest-priority latency block and convert it to ms
    /// @ai:post both samples carry Unit::NotAvailable and value 0 when no block exists
    /// @ai:effects pure
    fn latency(job: &Job) -> (MetricSample, MetricSample) {
        let found = LATENCY_SOURCES.iter().find_map(|(source, accessor, factor)| {
            accessor(job)
                .filter(|stats| !stats.is_empty())
                .map(|stats| (*source, stats, *factor))
        });

        match found {
            Some((source, stats, factor)) => {
                tracing::debug!("Using latency from {}", source);
                (
                    MetricSample::new(AVG_LATENCY, stats.mean() / factor, Unit::Millis),
                    MetricSample::new(STDEV_LATENCY, stats.stddev() / factor, Unit::Millis),
                )
            }
            None => (
                MetricSample::new(AVG_LATENCY, 0.0, Unit::NotAvailable),
                MetricSample::new(STDEV_LATENCY, 0.0, Unit::NotAvailable),
            ),
        }
    }
}
