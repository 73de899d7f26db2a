//! @ai:module:intent fio result documents and how they are read
//! @ai:module:layer domain
//! @ai:module:public_api FioDocument, Job, DocumentLoader, check_run_naming, run_filenames

pub mod document;
pub mod loader;

pub use document::{DirectionStats, FioDocument, Job, LatencyStats};
pub use loader::{check_run_naming, run_filenames, DocumentLoader, DocumentLoaderTrait};
