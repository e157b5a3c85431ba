//! Pipeline stages.
//!
//! Stages are sequenced inside [`UploadPipeline`]; only the pipeline itself
//! is submitted to a queue. Dependency order within one pipeline is strict:
//! no stage starts before its predecessor's terminal result is observed.

pub(crate) mod create_video;
pub mod disk_space;
pub(crate) mod export;
pub(crate) mod export_quota;
pub mod pipeline;

pub use disk_space::{FileSizeCheckResult, check_disk_space};
pub use pipeline::UploadPipeline;
