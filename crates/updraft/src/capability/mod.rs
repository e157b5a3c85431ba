//! Capability seams consumed by the pipeline.
//!
//! Each collaborator the pipeline depends on (storage measurement, export,
//! cloud materialization, quota, remote create) sits behind an object-safe
//! async trait so tests can substitute mocks and hosts can bind their own
//! frameworks. The pipeline owns the sequencing; capabilities own the
//! mechanics.

pub mod cloud;
pub mod export;
pub mod quota;
pub mod remote;
pub mod storage;

pub use cloud::CloudStore;
pub use export::{DestinationConstraints, ExportOutput, MediaExporter};
pub use quota::QuotaCheck;
pub use remote::RemoteCreate;
pub use storage::{StorageProbe, SysinfoStorageProbe};

use std::sync::Arc;

/// Best-effort progress callback handed into long-running capabilities.
/// Fractions are raw; the caller clamps and keeps them monotonic.
pub type ProgressFn = Arc<dyn Fn(f64) + Send + Sync>;

/// The full set of collaborators a pipeline runs against.
///
/// `cloud` is optional: an uploader serving only local assets never needs a
/// cloud store, and submitting a cloud asset without one is a configuration
/// error caught before any stage runs.
#[derive(Clone)]
pub struct Capabilities {
    pub storage: Arc<dyn StorageProbe>,
    pub exporter: Arc<dyn MediaExporter>,
    pub cloud: Option<Arc<dyn CloudStore>>,
    pub quota: Arc<dyn QuotaCheck>,
    pub remote: Arc<dyn RemoteCreate>,
}
