//! # Updraft
//!
//! A cancellable orchestration engine that prepares media assets for upload
//! to a remote video service: verify local storage capacity, export the
//! asset to a deliverable file, validate remaining upload quota, create the
//! remote video record, then hand the exported file back for transfer.
//!
//! The engine coordinates heterogeneous asynchronous sources (filesystem
//! probes, export sessions with progress callbacks, network requests) under
//! one failure and cancellation model. Collaborators sit behind
//! [`capability`] traits; the [`Uploader`] front-end wires them to a bounded
//! operation queue and exposes `submit` per asset.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use updraft::*;
//! # async fn example(exporter: Arc<dyn MediaExporter>, quota: Arc<dyn QuotaCheck>, remote: Arc<dyn RemoteCreate>) {
//! let caps = Capabilities {
//!     storage: Arc::new(SysinfoStorageProbe::new()),
//!     exporter,
//!     cloud: None,
//!     quota,
//!     remote,
//! };
//! let uploader = Uploader::new(caps);
//!
//! let handle = uploader.submit(
//!     AssetRef::local("clip-1", "/media/clip.mov"),
//!     AccountIdentity::new("/users/42"),
//!     Some(VideoSettings::with_privacy("unlisted")),
//! );
//!
//! match handle.join().await {
//!     Outcome::Completed(prepared) => println!("upload to {}", prepared.ticket.upload_link),
//!     Outcome::Failed(err) => eprintln!("failed: {err}"),
//!     Outcome::Cancelled => eprintln!("cancelled"),
//! }
//! # }
//! ```

pub mod artifact;
pub mod asset;
pub mod capability;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod ops;
pub mod progress;
pub mod settings;
pub mod ticket;
pub mod uploader;

pub use artifact::{ExportResult, ExportedFile, PreparedUpload};
pub use asset::{AccountIdentity, AssetRef, AssetResidency};
pub use capability::{
    Capabilities, CloudStore, DestinationConstraints, ExportOutput, MediaExporter, ProgressFn,
    QuotaCheck, RemoteCreate, StorageProbe, SysinfoStorageProbe,
};
pub use config::UploaderConfig;
pub use descriptor::TaskDescriptor;
pub use error::UploadError;
pub use ops::{FileSizeCheckResult, UploadPipeline, check_disk_space};
pub use progress::{ProgressPhase, ProgressReporter, ProgressUpdate};
pub use settings::VideoSettings;
pub use ticket::UploadTicket;
pub use uploader::{UploadHandle, Uploader};

pub use operation_common::{CancellationToken, OperationState, Outcome, QueueConfig};
