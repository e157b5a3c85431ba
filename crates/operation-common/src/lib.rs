//! # Operation Common
//!
//! This crate provides the primitives for building cancellable asynchronous
//! units of work: a run-once [`Operation`] trait, a three-way terminal
//! [`Outcome`], a bounded [`OperationQueue`], and per-submission
//! [`OperationHandle`]s that expose cancellation and a one-shot completion.
//!
//! ## Features
//!
//! - Generic `Operation` trait for any success/error pair
//! - Cooperative cancellation through `CancellationToken`, signalled from the
//!   handle or from queue shutdown
//! - Cancellation is a distinct terminal state, never an error value

pub mod context;
pub mod operation;
pub mod outcome;
pub mod queue;
pub mod state;

pub use context::OperationContext;
pub use operation::Operation;
pub use outcome::Outcome;
pub use queue::{OperationHandle, OperationQueue, QueueConfig};
pub use state::OperationState;

pub use tokio_util::sync::CancellationToken;
