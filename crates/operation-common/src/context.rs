//! Execution context handed to every operation.
//!
//! The context carries the identity of the submission and the cancellation
//! token the operation must observe. Parent-to-child is ownership; the token
//! is the only channel a child has back to whoever cancels it.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Shared context for a single operation run.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Identifier of this submission; also tags progress events.
    pub id: Uuid,
    /// Name of the operation being run, for logging.
    pub name: String,
    /// The cancellation token.
    pub token: CancellationToken,
}

impl OperationContext {
    pub fn new(id: Uuid, name: impl Into<String>, token: CancellationToken) -> Self {
        Self {
            id,
            name: name.into(),
            token,
        }
    }

    /// Standalone context with a fresh id and token, useful in tests and for
    /// running an operation outside a queue.
    pub fn detached(name: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4(), name, CancellationToken::new())
    }
}
