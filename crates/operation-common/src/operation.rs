//! Operation trait and related types.

use async_trait::async_trait;

use crate::context::OperationContext;

/// A run-once cancellable unit of work.
///
/// Implementations are consumed by `execute`; an operation cannot be started
/// twice. The queue drives the state machine and delivers the terminal
/// [`Outcome`](crate::Outcome); implementations only return `Result`.
#[async_trait]
pub trait Operation: Send + 'static {
    type Output: Send + 'static;
    type Error: Send + 'static;

    /// Name of the operation, for logging and handles.
    fn name(&self) -> &'static str;

    /// Run the operation to its terminal result.
    ///
    /// # Cancel Safety
    ///
    /// Implementations must observe `ctx.token` at every stage boundary and
    /// pass it into long-running sub-work so a cancel request aborts the
    /// sub-step within a bounded time. After the token has fired, any value
    /// this method still returns is discarded by the queue; cleanup of
    /// partially produced resources is the implementation's responsibility
    /// (drop guards make this unconditional).
    async fn execute(self: Box<Self>, ctx: OperationContext) -> Result<Self::Output, Self::Error>;
}
