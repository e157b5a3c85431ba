//! Lifecycle states for a unit of work.

use serde::{Deserialize, Serialize};

/// Lifecycle of an operation.
///
/// `Pending → Executing → {Finished, Cancelled}`. `Finished` and `Cancelled`
/// are terminal; a cancel request observed before or during execution ends in
/// `Cancelled` without the success path running to delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationState {
    /// Submitted, waiting for a worker slot.
    Pending,
    /// Running.
    Executing,
    /// Ran to a success or error terminal.
    Finished,
    /// Cancelled before delivering a success or error.
    Cancelled,
}

impl OperationState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Finished | OperationState::Cancelled)
    }
}

impl std::fmt::Display for OperationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationState::Pending => write!(f, "pending"),
            OperationState::Executing => write!(f, "executing"),
            OperationState::Finished => write!(f, "finished"),
            OperationState::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        assert!(!OperationState::Pending.is_terminal());
        assert!(!OperationState::Executing.is_terminal());
        assert!(OperationState::Finished.is_terminal());
        assert!(OperationState::Cancelled.is_terminal());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(format!("{}", OperationState::Pending), "pending");
        assert_eq!(format!("{}", OperationState::Cancelled), "cancelled");
    }
}
