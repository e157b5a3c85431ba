//! Terminal delivery for a unit of work.

/// Terminal result of an operation.
///
/// Exactly one of the three is delivered, exactly once. `Cancelled` is not an
/// error: it means the caller (or queue shutdown) stopped the operation, and
/// any success value produced concurrently with the cancel request has been
/// discarded.
#[derive(Debug)]
pub enum Outcome<T, E> {
    /// The operation ran to completion and produced a value.
    Completed(T),
    /// The operation ran and failed.
    Failed(E),
    /// The operation was cancelled before or while running.
    Cancelled,
}

impl<T, E> Outcome<T, E> {
    pub fn from_result(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Completed(value),
            Err(err) => Outcome::Failed(err),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// Consume the outcome, returning the success value if there is one.
    pub fn completed(self) -> Option<T> {
        match self {
            Outcome::Completed(value) => Some(value),
            _ => None,
        }
    }

    /// Consume the outcome, returning the error if there is one.
    pub fn failed(self) -> Option<E> {
        match self {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result() {
        let ok: Outcome<u32, &str> = Outcome::from_result(Ok(7));
        assert!(ok.is_completed());
        assert_eq!(ok.completed(), Some(7));

        let err: Outcome<u32, &str> = Outcome::from_result(Err("boom"));
        assert!(err.is_failed());
        assert_eq!(err.failed(), Some("boom"));
    }

    #[test]
    fn test_cancelled_is_neither_completed_nor_failed() {
        let cancelled: Outcome<u32, &str> = Outcome::Cancelled;
        assert!(cancelled.is_cancelled());
        assert!(!cancelled.is_completed());
        assert!(!cancelled.is_failed());
    }

    #[test]
    fn test_accessors_on_wrong_variant() {
        let ok: Outcome<u32, &str> = Outcome::Completed(1);
        assert_eq!(ok.failed(), None);

        let cancelled: Outcome<u32, &str> = Outcome::Cancelled;
        assert_eq!(cancelled.completed(), None);
    }
}
