//! Success/failure envelope returned by every mutating operation.
//!
//! Services build exactly one envelope per call at the unit-of-work
//! boundary. Inbound adapters decide how a failed envelope translates to
//! their transport; the envelope itself stays protocol agnostic.

use crate::domain::Error;

/// Carrier for an operation result, its diagnostics, and the underlying
/// fault when one was caught.
///
/// ## Invariants
/// - `failed()` is `true` iff a cause is set or a failure message explains
///   what went wrong.
/// - The element is meaningful only when `failed()` is `false`.
///
/// # Examples
/// ```
/// use gazetteer::domain::Outcome;
///
/// let outcome = Outcome::success(7);
/// assert!(!outcome.failed());
/// assert_eq!(outcome.element(), Some(&7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    element: Option<T>,
    messages: Vec<String>,
    failed: bool,
    cause: Option<Error>,
}

impl<T> Outcome<T> {
    /// Build a success envelope carrying the produced element.
    pub fn success(element: T) -> Self {
        Self {
            element: Some(element),
            messages: Vec::new(),
            failed: false,
            cause: None,
        }
    }

    /// Build a success envelope with an informational note, e.g. a
    /// deletion confirmation.
    pub fn success_with_message(element: T, message: impl Into<String>) -> Self {
        Self {
            element: Some(element),
            messages: vec![message.into()],
            failed: false,
            cause: None,
        }
    }

    /// Build a failure envelope explained by a diagnostic message alone.
    ///
    /// Used for non-exceptional failures such as "not found" or a rejected
    /// credential, where no underlying fault exists.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            element: None,
            messages: vec![message.into()],
            failed: true,
            cause: None,
        }
    }

    /// Build a failure envelope carrying the caught fault as its cause.
    pub fn failure_with_cause(message: impl Into<String>, cause: Error) -> Self {
        Self {
            element: None,
            messages: vec![message.into()],
            failed: true,
            cause: Some(cause),
        }
    }

    /// Whether the operation failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// The produced element, present only on success.
    pub fn element(&self) -> Option<&T> {
        self.element.as_ref()
    }

    /// Consume the envelope, yielding the element.
    pub fn into_element(self) -> Option<T> {
        self.element
    }

    /// Ordered diagnostic messages collected during the operation.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The underlying fault, set when the failure originated from a caught
    /// error rather than a plain rejection.
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_ref()
    }

    /// Map the element type while preserving diagnostics and failure state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            element: self.element.map(f),
            messages: self.messages,
            failed: self.failed,
            cause: self.cause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error;
    use rstest::rstest;

    #[rstest]
    fn success_has_element_and_no_diagnostics() {
        let outcome = Outcome::success("row");
        assert!(!outcome.failed());
        assert_eq!(outcome.element(), Some(&"row"));
        assert!(outcome.messages().is_empty());
        assert!(outcome.cause().is_none());
    }

    #[rstest]
    fn informational_note_does_not_mark_failure() {
        let outcome = Outcome::success_with_message((), "record removed");
        assert!(!outcome.failed());
        assert_eq!(outcome.messages(), ["record removed"]);
    }

    #[rstest]
    fn failure_without_cause_still_carries_a_diagnostic() {
        let outcome: Outcome<()> = Outcome::failure("no such record");
        assert!(outcome.failed());
        assert!(outcome.cause().is_none());
        assert_eq!(outcome.messages(), ["no such record"]);
    }

    #[rstest]
    fn failure_with_cause_exposes_the_fault() {
        let outcome: Outcome<()> =
            Outcome::failure_with_cause("save failed", Error::internal("constraint violated"));
        assert!(outcome.failed());
        assert_eq!(
            outcome.cause().map(Error::message),
            Some("constraint violated")
        );
    }

    #[rstest]
    fn map_preserves_failure_state() {
        let outcome: Outcome<i32> = Outcome::failure("nope");
        let mapped = outcome.map(|n| n * 2);
        assert!(mapped.failed());
        assert_eq!(mapped.element(), None);
    }
}
