//! Failure taxonomy for test actions
//!
//! Every way a test can fail is a [`TestError`]. The runner catches all of them at the
//! single-test granularity and records only the bare message on the resulting
//! [`TestResult`](crate::runner::TestResult); none of them ever propagate out of a run.

use std::fmt::Display;

use thiserror::Error;

/// Errors a test action can signal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TestError {
    /// A test-local expectation was violated (`assert` / `assert_equal`).
    #[error("{0}")]
    Assertion(String),

    /// Any other error returned by an action, e.g. a collaborator failing.
    #[error("{0}")]
    Action(String),

    /// The action panicked while running.
    #[error("{0}")]
    Panic(String),
}

impl TestError {
    /// Create an assertion failure with the given message.
    pub fn assertion(message: impl Into<String>) -> Self {
        TestError::Assertion(message.into())
    }

    /// Wrap any displayable error as an action error.
    ///
    /// Handy as a `map_err` target: `client.fetch().await.map_err(TestError::action)?`.
    pub fn action(err: impl Display) -> Self {
        TestError::Action(err.to_string())
    }

    /// The human-readable message recorded on a failed result.
    pub fn message(&self) -> &str {
        match self {
            TestError::Assertion(msg) | TestError::Action(msg) | TestError::Panic(msg) => msg,
        }
    }
}

impl From<std::io::Error> for TestError {
    fn from(err: std::io::Error) -> Self {
        TestError::action(err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for TestError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        TestError::Action(err.to_string())
    }
}

/// Outcome of a single test action: `Ok(())` passes, any [`TestError`] fails.
pub type TestOutcome = Result<(), TestError>;

/// Turn a panic payload into a readable message.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_is_bare_text() {
        assert_eq!(TestError::assertion("boom").message(), "boom");
        assert_eq!(TestError::action("disk full").to_string(), "disk full");
    }

    #[test]
    fn test_io_error_becomes_action_error() {
        let err: TestError = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file").into();
        assert_eq!(err, TestError::Action("no such file".to_string()));
    }

    #[test]
    fn test_panic_message_from_payloads() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");

        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");

        let payload: Box<dyn std::any::Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "test panicked");
    }
}
