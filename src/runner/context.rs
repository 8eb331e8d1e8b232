//! Assertion-capable context handed to every test action
//!
//! Assertions return a [`TestOutcome`] instead of panicking, so test bodies read as
//! `ctx.assert_equal(value, 3)?;` and the runner records the message verbatim.

use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::{TestError, TestOutcome};

/// Message used when `assert` fails without an explicit message
pub const DEFAULT_ASSERT_MESSAGE: &str = "Assertion failed";

/// Per-test context passed to a [`TestAction`](super::TestAction).
///
/// Cheap to clone; owned by the action's future so async bodies can move it freely.
#[derive(Debug, Clone)]
pub struct TestContext {
    suite: Arc<str>,
    test: Arc<str>,
}

impl TestContext {
    pub(crate) fn new(suite: Arc<str>, test: Arc<str>) -> Self {
        Self { suite, test }
    }

    /// Display name of the runner executing this test.
    pub fn suite_name(&self) -> &str {
        &self.suite
    }

    /// Name the test was registered under.
    pub fn test_name(&self) -> &str {
        &self.test
    }

    /// Fail with `"Assertion failed"` unless `condition` holds.
    pub fn assert(&self, condition: bool) -> TestOutcome {
        self.assert_msg(condition, DEFAULT_ASSERT_MESSAGE)
    }

    /// Fail with `message` unless `condition` holds.
    pub fn assert_msg(&self, condition: bool, message: impl Into<String>) -> TestOutcome {
        if condition {
            Ok(())
        } else {
            Err(TestError::assertion(message))
        }
    }

    /// Fail unless `actual == expected`.
    ///
    /// The default message names both values in `Debug` form: `Expected 5, got 6`, and for
    /// strings `Expected "five", got "5"`. `Debug` keeps the bound usable for collections and
    /// makes whitespace differences visible.
    pub fn assert_equal<A, E>(&self, actual: A, expected: E) -> TestOutcome
    where
        A: PartialEq<E> + Debug,
        E: Debug,
    {
        if actual == expected {
            Ok(())
        } else {
            Err(TestError::assertion(format!("Expected {:?}, got {:?}", expected, actual)))
        }
    }

    /// Fail with `message` unless `actual == expected`.
    pub fn assert_equal_msg<A, E>(&self, actual: A, expected: E, message: impl Into<String>) -> TestOutcome
    where
        A: PartialEq<E>,
    {
        self.assert_msg(actual == expected, message)
    }

    /// Fail unconditionally with `message`.
    pub fn fail(&self, message: impl Into<String>) -> TestOutcome {
        Err(TestError::assertion(message))
    }
}
