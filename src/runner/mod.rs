//! Sequential asynchronous test runner
//!
//! A [`TestRunner`] owns an ordered collection of named test cases. [`TestRunner::run`]
//! executes them one at a time in registration order, awaiting each action to completion
//! before looking at its outcome, and writes a report through a caller-supplied sink.
//!
//! ## Per-run state machine
//!
//! `PENDING → RUNNING(0) → PASS(0)|FAIL(0) → RUNNING(1) → … → SUMMARY → DONE`
//!
//! A failing test never stops the run. There is no cancellation and no per-test timeout:
//! an action that never completes stalls the whole run.
//!
//! ## Counters
//!
//! Pass/fail counts are always derived from the recorded results, so
//! `passed() + failed() == results().len()` holds by construction.

pub mod action;
pub mod context;
pub mod reporter;
pub mod spinner;

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::{RunPolicy, RunnerConfig};
use crate::errors::{TestError, TestOutcome, panic_message};

pub use action::{SyncAction, TestAction};
pub use context::{DEFAULT_ASSERT_MESSAGE, TestContext};
pub use reporter::{ConsoleReporter, JsonReporter, Reporter};
use spinner::Spinner;

/// Display name used when none is given
pub const DEFAULT_SUITE_NAME: &str = "Test Suite";

// ============================================================================
// Data model
// ============================================================================

/// A registered test: a name and the action to run
pub struct TestCase {
    name: Arc<str>,
    action: Box<dyn TestAction>,
}

impl TestCase {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestCase").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Pass/fail status of an executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Pass,
    Fail,
}

impl TestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TestStatus::Pass => "PASS",
            TestStatus::Fail => "FAIL",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recorded outcome of one executed test
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResult {
    pub name: String,
    pub status: TestStatus,
    /// Failure message; `None` for passing tests
    pub error: Option<String>,
    /// Wall time spent in the action
    pub duration: Duration,
}

impl TestResult {
    pub fn pass(name: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Pass,
            error: None,
            duration,
        }
    }

    pub fn fail(name: impl Into<String>, message: impl Into<String>, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status: TestStatus::Fail,
            error: Some(message.into()),
            duration,
        }
    }

    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }
}

/// Aggregate counts over a sequence of results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl Summary {
    /// Fold any slice of results, e.g. the concatenated results of several runners.
    pub fn from_results(results: &[TestResult]) -> Self {
        results.iter().fold(Summary::default(), |mut acc, r| {
            acc.total += 1;
            match r.status {
                TestStatus::Pass => acc.passed += 1,
                TestStatus::Fail => acc.failed += 1,
            }
            acc.duration += r.duration;
            acc
        })
    }

    /// `passed / total * 100` with one decimal place; `"0.0"` when nothing ran.
    ///
    /// Exact ties round up (1 of 16 is `"6.3"`), computed in integer tenths.
    pub fn success_rate(&self) -> String {
        if self.total == 0 {
            return "0.0".to_string();
        }
        let tenths = (self.passed * 1000 + self.total / 2) / self.total;
        format!("{}.{}", tenths / 10, tenths % 10)
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Ordered collection of tests plus the results of running them
pub struct TestRunner {
    name: Arc<str>,
    config: RunnerConfig,
    reporter: Box<dyn Reporter>,
    tests: Vec<TestCase>,
    results: Vec<TestResult>,
}

impl Default for TestRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SUITE_NAME)
    }
}

impl fmt::Debug for TestRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRunner")
            .field("name", &self.name)
            .field("config", &self.config)
            .field("tests", &self.tests)
            .field("results", &self.results)
            .finish_non_exhaustive()
    }
}

impl TestRunner {
    /// Create an empty runner with default configuration.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self::with_config(name, RunnerConfig::default())
    }

    /// Create an empty runner reporting to the console format implied by `config`.
    pub fn with_config(name: impl AsRef<str>, config: RunnerConfig) -> Self {
        let reporter = ConsoleReporter::new(config.color, config.verbose);
        Self {
            name: Arc::from(name.as_ref()),
            config,
            reporter: Box::new(reporter),
            tests: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Replace the output format.
    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Registered tests, in registration order.
    pub fn tests(&self) -> &[TestCase] {
        &self.tests
    }

    /// Every result recorded so far, in execution order.
    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.is_pass()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.is_pass()).count()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_results(&self.results)
    }

    /// Forget recorded results; registered tests stay.
    pub fn reset(&mut self) {
        self.results.clear();
    }

    /// Register an async test.
    ///
    /// ```no_run
    /// # use testcode::TestRunner;
    /// let mut runner = TestRunner::new("Math");
    /// runner.register("adds", |ctx| async move { ctx.assert_equal(1 + 1, 2) });
    /// ```
    pub fn register<F, Fut>(&mut self, name: impl AsRef<str>, action: F)
    where
        F: Fn(TestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TestOutcome> + Send + 'static,
    {
        self.register_action(name, action);
    }

    /// Register a synchronous test.
    pub fn register_sync<F>(&mut self, name: impl AsRef<str>, action: F)
    where
        F: Fn(&TestContext) -> TestOutcome + Send + Sync + 'static,
    {
        self.register_action(name, SyncAction(action));
    }

    /// Register any [`TestAction`] implementation.
    pub fn register_action(&mut self, name: impl AsRef<str>, action: impl TestAction + 'static) {
        self.tests.push(TestCase {
            name: Arc::from(name.as_ref()),
            action: Box::new(action),
        });
    }

    /// Run every registered test in order, writing the report through `emit`.
    ///
    /// Never fails: assertion failures, action errors and panics all become `FAIL` results.
    /// Returns all results recorded so far (see [`RunPolicy`]).
    #[tracing::instrument(skip_all, fields(suite = %self.name, tests = self.tests.len()))]
    pub async fn run<E>(&mut self, mut emit: E) -> &[TestResult]
    where
        E: FnMut(&str),
    {
        if self.config.run_policy == RunPolicy::Reset {
            self.results.clear();
        }

        emit(&self.reporter.header(&self.name));

        let animate = self.config.progress && self.reporter.shows_progress();
        let reporter = &self.reporter;

        for case in &self.tests {
            debug!(test = %case.name, "running test");
            let ctx = TestContext::new(self.name.clone(), case.name.clone());
            let start = Instant::now();

            let mut spinner = Spinner::start(self.config.spinner_interval, animate);
            let outcome = spinner
                .drive(guarded(case.action.invoke(ctx)), |frame| {
                    emit(&reporter.progress(&case.name, frame))
                })
                .await;
            if spinner.stop() {
                emit(&reporter.clear_progress());
            }

            let elapsed = start.elapsed();
            let result = match outcome {
                Ok(()) => TestResult::pass(&*case.name, elapsed),
                Err(err) => TestResult::fail(&*case.name, err.message(), elapsed),
            };
            debug!(test = %case.name, status = %result.status, elapsed_ms = elapsed.as_millis() as u64, "test finished");

            emit(&reporter.test_complete(&result));
            self.results.push(result);
        }

        let summary = Summary::from_results(&self.results);
        emit(&self.reporter.summary(&self.name, &summary));

        &self.results
    }
}

/// Await an action, turning a panic into a [`TestError::Panic`].
async fn guarded<F>(action: F) -> TestOutcome
where
    F: Future<Output = TestOutcome>,
{
    match AssertUnwindSafe(action).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(%message, "test action panicked");
            Err(TestError::Panic(message))
        }
    }
}
