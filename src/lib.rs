#![forbid(unsafe_code)]
//! testcode: a small asynchronous test runner
//!
//! Register named test actions on a [`TestRunner`], then [`run`](TestRunner::run) them with an
//! emit sink. Tests execute one at a time in registration order; each gets a transient spinner
//! while it is in flight, a pass/fail line when it settles, and the run ends with a summary
//! block. Everything is written through the sink, and the ordered results are returned.
//!
//! ```no_run
//! use testcode::TestRunner;
//!
//! # async fn demo() {
//! let mut runner = TestRunner::new("Math");
//! runner.register_sync("adds", |ctx| ctx.assert_equal(1 + 1, 2));
//! runner.register("waits", |ctx| async move {
//!     tokio::time::sleep(std::time::Duration::from_millis(10)).await;
//!     ctx.assert(true)
//! });
//!
//! let results = runner.run(|text| print!("{text}")).await;
//! assert_eq!(results.len(), 2);
//! # }
//! ```
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module
//!   enforces `#![deny(clippy::unwrap_used)]`.
//! - **Test actions**: a panic inside an action is caught and recorded as a failed test; it never
//!   aborts the run.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod config;
pub mod errors;
pub mod runner;
pub mod suites;

pub use config::{RunPolicy, RunnerConfig};
pub use errors::{TestError, TestOutcome};
pub use runner::{
    ConsoleReporter, JsonReporter, Reporter, Summary, TestAction, TestCase, TestContext, TestResult, TestRunner,
    TestStatus,
};
