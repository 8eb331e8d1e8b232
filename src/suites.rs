//! Built-in self-check suites
//!
//! These exercise the runner end to end from the CLI: plain synchronous checks, actions that
//! suspend before asserting, and a suite that runs nested runners to verify the engine's own
//! contracts (failure containment, ordering, summary math).

use std::time::Duration;

use tokio::sync::oneshot;

use crate::config::RunnerConfig;
use crate::errors::TestError;
use crate::runner::{TestRunner, TestStatus};

/// Names accepted by [`build_suite`], in default execution order.
pub const SUITE_NAMES: [&str; 3] = ["sanity", "async", "self"];

/// Build a built-in suite by name.
pub fn build_suite(name: &str, config: RunnerConfig) -> Option<TestRunner> {
    match name {
        "sanity" => Some(sanity_suite(config)),
        "async" => Some(async_suite(config)),
        "self" => Some(self_suite(config)),
        _ => None,
    }
}

/// Synchronous checks on plain values.
pub fn sanity_suite(config: RunnerConfig) -> TestRunner {
    let mut runner = TestRunner::with_config("Sanity Tests", config);

    runner.register_sync("Arithmetic works", |ctx| {
        ctx.assert_equal(2 + 2, 4)?;
        ctx.assert_equal(10 / 3, 3)
    });

    runner.register_sync("Strings compare by value", |ctx| {
        let greeting = format!("Hello, {}!", "world");
        ctx.assert_equal(greeting.as_str(), "Hello, world!")?;
        ctx.assert_msg(greeting.starts_with("Hello"), "greeting should start with Hello")
    });

    runner.register_sync("Collections keep insertion order", |ctx| {
        let items: Vec<i32> = (1..=3).collect();
        ctx.assert_equal(items.len(), 3)?;
        ctx.assert_equal(items, vec![1, 2, 3])
    });

    runner.register_sync("Default assertion message", |ctx| {
        let err = ctx.assert(false).err();
        ctx.assert_equal(err.as_ref().map(TestError::message), Some("Assertion failed"))
    });

    runner
}

/// Actions that suspend before reaching their assertions.
pub fn async_suite(config: RunnerConfig) -> TestRunner {
    let mut runner = TestRunner::with_config("Async Tests", config);

    runner.register("Sleep then assert", |ctx| async move {
        tokio::time::sleep(Duration::from_millis(150)).await;
        ctx.assert(true)
    });

    runner.register("Deferred value resolves", |ctx| async move {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let _ = tx.send(42);
        });
        let value = rx.await.map_err(TestError::action)?;
        ctx.assert_equal(value, 42)
    });

    runner.register("Spawned task result", |ctx| async move {
        let handle = tokio::spawn(async { (1..=10).sum::<i32>() });
        let sum = handle.await.map_err(TestError::action)?;
        ctx.assert_equal_msg(sum, 55, "sum of 1..=10 should be 55")
    });

    runner
}

/// The runner checking its own contracts through nested runs.
pub fn self_suite(config: RunnerConfig) -> TestRunner {
    let mut runner = TestRunner::with_config("Self Tests", config);

    runner.register("Failures do not abort the run", |ctx| async move {
        let mut inner = quiet_runner("inner");
        inner.register_sync("A", |_| Ok(()));
        inner.register_sync("B", |ctx| ctx.assert_msg(false, "boom"));
        inner.register_sync("C", |_| Ok(()));

        let statuses: Vec<TestStatus> = inner.run(|_| {}).await.iter().map(|r| r.status).collect();
        ctx.assert_equal(statuses, vec![TestStatus::Pass, TestStatus::Fail, TestStatus::Pass])?;
        ctx.assert_equal(inner.summary().success_rate(), "66.7")
    });

    runner.register("Results follow registration order", |ctx| async move {
        let mut inner = quiet_runner("inner");
        for name in ["first", "second", "third"] {
            inner.register_sync(name, |_| Ok(()));
        }

        let names: Vec<String> = inner.run(|_| {}).await.iter().map(|r| r.name.clone()).collect();
        ctx.assert_equal(names, vec!["first", "second", "third"])
    });

    runner.register("Report goes through the sink", |ctx| async move {
        let mut inner = quiet_runner("Captured");
        inner.register_sync("only", |_| Ok(()));

        let mut captured = String::new();
        inner.run(|text| captured.push_str(text)).await;
        ctx.assert_msg(captured.contains("Captured"), "header should name the suite")?;
        ctx.assert_msg(captured.contains("✓ only"), "pass line should be emitted")?;
        ctx.assert_msg(captured.contains("Success Rate: 100.0%"), "summary should be emitted")
    });

    runner
}

fn quiet_runner(name: &str) -> TestRunner {
    TestRunner::with_config(name, RunnerConfig::new().with_color(false).with_progress(false))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> RunnerConfig {
        RunnerConfig::new().with_color(false).with_progress(false)
    }

    #[test]
    fn test_build_suite_by_name() {
        for name in SUITE_NAMES {
            assert!(build_suite(name, config()).is_some(), "missing suite {name}");
        }
        assert!(build_suite("nope", config()).is_none());
    }

    #[tokio::test]
    async fn test_builtin_suites_pass() {
        for name in SUITE_NAMES {
            let mut runner = build_suite(name, config()).unwrap();
            let results = runner.run(|_| {}).await;
            for result in results {
                assert!(result.is_pass(), "{name}: {} failed: {:?}", result.name, result.error);
            }
        }
    }
}
