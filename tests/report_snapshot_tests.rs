//! Snapshot tests for the rendered console report
//!
//! Review changes: `cargo insta review`

use insta::assert_snapshot;
use testcode::{RunnerConfig, TestRunner};

async fn render(runner: &mut TestRunner) -> String {
    let mut output = String::new();
    runner.run(|text| output.push_str(text)).await;
    output
}

#[tokio::test]
async fn test_plain_report_snapshot() {
    let config = RunnerConfig::new().with_color(false).with_progress(false);
    let mut runner = TestRunner::with_config("Demo Suite", config);
    runner.register_sync("A", |_| Ok(()));
    runner.register_sync("B", |ctx| ctx.assert_msg(false, "boom"));
    runner.register_sync("C", |_| Ok(()));

    let output = render(&mut runner).await;

    assert_snapshot!(output.trim(), @r"
    ╔════════════════════════════════════════════╗
    ║                 Demo Suite                 ║
    ╚════════════════════════════════════════════╝

      ✓ A
      ✗ B
         └─ boom
      ✓ C

    ─────────────────────────────────────────────
      Tests: 3 | Passed: 2 | Failed: 1
      Success Rate: 66.7%
    ─────────────────────────────────────────────
    ");
}
