//! Report rendering
//!
//! ## Reporter Trait
//!
//! A [`Reporter`] turns runner events into text. It never writes anywhere itself: the runner
//! pushes every rendered fragment through the caller's emit sink, so the sink stays the only
//! output channel whichever format is chosen.
//!
//! Two formats ship with the crate:
//! - [`ConsoleReporter`] - framed, color-coded, human-readable output with a spinner
//! - [`JsonReporter`] - one JSON object per line, no progress frames

use serde_json::json;

use super::spinner::frame_glyph;
use super::{Summary, TestResult, TestStatus};

/// Formats runner events as text.
pub trait Reporter: Send + Sync {
    /// Block written once at the start of a run.
    fn header(&self, suite: &str) -> String;

    /// Whether this format draws a transient progress line.
    fn shows_progress(&self) -> bool {
        true
    }

    /// One progress frame for a test in flight. Must not end with a newline.
    fn progress(&self, test: &str, frame: usize) -> String;

    /// Erases the current progress line completely.
    fn clear_progress(&self) -> String {
        "\r\x1b[K".to_string()
    }

    /// Line(s) for a finished test.
    fn test_complete(&self, result: &TestResult) -> String;

    /// Block written once after every test ran.
    fn summary(&self, suite: &str, summary: &Summary) -> String;
}

// ============================================================================
// Console reporter
// ============================================================================

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BRIGHT: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

const BANNER_WIDTH: usize = 44;
const RULE_WIDTH: usize = 45;

/// Framed terminal output
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    pub color: bool,
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(color: bool, verbose: bool) -> Self {
        Self { color, verbose }
    }

    /// Wrap `text` in the given styles, or return it untouched when color is off.
    fn paint(&self, styles: &[&str], text: &str) -> String {
        if self.color {
            format!("{}{}{}", styles.concat(), text, ansi::RESET)
        } else {
            text.to_string()
        }
    }
}

impl Reporter for ConsoleReporter {
    fn header(&self, suite: &str) -> String {
        let bar = "═".repeat(BANNER_WIDTH);
        let title = format!("║{}║", center(suite, BANNER_WIDTH));
        let style = [ansi::CYAN, ansi::BRIGHT];

        let mut out = String::from("\n");
        for line in [format!("╔{bar}╗"), title, format!("╚{bar}╝")] {
            out.push_str(&self.paint(&style, &line));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn progress(&self, test: &str, frame: usize) -> String {
        format!("\r  {} Running {}...", self.paint(&[ansi::CYAN], frame_glyph(frame)), test)
    }

    fn test_complete(&self, result: &TestResult) -> String {
        let timing = if self.verbose {
            format!(" ({}ms)", result.duration.as_millis())
        } else {
            String::new()
        };

        match result.status {
            TestStatus::Pass => {
                let line = format!("  ✓ {}{}", result.name, timing);
                format!("{}\n", self.paint(&[ansi::GREEN], &line))
            }
            TestStatus::Fail => {
                let line = format!("  ✗ {}{}", result.name, timing);
                let message = result.error.as_deref().unwrap_or_default().replace('\n', "\n        ");
                let cause = format!("     └─ {}", message);
                format!(
                    "{}\n{}\n",
                    self.paint(&[ansi::RED, ansi::BRIGHT], &line),
                    self.paint(&[ansi::RED, ansi::DIM], &cause)
                )
            }
        }
    }

    fn summary(&self, _suite: &str, summary: &Summary) -> String {
        let rule = self.paint(&[ansi::GRAY], &"─".repeat(RULE_WIDTH));
        let status = if summary.failed == 0 { ansi::GREEN } else { ansi::YELLOW };

        let mut counts = format!(
            "  Tests: {} | Passed: {} | Failed: {}",
            summary.total, summary.passed, summary.failed
        );
        if self.verbose {
            counts.push_str(&format!(" | {:.2}s", summary.duration.as_secs_f64()));
        }
        let rate = format!("  Success Rate: {}%", summary.success_rate());

        format!(
            "\n{rule}\n{}\n{}\n{rule}\n\n",
            self.paint(&[status], &counts),
            self.paint(&[status], &rate)
        )
    }
}

/// Center `text` in `width` columns, putting the odd space on the right.
fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
}

// ============================================================================
// JSON-lines reporter
// ============================================================================

/// Machine-readable output: one JSON object per line
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn header(&self, suite: &str) -> String {
        format!("{}\n", json!({ "event": "suite_started", "suite": suite }))
    }

    fn shows_progress(&self) -> bool {
        false
    }

    fn progress(&self, _test: &str, _frame: usize) -> String {
        String::new()
    }

    fn clear_progress(&self) -> String {
        String::new()
    }

    fn test_complete(&self, result: &TestResult) -> String {
        let event = json!({
            "event": "test",
            "name": result.name,
            "status": result.status.as_str(),
            "error": result.error,
            "duration_ms": result.duration.as_millis() as u64,
        });
        format!("{}\n", event)
    }

    fn summary(&self, suite: &str, summary: &Summary) -> String {
        let event = json!({
            "event": "summary",
            "suite": suite,
            "total": summary.total,
            "passed": summary.passed,
            "failed": summary.failed,
            "success_rate": summary.success_rate(),
        });
        format!("{}\n", event)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn pass(name: &str) -> TestResult {
        TestResult::pass(name, Duration::from_millis(3))
    }

    fn fail(name: &str, msg: &str) -> TestResult {
        TestResult::fail(name, msg, Duration::from_millis(4))
    }

    #[test]
    fn test_center_pads_odd_space_right() {
        assert_eq!(center("ab", 5), " ab  ");
        assert_eq!(center("toolong", 3), "toolong");
    }

    #[test]
    fn test_plain_pass_line() {
        let reporter = ConsoleReporter::new(false, false);
        assert_eq!(reporter.test_complete(&pass("adds")), "  ✓ adds\n");
    }

    #[test]
    fn test_plain_fail_lines() {
        let reporter = ConsoleReporter::new(false, false);
        assert_eq!(
            reporter.test_complete(&fail("B", "boom")),
            "  ✗ B\n     └─ boom\n"
        );
    }

    #[test]
    fn test_verbose_shows_duration() {
        let reporter = ConsoleReporter::new(false, true);
        assert_eq!(reporter.test_complete(&pass("adds")), "  ✓ adds (3ms)\n");
    }

    #[test]
    fn test_colored_pass_line_is_wrapped() {
        let reporter = ConsoleReporter::new(true, false);
        let line = reporter.test_complete(&pass("adds"));
        assert!(line.starts_with("\x1b[32m"));
        assert!(line.ends_with("\x1b[0m\n"));
    }

    #[test]
    fn test_progress_overwrites_line() {
        let reporter = ConsoleReporter::new(false, false);
        let frame = reporter.progress("slow", 1);
        assert_eq!(frame, "\r  ⠙ Running slow...");
        assert!(!frame.ends_with('\n'));
        assert_eq!(reporter.clear_progress(), "\r\x1b[K");
    }

    #[test]
    fn test_summary_uses_yellow_when_failures() {
        let reporter = ConsoleReporter::new(true, false);
        let summary = Summary::from_results(&[pass("a"), fail("b", "x")]);
        let text = reporter.summary("S", &summary);
        assert!(text.contains("\x1b[33m  Tests: 2 | Passed: 1 | Failed: 1\x1b[0m"));
        assert!(text.contains("Success Rate: 50.0%"));
    }

    #[test]
    fn test_json_reporter_lines() {
        let reporter = JsonReporter;
        assert!(!reporter.shows_progress());

        let line = reporter.test_complete(&fail("b", "boom"));
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["event"], "test");
        assert_eq!(value["status"], "FAIL");
        assert_eq!(value["error"], "boom");
        assert_eq!(value["duration_ms"], 4);

        let summary = Summary::from_results(&[pass("a"), fail("b", "boom"), pass("c")]);
        let line = reporter.summary("Suite", &summary);
        let value: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["success_rate"], "66.7");
        assert_eq!(value["total"], 3);
    }
}
