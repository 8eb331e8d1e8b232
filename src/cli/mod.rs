//! CLI module for the testcode runner
//!
//! ## Commands
//!
//! - `run` (default) - Run built-in suites and print the report
//! - `list` - List the built-in suite names
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::io::{self, Write};
use std::process;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::RunnerConfig;
use crate::runner::{JsonReporter, Summary, TestResult};
use crate::suites::{SUITE_NAMES, build_suite};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Run test suites with live progress and a color-coded report
#[derive(Parser, Debug)]
#[command(name = "testcode")]
#[command(version = VERSION)]
#[command(about = "Run test suites with live progress and a color-coded report", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run built-in suites (default)
    Run(RunArgs),

    /// List built-in suites
    List,
}

/// Report format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Framed, color-coded terminal output
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Suite(s) to run; all built-in suites when omitted
    #[arg(short, long = "suite", value_name = "NAME")]
    pub suites: Vec<String>,
    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Console)]
    pub format: Format,
    /// Disable ANSI colors (also honored via NO_COLOR)
    #[arg(long)]
    pub no_color: bool,
    /// Disable the transient progress line
    #[arg(long)]
    pub no_progress: bool,
    /// Milliseconds between progress frames
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,
    /// Show per-test durations
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunArgs {
    fn config(&self) -> RunnerConfig {
        let mut config = RunnerConfig::from_env().with_verbose(self.verbose);
        if self.no_color {
            config = config.with_color(false);
        }
        if self.no_progress {
            config = config.with_progress(false);
        }
        if let Some(ms) = self.interval_ms {
            config = config.with_spinner_interval(Duration::from_millis(ms));
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Some(Command::Run(args)) => run_suites(&args),
        Some(Command::List) => {
            for name in SUITE_NAMES {
                println!("{}", name);
            }
            Ok(ExitCode::SUCCESS)
        }
        None => run_suites(&RunArgs::default()),
    }
}

/// Resolve requested suite names, keeping the caller's order.
fn selected_suites(requested: &[String]) -> CliResult<Vec<&str>> {
    if requested.is_empty() {
        return Ok(SUITE_NAMES.to_vec());
    }
    requested
        .iter()
        .map(|name| {
            SUITE_NAMES.iter().copied().find(|known| *known == name.as_str()).ok_or_else(|| {
                CliError::failure(format!(
                    "Unknown suite '{}'\nAvailable suites: {}",
                    name,
                    SUITE_NAMES.join(", ")
                ))
            })
        })
        .collect()
}

/// Run the selected suites back to back on a single-threaded runtime.
fn run_suites(args: &RunArgs) -> CliResult<ExitCode> {
    let names = selected_suites(&args.suites)?;
    let config = args.config();
    let console = args.format == Format::Console;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::failure(format!("Failed to start async runtime: {}", e)))?;

    let mut emit = stdout_sink();
    if console {
        emit(&banner("🚀 TestCode Runner", config.color));
        emit(&banner("Starting test execution...", config.color));
    }

    let mut all_results: Vec<TestResult> = Vec::new();
    for name in names {
        let Some(mut runner) = build_suite(name, config.clone()) else {
            continue;
        };
        if !console {
            runner = runner.with_reporter(JsonReporter);
        }
        let results = runtime.block_on(runner.run(&mut emit));
        all_results.extend_from_slice(results);
    }

    let overall = Summary::from_results(&all_results);
    tracing::info!(
        total = overall.total,
        passed = overall.passed,
        failed = overall.failed,
        "all suites finished"
    );
    if console {
        emit(&banner(
            &format!(
                "Tests completed! {} passed, {} failed ({}%)",
                overall.passed,
                overall.failed,
                overall.success_rate()
            ),
            config.color,
        ));
    }

    if overall.all_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        // Report already printed
        Err(CliError::new("", ExitCode::FAILURE))
    }
}

/// Emit sink writing straight to stdout; the progress line needs an immediate flush.
fn stdout_sink() -> impl FnMut(&str) {
    |text: &str| {
        let mut out = io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

fn banner(text: &str, color: bool) -> String {
    if color {
        format!("\x1b[36m\x1b[1m{}\x1b[0m\n", text)
    } else {
        format!("{}\n", text)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_default() {
        let cli = Cli::try_parse_from(["testcode"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::try_parse_from([
            "testcode", "run", "-s", "sanity", "--suite", "self", "--no-color", "--interval-ms", "20", "-v",
        ])
        .unwrap();
        if let Some(Command::Run(args)) = cli.command {
            assert_eq!(args.suites, vec!["sanity", "self"]);
            assert!(args.no_color);
            assert!(args.verbose);
            assert_eq!(args.interval_ms, Some(20));
            assert_eq!(args.format, Format::Console);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_json_format() {
        let cli = Cli::try_parse_from(["testcode", "run", "--format", "json"]).unwrap();
        if let Some(Command::Run(args)) = cli.command {
            assert_eq!(args.format, Format::Json);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::try_parse_from(["testcode", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Command::List)));
    }

    #[test]
    fn test_run_args_config() {
        let args = RunArgs {
            no_color: true,
            no_progress: true,
            interval_ms: Some(25),
            verbose: true,
            ..RunArgs::default()
        };
        let config = args.config();
        assert!(!config.color);
        assert!(!config.progress);
        assert!(config.verbose);
        assert_eq!(config.spinner_interval, Duration::from_millis(25));
    }

    #[test]
    fn test_selected_suites() {
        assert_eq!(selected_suites(&[]).unwrap(), SUITE_NAMES.to_vec());
        assert_eq!(
            selected_suites(&["self".to_string(), "sanity".to_string()]).unwrap(),
            vec!["self", "sanity"]
        );
        let err = selected_suites(&["missing".to_string()]).unwrap_err();
        assert!(err.message.contains("Unknown suite 'missing'"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_banner_plain() {
        assert_eq!(banner("hi", false), "hi\n");
        assert_eq!(banner("hi", true), "\x1b[36m\x1b[1mhi\x1b[0m\n");
    }
}
