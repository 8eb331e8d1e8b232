//! Runner configuration

use std::env;
use std::time::Duration;

/// Default delay between two spinner frames
pub const DEFAULT_SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// What a repeated `run` does with the results of earlier runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPolicy {
    /// Append to earlier results; the summary covers everything recorded so far.
    #[default]
    Accumulate,
    /// Start every run from an empty result sequence.
    Reset,
}

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Delay between two progress frames while a test is in flight
    pub spinner_interval: Duration,
    /// Whether to draw the transient progress line at all
    pub progress: bool,
    /// Whether reporters may embed ANSI color sequences
    pub color: bool,
    /// Append per-test durations to result lines
    pub verbose: bool,
    /// Reset or accumulate results across runs
    pub run_policy: RunPolicy,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            spinner_interval: DEFAULT_SPINNER_INTERVAL,
            progress: true,
            color: true,
            verbose: false,
            run_policy: RunPolicy::Accumulate,
        }
    }
}

impl RunnerConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings adjusted by the environment.
    ///
    /// Honors `NO_COLOR` (any non-empty value disables color).
    pub fn from_env() -> Self {
        let no_color = env::var("NO_COLOR").map(|v| !v.is_empty()).unwrap_or(false);
        Self::default().with_color(!no_color)
    }

    /// Set the delay between spinner frames
    pub fn with_spinner_interval(mut self, interval: Duration) -> Self {
        self.spinner_interval = interval;
        self
    }

    /// Enable or disable the progress line
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Enable or disable per-test durations
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the multi-run policy
    pub fn with_run_policy(mut self, policy: RunPolicy) -> Self {
        self.run_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.spinner_interval, Duration::from_millis(80));
        assert!(config.progress);
        assert!(config.color);
        assert!(!config.verbose);
        assert_eq!(config.run_policy, RunPolicy::Accumulate);
    }

    #[test]
    fn test_builder_chain() {
        let config = RunnerConfig::new()
            .with_spinner_interval(Duration::from_millis(10))
            .with_progress(false)
            .with_color(false)
            .with_verbose(true)
            .with_run_policy(RunPolicy::Reset);

        assert_eq!(config.spinner_interval, Duration::from_millis(10));
        assert!(!config.progress);
        assert!(!config.color);
        assert!(config.verbose);
        assert_eq!(config.run_policy, RunPolicy::Reset);
    }
}
