//! Transient progress indicator
//!
//! A [`Spinner`] lives for exactly one test. It polls the test's future and a tick interval on
//! the same task, so the instant the action settles no further frame can be drawn; the caller
//! then clears the line before anything else is written.

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Braille animation frames
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame glyph for the given tick count.
pub fn frame_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Progress indicator scoped to a single test.
pub(crate) struct Spinner {
    interval: Option<Interval>,
    frames: usize,
}

impl Spinner {
    /// Start a spinner whose first frame appears one `period` after start.
    ///
    /// A disabled spinner never draws and just awaits the action.
    pub(crate) fn start(period: Duration, enabled: bool) -> Self {
        let interval = enabled.then(|| {
            let period = period.max(Duration::from_millis(1));
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        Self { interval, frames: 0 }
    }

    /// Await `action`, calling `draw(frame)` on every tick that happens before it settles.
    pub(crate) async fn drive<F>(&mut self, action: F, mut draw: impl FnMut(usize)) -> F::Output
    where
        F: Future,
    {
        tokio::pin!(action);
        let Some(interval) = self.interval.as_mut() else {
            return action.await;
        };

        loop {
            tokio::select! {
                biased;
                out = &mut action => return out,
                _ = interval.tick() => {
                    draw(self.frames);
                    self.frames += 1;
                }
            }
        }
    }

    /// Stop ticking. Returns `true` when at least one frame was drawn and the line needs clearing.
    pub(crate) fn stop(self) -> bool {
        self.frames > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_glyph_wraps() {
        assert_eq!(frame_glyph(0), "⠋");
        assert_eq!(frame_glyph(9), "⠏");
        assert_eq!(frame_glyph(10), "⠋");
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_action_draws_frames() {
        let mut spinner = Spinner::start(Duration::from_millis(80), true);
        let mut drawn = Vec::new();
        let out = spinner
            .drive(
                async {
                    time::sleep(Duration::from_millis(300)).await;
                    7
                },
                |frame| drawn.push(frame),
            )
            .await;

        assert_eq!(out, 7);
        assert_eq!(drawn, vec![0, 1, 2]);
        assert!(spinner.stop());
    }

    #[tokio::test(start_paused = true)]
    async fn test_instant_action_draws_nothing() {
        let mut spinner = Spinner::start(Duration::from_millis(80), true);
        let mut drawn = 0;
        spinner.drive(async {}, |_| drawn += 1).await;

        assert_eq!(drawn, 0);
        assert!(!spinner.stop());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disabled_spinner_never_draws() {
        let mut spinner = Spinner::start(Duration::from_millis(10), false);
        let mut drawn = 0;
        spinner
            .drive(time::sleep(Duration::from_millis(100)), |_| drawn += 1)
            .await;

        assert_eq!(drawn, 0);
        assert!(!spinner.stop());
    }
}
