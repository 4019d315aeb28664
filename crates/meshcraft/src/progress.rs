//! Progress reporting through `tracing`.

use std::time::{Duration, Instant};

use meshcraft_core::{ProgressObserver, Stage};
use tracing::info;

/// Logs each stage at coarse percentage steps with an estimate of the time
/// left. The clock restarts whenever the stage changes.
#[derive(Debug)]
pub struct LogProgress {
    step: u32,
    stage: Option<Stage>,
    started: Instant,
    next_percent: u32,
}

impl LogProgress {
    /// Logs every `step` percent (clamped to `1..=100`).
    #[must_use]
    pub fn new(step: u32) -> Self {
        Self {
            step: step.clamp(1, 100),
            stage: None,
            started: Instant::now(),
            next_percent: step.clamp(1, 100),
        }
    }

    /// Returns the percentage to log for this update, if any.
    fn advance(&mut self, stage: Stage, done: usize, total: usize) -> Option<u32> {
        if self.stage != Some(stage) {
            self.stage = Some(stage);
            self.started = Instant::now();
            self.next_percent = self.step;
        }
        if total == 0 {
            return None;
        }

        let percent = (done.min(total) as f64 / total as f64 * 100.0) as u32;
        if percent < self.next_percent {
            return None;
        }
        self.next_percent = (percent / self.step + 1) * self.step;
        Some(percent)
    }
}

impl Default for LogProgress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressObserver for LogProgress {
    fn on_progress(&mut self, stage: Stage, done: usize, total: usize) {
        let Some(percent) = self.advance(stage, done, total) else {
            return;
        };

        let elapsed = self.started.elapsed();
        let fraction = done as f64 / total as f64;
        let remaining = elapsed.as_secs_f64() * (1.0 - fraction) / fraction;
        info!(
            stage = stage.label(),
            done,
            total,
            "{}: {percent}% ({} remain)",
            stage.label(),
            format_remaining(Duration::from_secs_f64(remaining.max(0.0)))
        );
    }
}

/// Formats a duration in the largest unit that keeps it at least one:
/// milliseconds, seconds, minutes, hours or days.
#[must_use]
pub fn format_remaining(d: Duration) -> String {
    const SECOND: f64 = 1000.0;
    const MINUTE: f64 = SECOND * 60.0;
    const HOUR: f64 = MINUTE * 60.0;
    const DAY: f64 = HOUR * 24.0;

    let ms = d.as_secs_f64() * 1000.0;
    if ms < SECOND {
        format!("{ms:.0}ms")
    } else if ms < MINUTE {
        format!("{:.1}s", ms / SECOND)
    } else if ms < HOUR {
        format!("{:.1}m", ms / MINUTE)
    } else if ms < DAY {
        format!("{:.1}h", ms / HOUR)
    } else {
        format!("{:.1}d", ms / DAY)
    }
}
