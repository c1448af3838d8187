//! Progress reporting for long runs.
//!
//! At every output step the loop builds a [`Progress`] with an estimate
//! of the remaining wall-clock time and hands it to a
//! [`ProgressReporter`]. [`LogProgress`] writes it through the `log`
//! facade; `()` discards it.

use std::fmt;
use std::time::Duration;

/// Log target used by [`LogProgress`].
pub const PROGRESS_TARGET: &str = "grayscott::progress";

/// Position of a run at an output step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    /// Timestep just completed.
    pub timestep: u64,
    /// The configured `timesteps` bound.
    pub timesteps: u64,
    /// Wall-clock time since the loop started.
    pub elapsed: Duration,
    /// Estimated time to finish: `(timesteps - t) * elapsed / t`.
    pub remaining: Duration,
}

impl Progress {
    /// Build a progress record, extrapolating linearly from `elapsed`.
    pub fn estimate(timestep: u64, timesteps: u64, elapsed: Duration) -> Self {
        let remaining = if timestep == 0 {
            Duration::ZERO
        } else {
            let left = timesteps.saturating_sub(timestep) as f64;
            Duration::try_from_secs_f64(left * elapsed.as_secs_f64() / timestep as f64)
                .unwrap_or(Duration::MAX)
        };
        Self {
            timestep,
            timesteps,
            elapsed,
            remaining,
        }
    }

    /// Fraction of the loop completed, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.timesteps == 0 {
            return 1.0;
        }
        (self.timestep as f64 / self.timesteps as f64).min(1.0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.remaining.as_secs();
        write!(
            f,
            "Timestep {} of {} is done, {:02}:{:02}:{:02} remaining",
            self.timestep,
            self.timesteps,
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}

/// Receives a [`Progress`] at every output step.
pub trait ProgressReporter {
    /// Called after the step's snapshots were delivered.
    fn report(&mut self, progress: &Progress);
}

impl ProgressReporter for () {
    fn report(&mut self, _progress: &Progress) {}
}

impl<R: ProgressReporter + ?Sized> ProgressReporter for &mut R {
    fn report(&mut self, progress: &Progress) {
        (**self).report(progress)
    }
}

/// Writes each [`Progress`] at `info` level to [`PROGRESS_TARGET`].
#[derive(Clone, Copy, Debug, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&mut self, progress: &Progress) {
        log::info!(target: PROGRESS_TARGET, "{progress}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eta_extrapolates_linearly() {
        let p = Progress::estimate(100, 1000, Duration::from_secs(10));
        assert_eq!(p.remaining, Duration::from_secs(90));
        assert!((p.fraction() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn display_formats_hms() {
        let p = Progress {
            timestep: 200,
            timesteps: 50_000,
            elapsed: Duration::from_secs(1),
            remaining: Duration::from_secs(3 * 3600 + 7 * 60 + 5),
        };
        assert_eq!(
            p.to_string(),
            "Timestep 200 of 50000 is done, 03:07:05 remaining"
        );
    }

    #[test]
    fn zero_timestep_has_no_eta() {
        let p = Progress::estimate(0, 10, Duration::from_secs(3));
        assert_eq!(p.remaining, Duration::ZERO);
    }

    #[test]
    fn unit_reporter_is_silent() {
        ProgressReporter::report(&mut (), &Progress::estimate(1, 2, Duration::ZERO));
    }
}
