//! Run-level performance metrics.
//!
//! [`RunMetrics`] accumulates wall-clock time per loop phase over a whole
//! run. All durations are in microseconds.

use std::time::Duration;

/// Time spent in each phase of the simulation loop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Laplacian evaluation for both species.
    pub stencil_us: u64,
    /// `u v²`, rate evaluation and integration for both species.
    pub kinetics_us: u64,
    /// Snapshot copies, sink calls and divergence scans.
    pub output_us: u64,
    /// Timesteps whose stencil and kinetics phases both completed.
    pub steps: u64,
}

impl RunMetrics {
    /// Sum of all phase times.
    pub fn total_us(&self) -> u64 {
        self.stencil_us + self.kinetics_us + self.output_us
    }

    /// Mean compute time per completed timestep, excluding output.
    pub fn mean_step_us(&self) -> Option<f64> {
        if self.steps == 0 {
            return None;
        }
        Some((self.stencil_us + self.kinetics_us) as f64 / self.steps as f64)
    }

    pub(crate) fn add(slot: &mut u64, elapsed: Duration) {
        *slot = slot.saturating_add(elapsed.as_micros().min(u64::MAX as u128) as u64);
    }
}
