//! Benchmark profiles for the Gray-Scott simulator.
//!
//! - [`reference_profile`]: 256x256 grid with the default physics
//! - [`stress_profile`]: 1024x1024 grid (~1M cells)
//! - [`ramp_profile`]: feed/kill ramp scanning the pattern-forming region
//! - [`textured_field`]: deterministic non-constant input for kernel benches

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use grayscott_core::{Field, StateError};
use grayscott_engine::{DivergencePolicy, SimulationConfig};

/// 256x256 grid, classic defaults, `timesteps` steps and no output.
///
/// `dt * du / h² = 0.1`, inside the 5-point limit of 0.25.
pub fn reference_profile(seed: u64, timesteps: u64) -> SimulationConfig {
    SimulationConfig {
        grid: 256,
        timesteps,
        out_freq: timesteps.max(1),
        seed,
        divergence: DivergencePolicy::Ignore,
        ..SimulationConfig::new(0.035, 0.065)
    }
}

/// Same physics as [`reference_profile`] on a 1024x1024 grid.
pub fn stress_profile(seed: u64, timesteps: u64) -> SimulationConfig {
    SimulationConfig {
        grid: 1024,
        perturb_count: 8,
        ..reference_profile(seed, timesteps)
    }
}

/// Feed ramped 0.086 → `feed` down the rows, kill `kill` → 0.073
/// across the columns, several large patches.
pub fn ramp_profile(grid: usize, feed: f64, kill: f64) -> SimulationConfig {
    SimulationConfig {
        grid,
        feedmax: 0.086,
        killmax: 0.073,
        perturb_count: 4,
        perturb_mag: 0.2,
        ..SimulationConfig::new(feed, kill)
    }
}

/// A smooth non-constant field in `[0, 1]`.
pub fn textured_field(n: usize) -> Result<Field, StateError> {
    let k = std::f64::consts::TAU / n.max(1) as f64;
    Field::from_fn(n, |row, col| {
        0.5 + 0.5 * (row as f64 * k).sin() * (col as f64 * 2.0 * k).cos()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile(1, 10).validate().is_ok());
        assert!(stress_profile(1, 10).validate().is_ok());
        assert!(ramp_profile(64, 0.002, 0.031).validate().is_ok());
        assert!(!reference_profile(1, 10).is_likely_unstable());
    }

    #[test]
    fn textured_field_in_unit_range() {
        let f = textured_field(32).unwrap();
        assert!(f.as_slice().iter().all(|x| (0.0..=1.0).contains(x)));
        assert!(f.first_non_finite().is_none());
    }
}
