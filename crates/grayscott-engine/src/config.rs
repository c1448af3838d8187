//! Run configuration, validation, and error types.
//!
//! [`SimulationConfig`] is the input to [`Simulation::new`](crate::Simulation::new).
//! [`validate()`](SimulationConfig::validate) checks every numeric
//! precondition before any field is allocated, so a bad configuration
//! fails fast instead of producing a grid full of NaN thousands of steps
//! later.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use grayscott_core::{Field, Species, StateError};
use grayscott_kernels::{Integrator, Stencil};

// ── OutputSpecies ─────────────────────────────────────────────────

/// Which species are copied to the sink at each output step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OutputSpecies {
    /// U only.
    #[default]
    U,
    /// V only.
    V,
    /// U, then V.
    Both,
}

impl OutputSpecies {
    /// Species to emit, in emission order.
    pub fn species(&self) -> &'static [Species] {
        match self {
            Self::U => &[Species::U],
            Self::V => &[Species::V],
            Self::Both => &[Species::U, Species::V],
        }
    }
}

// ── DivergencePolicy ──────────────────────────────────────────────

/// What the loop does when an output step finds a NaN or infinity.
///
/// Detection runs on output steps only, so it costs one scan per
/// species every `out_freq` timesteps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DivergencePolicy {
    /// Do not scan.
    Ignore,
    /// Log a warning the first time each species diverges, keep running.
    #[default]
    Warn,
    /// Stop with [`StepError::NumericDivergence`](grayscott_core::StepError::NumericDivergence).
    Abort,
}

// ── ConfigError ───────────────────────────────────────────────────

/// Errors detected by [`SimulationConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid side length is zero.
    EmptyGrid,
    /// Grid spacing `h` is zero, negative, or not finite.
    InvalidSpacing {
        /// The invalid value.
        value: f64,
    },
    /// Timestep `dt` is zero, negative, or not finite.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// `timesteps` is zero.
    NoTimesteps,
    /// `out_freq` is zero.
    InvalidOutputFrequency,
    /// A diffusion coefficient is negative or not finite.
    InvalidDiffusion {
        /// Species the coefficient belongs to.
        species: Species,
        /// The invalid value.
        value: f64,
    },
    /// A feed or kill rate (or ramp bound) is negative or not finite.
    InvalidRate {
        /// Which rate: `feed`, `kill`, `feedmax` or `killmax`.
        name: &'static str,
        /// The invalid value.
        value: f64,
    },
    /// Perturbation targets or magnitude are unusable.
    InvalidPerturbation {
        /// Description of the problem.
        reason: String,
    },
    /// `timeout` is `Some(Duration::ZERO)`.
    InvalidTimeout,
    /// A supplied initial state does not match `grid`.
    GridMismatch {
        /// The configured side length.
        configured: usize,
        /// Side length of the supplied state.
        actual: usize,
    },
    /// Grid construction failed.
    State(StateError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must be at least 1x1"),
            Self::InvalidSpacing { value } => {
                write!(f, "h must be finite and positive, got {value}")
            }
            Self::InvalidDt { value } => write!(f, "dt must be finite and positive, got {value}"),
            Self::NoTimesteps => write!(f, "timesteps must be at least 1"),
            Self::InvalidOutputFrequency => write!(f, "out_freq must be at least 1"),
            Self::InvalidDiffusion { species, value } => write!(
                f,
                "diffusion rate of {species} must be finite and non-negative, got {value}"
            ),
            Self::InvalidRate { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::InvalidPerturbation { reason } => write!(f, "invalid perturbation: {reason}"),
            Self::InvalidTimeout => write!(f, "timeout must be non-zero"),
            Self::GridMismatch { configured, actual } => write!(
                f,
                "initial state is {actual}x{actual}, configured grid is {configured}x{configured}"
            ),
            Self::State(e) => write!(f, "state: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::State(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StateError> for ConfigError {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

// ── SimulationConfig ──────────────────────────────────────────────

/// Everything needed to build and run one simulation.
///
/// Defaults reproduce the classic setup: a 256x256 grid with `h = 0.01`,
/// one patch at `U = 0.5, V = 0.25`, `dt = 0.5` for 50 000 steps with a
/// snapshot every 100, explicit Euler on the 5-point stencil.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Grid spacing.
    pub h: f64,
    /// Grid side length in cells.
    pub grid: usize,
    /// Number of randomized patches in the initial state.
    pub perturb_count: usize,
    /// U level inside patches.
    pub target_u: f64,
    /// V level inside patches.
    pub target_v: f64,
    /// Patch size relative to the grid.
    pub perturb_mag: f64,
    /// Timestep size.
    pub dt: f64,
    /// Loop bound: timesteps `1..timesteps` are computed.
    pub timesteps: u64,
    /// Emit a snapshot every `out_freq` timesteps.
    pub out_freq: u64,
    /// Diffusion rate of U.
    pub du: f64,
    /// Diffusion rate of V.
    pub dv: f64,
    /// Feed rate (bottom row of a ramp).
    pub feed: f64,
    /// Kill rate (left column of a ramp).
    pub kill: f64,
    /// Top-row feed rate of a ramp. `0` together with `killmax == 0`
    /// disables the ramp.
    pub feedmax: f64,
    /// Right-column kill rate of a ramp.
    pub killmax: f64,
    /// Laplacian stencil.
    pub stencil: Stencil,
    /// Time integration scheme.
    pub integrator: Integrator,
    /// Seed for the initial-condition random source.
    pub seed: u64,
    /// Species copied to the sink.
    pub output: OutputSpecies,
    /// NaN/infinity handling.
    pub divergence: DivergencePolicy,
    /// Wall-clock limit for [`run`](crate::Simulation::run).
    pub timeout: Option<Duration>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            h: 0.01,
            grid: 256,
            perturb_count: 1,
            target_u: 0.5,
            target_v: 0.25,
            perturb_mag: 0.05,
            dt: 0.5,
            timesteps: 50_000,
            out_freq: 100,
            du: 2e-5,
            dv: 1e-5,
            feed: 0.04,
            kill: 0.06075,
            feedmax: 0.0,
            killmax: 0.0,
            stencil: Stencil::FivePoint,
            integrator: Integrator::Euler,
            seed: 0,
            output: OutputSpecies::U,
            divergence: DivergencePolicy::Warn,
            timeout: None,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with the given feed and kill rates.
    pub fn new(feed: f64, kill: f64) -> Self {
        Self {
            feed,
            kill,
            ..Self::default()
        }
    }

    /// Check every numeric precondition.
    ///
    /// Returns the first violation found, in field order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        Field::cell_count(self.grid)?;
        if !(self.h.is_finite() && self.h > 0.0) {
            return Err(ConfigError::InvalidSpacing { value: self.h });
        }
        if !self.target_u.is_finite() || !self.target_v.is_finite() {
            return Err(ConfigError::InvalidPerturbation {
                reason: format!(
                    "targets must be finite, got u={} v={}",
                    self.target_u, self.target_v
                ),
            });
        }
        if !(self.perturb_mag.is_finite() && self.perturb_mag >= 0.0) {
            return Err(ConfigError::InvalidPerturbation {
                reason: format!(
                    "magnitude must be finite and non-negative, got {}",
                    self.perturb_mag
                ),
            });
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if self.timesteps == 0 {
            return Err(ConfigError::NoTimesteps);
        }
        if self.out_freq == 0 {
            return Err(ConfigError::InvalidOutputFrequency);
        }
        for (species, value) in [(Species::U, self.du), (Species::V, self.dv)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidDiffusion { species, value });
            }
        }
        for (name, value) in [
            ("feed", self.feed),
            ("kill", self.kill),
            ("feedmax", self.feedmax),
            ("killmax", self.killmax),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidRate { name, value });
            }
        }
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Explicit-scheme diffusion number `dt * max(du, dv) / h²`.
    pub fn stability_number(&self) -> f64 {
        self.dt * self.du.max(self.dv) / (self.h * self.h)
    }

    /// Whether the diffusion number exceeds the stencil's explicit limit.
    pub fn is_likely_unstable(&self) -> bool {
        self.stability_number() > self.stencil.max_diffusion_number()
    }

    /// Log a warning if the run is likely to blow up.
    pub(crate) fn warn_if_unstable(&self) {
        if self.is_likely_unstable() {
            log::warn!(
                "diffusion number {:.4} exceeds the {} stencil limit {}; expect divergence",
                self.stability_number(),
                self.stencil,
                self.stencil.max_diffusion_number()
            );
        }
    }

    /// Artifact name for this run, e.g. `GSD-k=0.06-feed=0.035`.
    pub fn run_label(&self) -> String {
        format!("GSD-k={}-feed={}", self.kill, self.feed)
    }

    /// Number of output steps a full run produces.
    pub fn expected_frames(&self) -> u64 {
        self.timesteps.saturating_sub(1) / self.out_freq
    }
}
