//! The per-timestep simulation loop.
//!
//! [`Simulation`] owns the grid and is its only writer. Each timestep:
//!
//! 1. Laplacians of U and V into scratch buffers.
//! 2. `u v²` once, into a scratch buffer.
//! 3. Increments for U and V from the same pre-update values.
//! 4. Both increments applied together.
//! 5. On output steps: divergence scan, snapshot(s) to the sink,
//!    progress report.
//!
//! # State machine
//!
//! ```text
//! NotStarted ──run()──▶ Running ◀──▶ EmittingSnapshot
//!                          │
//!                          ├──▶ Completed   (loop finished)
//!                          └──▶ Aborted     (sink failure, divergence,
//!                                            cancellation, timeout)
//! ```
//!
//! A simulation runs once; a second [`run()`](Simulation::run) returns
//! [`StepError::AlreadyRun`].

use std::time::{Duration, Instant};

use grayscott_core::{
    Field, GridState, OutputSink, RandomSource, Snapshot, Species, StepError,
};
use grayscott_kernels::{ChaChaSource, Initializer, ParameterField, ReactionKinetics};

use crate::cancel::CancelToken;
use crate::config::{ConfigError, DivergencePolicy, SimulationConfig};
use crate::metrics::RunMetrics;
use crate::progress::{Progress, ProgressReporter};

// Compile-time assertion: a Simulation can be moved to a worker thread.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Simulation>();
    }
};

// ── RunState ────────────────────────────────────────────────────

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Built, not yet run.
    NotStarted,
    /// Computing timesteps.
    Running,
    /// Handing snapshots to the sink.
    EmittingSnapshot,
    /// Every timestep computed. Terminal.
    Completed,
    /// Stopped early by an error. Terminal.
    Aborted,
}

impl RunState {
    /// Whether no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}

// ── RunSummary ──────────────────────────────────────────────────

/// Result of a successful [`Simulation::run()`].
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Timesteps computed (`timesteps - 1`, or 0).
    pub timesteps_run: u64,
    /// Snapshots accepted by the sink.
    pub snapshots_emitted: u64,
    /// Wall-clock time of the loop.
    pub elapsed: Duration,
    /// Per-phase timings.
    pub metrics: RunMetrics,
}

// ── Scratch ─────────────────────────────────────────────────────

/// Per-timestep buffers, reused across the run.
#[derive(Debug)]
struct Scratch {
    lap_u: Field,
    lap_v: Field,
    uvv: Field,
}

impl Scratch {
    fn new(n: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            lap_u: Field::zeros(n)?,
            lap_v: Field::zeros(n)?,
            uvv: Field::zeros(n)?,
        })
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// A single Gray-Scott run.
///
/// # Example
///
/// ```
/// use grayscott_engine::{LogProgress, Simulation, SimulationConfig, VecSink};
///
/// let config = SimulationConfig {
///     grid: 32,
///     timesteps: 201,
///     out_freq: 100,
///     ..SimulationConfig::new(0.035, 0.065)
/// };
/// let mut sim = Simulation::new(config)?;
/// let mut sink = VecSink::new();
/// let summary = sim.run(&mut sink, LogProgress)?;
/// assert_eq!(summary.snapshots_emitted, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    state: GridState,
    params: ParameterField,
    kinetics: ReactionKinetics,
    scratch: Scratch,
    run_state: RunState,
    cancel: CancelToken,
}

impl Simulation {
    /// Validate `config` and build the initial state from a ChaCha8
    /// source seeded with `config.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let mut rng = ChaChaSource::seed_from_u64(config.seed);
        Self::with_random(config, &mut rng)
    }

    /// Validate `config` and build the initial state from `rng`.
    pub fn with_random<R: RandomSource + ?Sized>(
        config: SimulationConfig,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let initializer = Initializer {
            n: config.grid,
            perturb_count: config.perturb_count,
            target_u: config.target_u,
            target_v: config.target_v,
            perturb_mag: config.perturb_mag,
        };
        let state = initializer.initialize(rng)?;
        Self::assemble(config, state)
    }

    /// Validate `config` and start from a caller-supplied state.
    ///
    /// The perturbation settings in `config` are ignored.
    pub fn from_state(config: SimulationConfig, state: GridState) -> Result<Self, ConfigError> {
        config.validate()?;
        if state.n() != config.grid {
            return Err(ConfigError::GridMismatch {
                configured: config.grid,
                actual: state.n(),
            });
        }
        Self::assemble(config, state)
    }

    fn assemble(config: SimulationConfig, state: GridState) -> Result<Self, ConfigError> {
        config.warn_if_unstable();
        let params = ParameterField::build(
            config.feed,
            config.kill,
            config.feedmax,
            config.killmax,
            config.grid,
        )?;
        let scratch = Scratch::new(config.grid)?;
        Ok(Self {
            kinetics: ReactionKinetics::new(config.du, config.dv),
            params,
            scratch,
            state,
            config,
            run_state: RunState::NotStarted,
            cancel: CancelToken::new(),
        })
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current concentrations.
    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// Consume the simulation and return its grid.
    pub fn into_state(self) -> GridState {
        self.state
    }

    /// Feed and kill rates in use.
    pub fn parameters(&self) -> &ParameterField {
        &self.params
    }

    /// Current lifecycle state.
    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// A handle that cancels this simulation's run from anywhere.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Run the loop to completion.
    ///
    /// Timesteps `1..timesteps` are computed; `timesteps == 1` computes
    /// none. Cancellation and the timeout are checked before each
    /// timestep.
    ///
    /// # Errors
    ///
    /// Returns the first [`StepError`] hit; the grid is left as it was
    /// after the last completed timestep and the state becomes
    /// [`RunState::Aborted`].
    pub fn run<S, P>(&mut self, mut sink: S, mut progress: P) -> Result<RunSummary, StepError>
    where
        S: OutputSink,
        P: ProgressReporter,
    {
        if self.run_state != RunState::NotStarted {
            return Err(StepError::AlreadyRun);
        }
        self.run_state = RunState::Running;
        log::info!(
            "starting {}: {n}x{n} grid, {} timesteps, {} stencil, {} integrator",
            self.config.run_label(),
            self.config.timesteps,
            self.config.stencil,
            self.config.integrator,
            n = self.config.grid,
        );

        let result = self.run_loop(&mut sink, &mut progress);
        match &result {
            Ok(summary) => {
                self.run_state = RunState::Completed;
                log::info!(
                    "completed {} timesteps in {:.3}s, {} snapshots",
                    summary.timesteps_run,
                    summary.elapsed.as_secs_f64(),
                    summary.snapshots_emitted
                );
            }
            Err(e) => {
                self.run_state = RunState::Aborted;
                log::warn!("run aborted: {e}");
            }
        }
        result
    }

    fn run_loop<S, P>(&mut self, sink: &mut S, progress: &mut P) -> Result<RunSummary, StepError>
    where
        S: OutputSink,
        P: ProgressReporter,
    {
        let start = Instant::now();
        let h2 = self.config.h * self.config.h;
        let timesteps = self.config.timesteps;
        let out_freq = self.config.out_freq;

        let mut metrics = RunMetrics::default();
        let mut snapshots_emitted = 0;
        let mut timesteps_run = 0;
        let mut warned = [false; 2];

        for t in 1..timesteps {
            self.check_interrupts(t - 1, start)?;
            self.step(h2, &mut metrics);
            timesteps_run = t;

            if t % out_freq == 0 {
                self.run_state = RunState::EmittingSnapshot;
                let emit_start = Instant::now();
                self.check_divergence(t, &mut warned)?;
                for &species in self.config.output.species() {
                    let snapshot = Snapshot {
                        timestep: t,
                        frame: t / out_freq,
                        species,
                        field: self.state.species(species).clone(),
                    };
                    sink.emit(snapshot)
                        .map_err(|reason| StepError::SinkFailed { timestep: t, reason })?;
                    snapshots_emitted += 1;
                }
                RunMetrics::add(&mut metrics.output_us, emit_start.elapsed());
                progress.report(&Progress::estimate(t, timesteps, start.elapsed()));
                self.run_state = RunState::Running;
            }
        }

        Ok(RunSummary {
            timesteps_run,
            snapshots_emitted,
            elapsed: start.elapsed(),
            metrics,
        })
    }

    /// Advance the grid by one timestep.
    fn step(&mut self, h2: f64, metrics: &mut RunMetrics) {
        let stencil = self.config.stencil;
        let integrator = self.config.integrator;
        let dt = self.config.dt;

        let t0 = Instant::now();
        stencil.laplacian_into(self.state.u(), h2, &mut self.scratch.lap_u);
        stencil.laplacian_into(self.state.v(), h2, &mut self.scratch.lap_v);
        RunMetrics::add(&mut metrics.stencil_us, t0.elapsed());

        let t1 = Instant::now();
        let Scratch { lap_u, lap_v, uvv } = &mut self.scratch;
        ReactionKinetics::uvv_into(self.state.u(), self.state.v(), uvv);
        let delta_u = integrator.advance(
            self.state.u(),
            dt,
            self.kinetics.bind_u(lap_u, uvv, &self.params),
        );
        let delta_v = integrator.advance(
            self.state.v(),
            dt,
            self.kinetics.bind_v(lap_v, uvv, &self.params),
        );
        self.state.apply(&delta_u, &delta_v);
        RunMetrics::add(&mut metrics.kinetics_us, t1.elapsed());
        metrics.steps += 1;
    }

    fn check_interrupts(&self, completed: u64, start: Instant) -> Result<(), StepError> {
        if self.cancel.is_cancelled() {
            return Err(StepError::Cancelled {
                timestep: completed,
            });
        }
        if let Some(limit) = self.config.timeout {
            let elapsed = start.elapsed();
            if elapsed >= limit {
                return Err(StepError::TimedOut {
                    timestep: completed,
                    elapsed,
                });
            }
        }
        Ok(())
    }

    fn check_divergence(&self, timestep: u64, warned: &mut [bool; 2]) -> Result<(), StepError> {
        let policy = self.config.divergence;
        if policy == DivergencePolicy::Ignore {
            return Ok(());
        }
        for (slot, species) in [Species::U, Species::V].into_iter().enumerate() {
            let Some(cell_index) = self.state.species(species).first_non_finite() else {
                continue;
            };
            match policy {
                DivergencePolicy::Abort => {
                    return Err(StepError::NumericDivergence {
                        species,
                        timestep,
                        cell_index,
                    });
                }
                DivergencePolicy::Warn if !warned[slot] => {
                    warned[slot] = true;
                    log::warn!(
                        "species {species} diverged at timestep {timestep} (cell {cell_index}); continuing"
                    );
                }
                _ => {}
            }
        }
        Ok(())
    }
}
