//! Gray-Scott reaction-diffusion on a periodic 2-D grid.
//!
//! Facade crate re-exporting the public API of the sub-crates. For most
//! users, adding `grayscott` as a single dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use grayscott::prelude::*;
//!
//! let config = SimulationConfig {
//!     grid: 64,
//!     timesteps: 1_001,
//!     out_freq: 500,
//!     perturb_mag: 0.2,
//!     integrator: Integrator::Midpoint,
//!     ..SimulationConfig::new(0.035, 0.065)
//! };
//! let mut sim = Simulation::new(config).unwrap();
//! let mut frames = VecSink::new();
//! let summary = sim.run(&mut frames, ()).unwrap();
//!
//! assert_eq!(summary.snapshots_emitted, 2);
//! assert_eq!(frames.snapshots()[1].timestep, 1000);
//! assert_eq!(sim.run_state(), RunState::Completed);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `grayscott-core` | `Field`, `GridState`, `Snapshot`, errors, collaborator traits |
//! | [`kernels`] | `grayscott-kernels` | Stencils, kinetics, integrators, parameters, initial state |
//! | [`engine`] | `grayscott-engine` | Configuration, the simulation loop, sinks, progress |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Fields, grid state, snapshots, and errors (`grayscott-core`).
///
/// Implement [`types::OutputSink`] to receive frames and
/// [`types::RandomSource`] to control initial conditions.
pub use grayscott_core as types;

/// Numerical building blocks (`grayscott-kernels`).
pub use grayscott_kernels as kernels;

/// Configuration and the simulation loop (`grayscott-engine`).
pub use grayscott_engine as engine;

/// Common imports for typical use.
///
/// ```rust
/// use grayscott::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use grayscott_core::{Field, GridState, OutputSink, RandomSource, Snapshot, Species};

    // Errors
    pub use grayscott_core::{SinkError, StateError, StepError};
    pub use grayscott_engine::ConfigError;

    // Kernels
    pub use grayscott_kernels::{ChaChaSource, Integrator, ParameterField, Stencil};

    // Engine
    pub use grayscott_engine::{
        CancelToken, ChannelSink, DivergencePolicy, LogProgress, OutputSpecies, Progress,
        ProgressReporter, RunState, RunSummary, Simulation, SimulationConfig, VecSink,
    };
}
