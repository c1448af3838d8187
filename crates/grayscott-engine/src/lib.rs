//! Simulation engine for the Gray-Scott reaction-diffusion system.
//!
//! Ties the numerical kernels together into a run:
//! [`SimulationConfig`] is validated up front, [`Simulation`] owns the
//! grid and drives the per-timestep loop, and snapshots leave through an
//! [`OutputSink`](grayscott_core::OutputSink) such as [`VecSink`] or
//! [`ChannelSink`]. Progress goes to a [`ProgressReporter`]; the
//! [`LogProgress`] reporter writes it through the `log` facade.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod metrics;
pub mod progress;
pub mod simulation;
pub mod sink;

pub use cancel::CancelToken;
pub use config::{ConfigError, DivergencePolicy, OutputSpecies, SimulationConfig};
pub use metrics::RunMetrics;
pub use progress::{LogProgress, Progress, ProgressReporter, PROGRESS_TARGET};
pub use simulation::{RunState, RunSummary, Simulation};
pub use sink::{from_fn, ChannelSink, FnSink, VecSink};
