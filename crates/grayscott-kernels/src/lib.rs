//! Numerical kernels for the Gray-Scott simulator.
//!
//! Everything here is a pure building block; the per-timestep
//! orchestration lives in `grayscott-engine`.
//!
//! - [`Stencil`]: periodic 5-point and 9-point discrete Laplacians
//! - [`ReactionKinetics`]: pointwise Gray-Scott rate functions
//! - [`Integrator`]: explicit Euler, midpoint and RK4 steppers
//! - [`ParameterField`]: uniform or ramped feed/kill parameters
//! - [`Initializer`] and [`PerturbationSpec`]: randomized initial state
//! - [`ChaChaSource`]: seeded [`RandomSource`](grayscott_core::RandomSource)

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod initializer;
pub mod integrator;
pub mod kinetics;
pub mod parameters;
pub mod random;
mod rows;
pub mod stencil;

pub use initializer::{Initializer, PerturbationSpec};
pub use integrator::Integrator;
pub use kinetics::ReactionKinetics;
pub use parameters::{linspace, ParameterField};
pub use random::ChaChaSource;
pub use stencil::Stencil;
