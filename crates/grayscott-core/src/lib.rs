//! Core types and traits for the Gray-Scott reaction-diffusion simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the data model shared by the rest of the workspace: the square
//! [`Field`] matrix with toroidal indexing, the two-species
//! [`GridState`], emitted [`Snapshot`]s, error types, and the two
//! collaborator traits the engine consumes ([`OutputSink`] and
//! [`RandomSource`]).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod field;
pub mod state;
pub mod traits;

pub use error::{SinkError, StateError, StepError};
pub use field::{wrap_index, Field};
pub use state::{GridState, Snapshot, Species};
pub use traits::{OutputSink, RandomSource};
