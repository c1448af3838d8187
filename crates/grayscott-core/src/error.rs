//! Error types for the Gray-Scott simulator.
//!
//! Organised by subsystem: grid construction ([`StateError`]), the
//! output sink collaborator ([`SinkError`]), and the per-timestep
//! simulation loop ([`StepError`]). Configuration errors live next to
//! the configuration type in `grayscott-engine`.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::state::Species;

/// Errors from constructing a [`Field`](crate::Field) or
/// [`GridState`](crate::GridState).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateError {
    /// Grid side length is zero.
    EmptyGrid,
    /// Backing buffer length does not equal `n * n`.
    DataLength {
        /// Expected number of cells (`n * n`).
        expected: usize,
        /// Actual buffer length supplied.
        actual: usize,
    },
    /// The U and V fields have different side lengths.
    ShapeMismatch {
        /// Side length of the U field.
        u: usize,
        /// Side length of the V field.
        v: usize,
    },
    /// `n * n` cells of `f64` cannot be addressed on this platform.
    TooLarge {
        /// Requested side length.
        n: usize,
    },
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::DataLength { expected, actual } => {
                write!(f, "field data has {actual} cells, expected {expected}")
            }
            Self::ShapeMismatch { u, v } => {
                write!(f, "species shapes differ: u is {u}x{u}, v is {v}x{v}")
            }
            Self::TooLarge { n } => write!(f, "grid side {n} is too large to allocate"),
        }
    }
}

impl Error for StateError {}

/// Failure reported by an [`OutputSink`](crate::OutputSink).
///
/// Sinks are external collaborators (renderers, encoders, channels), so
/// the reason is carried as an opaque message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkError {
    /// Human-readable description of the failure.
    pub reason: String,
}

impl SinkError {
    /// Create a sink error from any displayable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output sink failed: {}", self.reason)
    }
}

impl Error for SinkError {}

/// Errors raised while the simulation loop is running.
///
/// None of these are retried or corrected: the loop stops at the
/// timestep that produced the error and leaves the grid as it was.
#[derive(Clone, Debug, PartialEq)]
pub enum StepError {
    /// A NaN or infinite value appeared in a species field.
    NumericDivergence {
        /// The species whose field diverged.
        species: Species,
        /// Timestep at which the divergence was detected.
        timestep: u64,
        /// Flat row-major index of the first non-finite cell.
        cell_index: usize,
    },
    /// The output sink rejected a snapshot.
    SinkFailed {
        /// Timestep of the snapshot being emitted.
        timestep: u64,
        /// The underlying sink error.
        reason: SinkError,
    },
    /// The run was cancelled through its cancel token.
    Cancelled {
        /// Last fully completed timestep.
        timestep: u64,
    },
    /// The configured wall-clock timeout elapsed.
    TimedOut {
        /// Last fully completed timestep.
        timestep: u64,
        /// Wall-clock time spent before giving up.
        elapsed: Duration,
    },
    /// `run()` was called on a simulation that has already run.
    AlreadyRun,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NumericDivergence {
                species,
                timestep,
                cell_index,
            } => write!(
                f,
                "non-finite value in species {species} at timestep {timestep}, cell {cell_index}"
            ),
            Self::SinkFailed { timestep, reason } => {
                write!(f, "snapshot at timestep {timestep} not delivered: {reason}")
            }
            Self::Cancelled { timestep } => write!(f, "cancelled after timestep {timestep}"),
            Self::TimedOut { timestep, elapsed } => write!(
                f,
                "timed out after timestep {timestep} ({:.3}s elapsed)",
                elapsed.as_secs_f64()
            ),
            Self::AlreadyRun => write!(f, "simulation has already been run"),
        }
    }
}

impl Error for StepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SinkFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_failure_chains_source() {
        let err = StepError::SinkFailed {
            timestep: 200,
            reason: SinkError::new("disk full"),
        };
        let msg = format!("{err}");
        assert!(msg.contains("timestep 200"));
        assert!(msg.contains("disk full"));
        let source = err.source().expect("sink failure has a source");
        assert_eq!(source.to_string(), "output sink failed: disk full");
    }

    #[test]
    fn divergence_display_names_species_and_cell() {
        let err = StepError::NumericDivergence {
            species: Species::V,
            timestep: 7,
            cell_index: 42,
        };
        assert_eq!(
            err.to_string(),
            "non-finite value in species v at timestep 7, cell 42"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn shape_mismatch_display() {
        let err = StateError::ShapeMismatch { u: 4, v: 8 };
        assert_eq!(err.to_string(), "species shapes differ: u is 4x4, v is 8x8");
    }

    #[test]
    fn too_large_display_names_side() {
        let err = StateError::TooLarge { n: 1 << 32 };
        assert_eq!(err.to_string(), "grid side 4294967296 is too large to allocate");
    }
}
