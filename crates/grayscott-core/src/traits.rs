//! Collaborator traits consumed by the simulation engine.

use crate::error::SinkError;
use crate::state::Snapshot;

/// Receives snapshots as the simulation produces them.
///
/// Renderers, encoders and recorders live behind this trait. `emit` is
/// called synchronously from the simulation loop and may block; an
/// `Err` aborts the run.
pub trait OutputSink {
    /// Take ownership of one snapshot.
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError>;
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        (**self).emit(snapshot)
    }
}

impl<S: OutputSink + ?Sized> OutputSink for Box<S> {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        (**self).emit(snapshot)
    }
}

/// Source of uniform random numbers in `[0, 1)`.
///
/// Injected into the initializer so tests can script exact draws.
pub trait RandomSource {
    /// Next uniform sample in `[0, 1)`.
    fn uniform(&mut self) -> f64;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }
}
