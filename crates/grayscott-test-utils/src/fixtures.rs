//! Reusable collaborator fixtures.
//!
//! - [`ConstRandom`]: returns the same draw forever.
//! - [`SequenceRandom`]: replays a scripted list of draws.
//! - [`RecordingSink`]: keeps every snapshot it receives.
//! - [`FailingSink`]: fails deterministically after N accepted snapshots.

use std::collections::VecDeque;

use grayscott_core::{OutputSink, RandomSource, SinkError, Snapshot, Species};

/// Returns the same value on every draw.
///
/// `ConstRandom(0.0)` disables per-cell jitter and pins every patch at
/// the grid origin.
#[derive(Clone, Copy, Debug)]
pub struct ConstRandom(pub f64);

impl RandomSource for ConstRandom {
    fn uniform(&mut self) -> f64 {
        self.0
    }
}

/// Replays scripted draws in order, then repeats `fallback` forever.
#[derive(Clone, Debug)]
pub struct SequenceRandom {
    values: VecDeque<f64>,
    fallback: f64,
    draws: usize,
}

impl SequenceRandom {
    pub fn new(values: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            values: values.into_iter().collect(),
            fallback,
            draws: 0,
        }
    }

    /// Total number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Scripted values not yet consumed.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for SequenceRandom {
    fn uniform(&mut self) -> f64 {
        self.draws += 1;
        self.values.pop_front().unwrap_or(self.fallback)
    }
}

/// Collects every emitted snapshot for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub snapshots: Vec<Snapshot>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timesteps of all received snapshots, in arrival order.
    pub fn timesteps(&self) -> Vec<u64> {
        self.snapshots.iter().map(|s| s.timestep).collect()
    }

    /// Snapshots of one species only.
    pub fn of_species(&self, species: Species) -> Vec<&Snapshot> {
        self.snapshots
            .iter()
            .filter(|s| s.species == species)
            .collect()
    }
}

impl OutputSink for RecordingSink {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        self.snapshots.push(snapshot);
        Ok(())
    }
}

/// Accepts `succeed_count` snapshots, then fails on every later call.
#[derive(Debug)]
pub struct FailingSink {
    pub succeed_count: usize,
    calls: usize,
}

impl FailingSink {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: 0,
        }
    }

    /// How many times `emit()` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl OutputSink for FailingSink {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        let n = self.calls;
        self.calls += 1;
        if n >= self.succeed_count {
            return Err(SinkError::new(format!(
                "deliberate failure at timestep {} after {} accepted snapshots",
                snapshot.timestep, self.succeed_count
            )));
        }
        Ok(())
    }
}
