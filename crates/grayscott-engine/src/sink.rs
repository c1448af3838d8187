//! Ready-made [`OutputSink`] adapters.
//!
//! - [`VecSink`]: keep every snapshot in memory.
//! - [`FnSink`]: forward to a closure (see [`from_fn`]).
//! - [`ChannelSink`]: hand snapshots to another thread over a crossbeam
//!   channel, e.g. a renderer or encoder running alongside the loop.

use crossbeam_channel::{Receiver, Sender};
use grayscott_core::{OutputSink, SinkError, Snapshot};

// ── VecSink ───────────────────────────────────────────────────────

/// Collects snapshots in arrival order.
#[derive(Debug, Default)]
pub struct VecSink {
    snapshots: Vec<Snapshot>,
}

impl VecSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots received so far.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Take ownership of the collected snapshots.
    pub fn into_inner(self) -> Vec<Snapshot> {
        self.snapshots
    }
}

impl OutputSink for VecSink {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        self.snapshots.push(snapshot);
        Ok(())
    }
}

// ── FnSink ────────────────────────────────────────────────────────

/// Forwards each snapshot to a closure.
pub struct FnSink<F>(F);

/// Wrap a closure as an [`OutputSink`].
///
/// ```
/// use grayscott_core::OutputSink;
/// use grayscott_engine::sink::from_fn;
///
/// let mut frames = 0;
/// let mut sink = from_fn(|_snapshot| {
///     frames += 1;
///     Ok(())
/// });
/// # let _ = &mut sink;
/// ```
pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: FnMut(Snapshot) -> Result<(), SinkError>,
{
    FnSink(f)
}

impl<F> OutputSink for FnSink<F>
where
    F: FnMut(Snapshot) -> Result<(), SinkError>,
{
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        (self.0)(snapshot)
    }
}

// ── ChannelSink ───────────────────────────────────────────────────

/// Sends snapshots down a crossbeam channel.
///
/// With a bounded channel the loop blocks on a full queue, which
/// throttles the simulation to the consumer's pace. A disconnected
/// receiver is a sink failure.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<Snapshot>,
}

impl ChannelSink {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<Snapshot>) -> Self {
        Self { tx }
    }

    /// A sink and the receiver for a channel holding at most `cap`
    /// undelivered snapshots.
    pub fn bounded(cap: usize) -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = crossbeam_channel::bounded(cap);
        (Self { tx }, rx)
    }

    /// A sink and the receiver for an unbounded channel.
    pub fn unbounded() -> (Self, Receiver<Snapshot>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self { tx }, rx)
    }
}

impl OutputSink for ChannelSink {
    fn emit(&mut self, snapshot: Snapshot) -> Result<(), SinkError> {
        let timestep = snapshot.timestep;
        self.tx.send(snapshot).map_err(|_| {
            SinkError::new(format!(
                "snapshot receiver disconnected at timestep {timestep}"
            ))
        })
    }
}
