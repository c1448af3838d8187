//! Feed and kill rate fields.
//!
//! A run either uses one `(feed, kill)` pair everywhere, or ramps both
//! across the grid to scan a slice of Gray-Scott parameter space in a
//! single simulation:
//!
//! - feed varies down the rows: row 0 holds `feedmax`, row `n-1` holds `feed`
//! - kill varies across the columns: column 0 holds `kill`, column `n-1`
//!   holds `killmax`
//!
//! Ramped fields are stored row-major, so cell `i` of a ramp lines up
//! with cell `i` of the concentration fields.

use grayscott_core::{Field, StateError};

/// `num` evenly spaced samples from `start` to `stop` inclusive.
///
/// The first and last samples equal `start` and `stop` exactly. A single
/// sample yields `[start]`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut out: Vec<f64> = (0..num).map(|i| i as f64 * step + start).collect();
            out[num - 1] = stop;
            out
        }
    }
}

/// Reaction parameters: uniform scalars or per-cell ramps.
///
/// Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub enum ParameterField {
    /// The same feed and kill rate in every cell.
    Uniform {
        /// Feed rate.
        feed: f64,
        /// Kill rate.
        kill: f64,
    },
    /// Per-cell feed and kill rates, same shape as the grid.
    Ramp {
        /// Feed rate per cell, constant along each row.
        feed: Field,
        /// Kill rate per cell, constant down each column.
        kill: Field,
    },
}

impl ParameterField {
    /// Build the parameter field for an `n x n` grid.
    ///
    /// If `feedmax` and `killmax` are both zero the scalars are returned
    /// unchanged. Otherwise feed ramps from `feedmax` (row 0) to `feed`
    /// (last row) and kill from `kill` (column 0) to `killmax` (last
    /// column).
    pub fn build(
        feed: f64,
        kill: f64,
        feedmax: f64,
        killmax: f64,
        n: usize,
    ) -> Result<Self, StateError> {
        if feedmax == 0.0 && killmax == 0.0 {
            return Ok(Self::Uniform { feed, kill });
        }
        Field::cell_count(n)?;
        let feed_by_row = linspace(feedmax, feed, n);
        let kill_by_col = linspace(kill, killmax, n);
        Ok(Self::Ramp {
            feed: Field::from_fn(n, |row, _| feed_by_row[row])?,
            kill: Field::from_fn(n, |_, col| kill_by_col[col])?,
        })
    }

    /// Whether the same parameters apply to every cell.
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform { .. })
    }

    /// Feed rate at flat cell index `i`.
    #[inline]
    pub fn feed_at(&self, i: usize) -> f64 {
        match self {
            Self::Uniform { feed, .. } => *feed,
            Self::Ramp { feed, .. } => feed.as_slice()[i],
        }
    }

    /// Kill rate at flat cell index `i`.
    #[inline]
    pub fn kill_at(&self, i: usize) -> f64 {
        match self {
            Self::Uniform { kill, .. } => *kill,
            Self::Ramp { kill, .. } => kill.as_slice()[i],
        }
    }

    /// Side length of the ramp, or `None` for uniform parameters.
    pub fn n(&self) -> Option<usize> {
        match self {
            Self::Uniform { .. } => None,
            Self::Ramp { feed, .. } => Some(feed.n()),
        }
    }
}
