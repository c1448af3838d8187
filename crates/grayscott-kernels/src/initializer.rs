//! Initial conditions: the unreacted baseline plus randomized patches.
//!
//! Each patch is a rectangle whose cells are set to the target levels and
//! then jittered by a per-cell draw `r` in `[0, JITTER_AMPLITUDE)`:
//! `U -= r`, `V += r`. `U + V` therefore stays at `target_u + target_v` in
//! every perturbed cell.
//!
//! Patches that run past the grid edge wrap around the torus. Each extent
//! is capped at `n`, so a single patch never visits a cell twice.

use grayscott_core::{wrap_index, GridState, RandomSource, StateError};

/// Upper bound of the per-cell jitter draw.
pub const JITTER_AMPLITUDE: f64 = 0.01;

/// Patch origins are drawn from this leading fraction of each axis.
pub const ORIGIN_FRACTION: f64 = 0.9;

/// One randomized rectangular patch. Consumed by [`apply`](Self::apply).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerturbationSpec {
    /// First row of the patch.
    pub row: usize,
    /// First column of the patch.
    pub col: usize,
    /// Number of rows covered, at most `n`.
    pub rows: usize,
    /// Number of columns covered, at most `n`.
    pub cols: usize,
    /// U level before jitter.
    pub target_u: f64,
    /// V level before jitter.
    pub target_v: f64,
}

impl PerturbationSpec {
    /// Draw a patch for an `n x n` grid.
    ///
    /// Consumes four draws in order: column origin, row origin, column
    /// extent, row extent.
    pub fn draw<R: RandomSource + ?Sized>(
        rng: &mut R,
        n: usize,
        magnitude: f64,
        target_u: f64,
        target_v: f64,
    ) -> Self {
        let size = n as f64;
        let origin = |r: f64| ((r * size * ORIGIN_FRACTION) as usize).min(n.saturating_sub(1));
        let extent = |r: f64| (((r * size + size) * magnitude) as usize).min(n);

        let col = origin(rng.uniform());
        let row = origin(rng.uniform());
        let cols = extent(rng.uniform());
        let rows = extent(rng.uniform());
        Self {
            row,
            col,
            rows,
            cols,
            target_u,
            target_v,
        }
    }

    /// Wrapped `(row, col)` coordinates covered by the patch, columns
    /// outermost.
    pub fn cells(&self, n: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.cols).flat_map(move |dc| {
            let col = wrap_index((self.col + dc) as isize, n);
            (0..self.rows).map(move |dr| (wrap_index((self.row + dr) as isize, n), col))
        })
    }

    /// Write the patch into `state`, drawing one jitter value per cell.
    pub fn apply<R: RandomSource + ?Sized>(&self, state: &mut GridState, rng: &mut R) {
        let n = state.n();
        let (u, v) = state.fields_mut();
        for (row, col) in self.cells(n) {
            let i = row * n + col;
            let r = JITTER_AMPLITUDE * rng.uniform();
            u[i] = self.target_u - r;
            v[i] = self.target_v + r;
        }
    }
}

/// Builds the initial [`GridState`] for a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Initializer {
    /// Grid side length.
    pub n: usize,
    /// Number of patches to place.
    pub perturb_count: usize,
    /// U level inside patches.
    pub target_u: f64,
    /// V level inside patches.
    pub target_v: f64,
    /// Patch size relative to the grid.
    pub perturb_mag: f64,
}

impl Initializer {
    /// Baseline `U = 1`, `V = 0`, then `perturb_count` patches in draw order.
    ///
    /// Later patches overwrite earlier ones where they overlap.
    pub fn initialize<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<GridState, StateError> {
        let mut state = GridState::baseline(self.n)?;
        for _ in 0..self.perturb_count {
            let patch = PerturbationSpec::draw(
                rng,
                self.n,
                self.perturb_mag,
                self.target_u,
                self.target_v,
            );
            patch.apply(&mut state, rng);
        }
        Ok(state)
    }
}
