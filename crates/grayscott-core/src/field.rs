//! Square scalar fields with toroidal indexing.

use std::ops::{Index, IndexMut};

use crate::error::StateError;

/// Wrap a signed axis coordinate onto `[0, n)` (periodic boundary).
///
/// `n` must be non-zero; every [`Field`] guarantees this.
pub fn wrap_index(i: isize, n: usize) -> usize {
    i.rem_euclid(n as isize) as usize
}

/// An `n x n` matrix of `f64` values stored row-major.
///
/// Cell `(row, col)` lives at flat index `row * n + col`. Rows are the
/// `y` axis and columns the `x` axis. Neighbour lookups through
/// [`get_wrapped`](Field::get_wrapped) and [`roll`](Field::roll) treat
/// the grid as a torus.
///
/// Arithmetic helpers return new fields and panic if the operands have
/// different side lengths; every field inside one simulation shares the
/// same `n`, so a mismatch is a programming error rather than bad input.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    n: usize,
    data: Vec<f64>,
}

impl Field {
    /// Number of cells in an `n x n` grid.
    ///
    /// Rejects `n == 0` with [`StateError::EmptyGrid`], and any `n` whose
    /// buffer size in bytes would overflow `isize` with
    /// [`StateError::TooLarge`].
    pub fn cell_count(n: usize) -> Result<usize, StateError> {
        if n == 0 {
            return Err(StateError::EmptyGrid);
        }
        n.checked_mul(n)
            .filter(|&cells| cells <= isize::MAX as usize / std::mem::size_of::<f64>())
            .ok_or(StateError::TooLarge { n })
    }

    /// Create an `n x n` field with every cell set to `value`.
    ///
    /// Returns `Err(StateError::EmptyGrid)` if `n` is zero.
    pub fn filled(n: usize, value: f64) -> Result<Self, StateError> {
        let cells = Self::cell_count(n)?;
        Ok(Self {
            n,
            data: vec![value; cells],
        })
    }

    /// Create an `n x n` field of zeros.
    pub fn zeros(n: usize) -> Result<Self, StateError> {
        Self::filled(n, 0.0)
    }

    /// Wrap an existing row-major buffer of length `n * n`.
    pub fn from_vec(n: usize, data: Vec<f64>) -> Result<Self, StateError> {
        let cells = Self::cell_count(n)?;
        if data.len() != cells {
            return Err(StateError::DataLength {
                expected: cells,
                actual: data.len(),
            });
        }
        Ok(Self { n, data })
    }

    /// Build a field by evaluating `f(row, col)` for every cell.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> f64) -> Result<Self, StateError> {
        let mut data = Vec::with_capacity(Self::cell_count(n)?);
        for row in 0..n {
            for col in 0..n {
                data.push(f(row, col));
            }
        }
        Ok(Self { n, data })
    }

    /// Side length of the grid.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Total number of cells (`n * n`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always returns `false`: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Row-major view of all cells.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable row-major view of all cells.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Value at `(row, col)`. Panics if either index is `>= n`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.n + col]
    }

    /// Set the value at `(row, col)`. Panics if either index is `>= n`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.n + col] = value;
    }

    /// Value at a signed coordinate, wrapped periodically on both axes.
    pub fn get_wrapped(&self, row: isize, col: isize) -> f64 {
        self.get(wrap_index(row, self.n), wrap_index(col, self.n))
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.n;
        &self.data[start..start + self.n]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.n)
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f64) {
        self.data.fill(value);
    }

    /// Periodic shift: `out[r][c] = self[r - dr][c - dc]`, indices wrapped.
    ///
    /// Matches the usual array "roll" convention, so `roll(1, 0)` moves
    /// every row one step down and the last row to the top.
    pub fn roll(&self, dr: isize, dc: isize) -> Field {
        let n = self.n;
        let shift_c = wrap_index(dc, n);
        let mut data = vec![0.0; n * n];
        for (row, out) in data.chunks_exact_mut(n).enumerate() {
            let src = self.row(wrap_index(row as isize - dr, n));
            // Column shift as two contiguous copies.
            out[shift_c..].copy_from_slice(&src[..n - shift_c]);
            out[..shift_c].copy_from_slice(&src[n - shift_c..]);
        }
        Field { n, data }
    }

    /// Apply `f` to every cell, returning a new field.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Field {
        Field {
            n: self.n,
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    /// Apply `f(flat_index, value)` to every cell, returning a new field.
    pub fn map_indexed(&self, f: impl Fn(usize, f64) -> f64) -> Field {
        Field {
            n: self.n,
            data: self.data.iter().enumerate().map(|(i, &x)| f(i, x)).collect(),
        }
    }

    /// Combine two fields cell by cell, returning a new field.
    pub fn zip_map(&self, other: &Field, f: impl Fn(f64, f64) -> f64) -> Field {
        self.assert_same_shape(other);
        Field {
            n: self.n,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// `a * self`, returning a new field.
    pub fn scaled(&self, a: f64) -> Field {
        self.map(|x| a * x)
    }

    /// `self + a * other`, returning a new field.
    pub fn add_scaled(&self, other: &Field, a: f64) -> Field {
        self.zip_map(other, |x, y| x + a * y)
    }

    /// In-place `self += other`.
    pub fn add_assign(&mut self, other: &Field) {
        self.assert_same_shape(other);
        for (x, &y) in self.data.iter_mut().zip(&other.data) {
            *x += y;
        }
    }

    /// Flat index of the first NaN or infinite cell, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.data.iter().position(|x| !x.is_finite())
    }

    /// Largest absolute cell-wise difference between two fields.
    pub fn max_abs_diff(&self, other: &Field) -> f64 {
        self.assert_same_shape(other);
        self.data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    fn assert_same_shape(&self, other: &Field) {
        assert_eq!(
            self.n, other.n,
            "field side lengths differ: {} vs {}",
            self.n, other.n
        );
    }
}

impl Index<(usize, usize)> for Field {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.data[row * self.n + col]
    }
}

impl IndexMut<(usize, usize)> for Field {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.n + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ramp(n: usize) -> Field {
        Field::from_fn(n, |r, c| (r * n + c) as f64).unwrap()
    }

    #[test]
    fn zero_side_is_rejected() {
        assert_eq!(Field::zeros(0), Err(StateError::EmptyGrid));
        assert_eq!(Field::from_vec(0, vec![]), Err(StateError::EmptyGrid));
    }

    #[test]
    fn oversized_side_is_rejected_without_panicking() {
        let n = 1usize << 32;
        assert_eq!(Field::cell_count(n), Err(StateError::TooLarge { n }));
        assert_eq!(Field::filled(n, 1.0), Err(StateError::TooLarge { n }));
        assert_eq!(Field::from_vec(n, vec![]), Err(StateError::TooLarge { n }));
        assert_eq!(
            Field::from_fn(n, |_, _| 0.0),
            Err(StateError::TooLarge { n })
        );
        // Cell count fits in usize but the byte size does not.
        let wide = 1usize << 31;
        assert_eq!(Field::zeros(wide), Err(StateError::TooLarge { n: wide }));
        assert_eq!(Field::cell_count(3), Ok(9));
        assert_eq!(Field::cell_count(0), Err(StateError::EmptyGrid));
    }

    #[test]
    fn from_vec_checks_length() {
        match Field::from_vec(3, vec![0.0; 8]) {
            Err(StateError::DataLength {
                expected: 9,
                actual: 8,
            }) => {}
            other => panic!("expected DataLength, got {other:?}"),
        }
    }

    #[test]
    fn wrap_index_handles_negative_and_overflow() {
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(5, 5), 0);
        assert_eq!(wrap_index(7, 5), 2);
        assert_eq!(wrap_index(-6, 5), 4);
    }

    #[test]
    fn get_wrapped_reads_opposite_edge() {
        let f = ramp(3);
        assert_eq!(f.get_wrapped(-1, 0), f.get(2, 0));
        assert_eq!(f.get_wrapped(0, -1), f.get(0, 2));
        assert_eq!(f.get_wrapped(3, 3), f.get(0, 0));
    }

    #[test]
    fn roll_moves_rows_and_columns() {
        let f = ramp(3);
        let down = f.roll(1, 0);
        // Last row wraps to the top.
        assert_eq!(down.row(0), f.row(2));
        assert_eq!(down.row(1), f.row(0));

        let right = f.roll(0, 1);
        assert_eq!(right.row(0), &[2.0, 0.0, 1.0]);

        let back = right.roll(0, -1);
        assert_eq!(back, f);
    }

    #[test]
    fn add_scaled_and_add_assign() {
        let a = Field::filled(2, 1.0).unwrap();
        let b = Field::filled(2, 2.0).unwrap();
        assert_eq!(a.add_scaled(&b, 0.5), Field::filled(2, 2.0).unwrap());

        let mut c = a.clone();
        c.add_assign(&b);
        assert_eq!(c, Field::filled(2, 3.0).unwrap());
    }

    #[test]
    fn map_indexed_sees_row_major_index() {
        let f = Field::filled(2, 10.0).unwrap();
        let g = f.map_indexed(|i, x| x + i as f64);
        assert_eq!(g.as_slice(), &[10.0, 11.0, 12.0, 13.0]);
    }

    #[test]
    fn first_non_finite_finds_nan_and_inf() {
        let mut f = Field::zeros(3).unwrap();
        assert_eq!(f.first_non_finite(), None);
        f.set(2, 1, f64::INFINITY);
        assert_eq!(f.first_non_finite(), Some(7));
        f.set(0, 2, f64::NAN);
        assert_eq!(f.first_non_finite(), Some(2));
    }

    #[test]
    #[should_panic(expected = "side lengths differ")]
    fn mismatched_shapes_panic() {
        let a = Field::zeros(2).unwrap();
        let b = Field::zeros(3).unwrap();
        let _ = a.zip_map(&b, |x, y| x + y);
    }

    proptest! {
        #[test]
        fn roll_matches_wrapped_lookup(n in 1usize..9, dr in -10isize..10, dc in -10isize..10) {
            let f = ramp(n);
            let rolled = f.roll(dr, dc);
            for r in 0..n {
                for c in 0..n {
                    prop_assert_eq!(
                        rolled.get(r, c),
                        f.get_wrapped(r as isize - dr, c as isize - dc)
                    );
                }
            }
        }
    }
}
