//! Shared row helpers for whole-field stencil evaluation.
//!
//! Stencils are evaluated one output row at a time from shifted views
//! of the input rows. Row dispatch goes through rayon when the
//! `parallel` feature is on.

/// `out[x] = row[x - 1] + row[x + 1]` with periodic wrap at both ends.
///
/// Interior columns read two contiguous shifted windows; only the two
/// edge columns wrap.
pub(crate) fn wrapped_pair_sum(row: &[f64], out: &mut [f64]) {
    let n = row.len();
    debug_assert_eq!(n, out.len());
    if n > 2 {
        for ((o, &west), &east) in out[1..n - 1].iter_mut().zip(&row[..n - 2]).zip(&row[2..]) {
            *o = west + east;
        }
    }
    out[0] = row[n - 1] + row[1 % n];
    out[n - 1] = row[(2 * n - 2) % n] + row[0];
}

/// Index of the row above `row` on a torus of side `n`.
pub(crate) fn row_above(row: usize, n: usize) -> usize {
    if row == 0 {
        n - 1
    } else {
        row - 1
    }
}

/// Index of the row below `row` on a torus of side `n`.
pub(crate) fn row_below(row: usize, n: usize) -> usize {
    if row + 1 == n {
        0
    } else {
        row + 1
    }
}

/// Run `f(row_index, row)` over every `n`-wide row of `out`.
#[cfg(feature = "parallel")]
pub(crate) fn for_each_row<F>(out: &mut [f64], n: usize, f: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    use rayon::prelude::*;
    out.par_chunks_mut(n)
        .enumerate()
        .for_each(|(row, dst)| f(row, dst));
}

/// Run `f(row_index, row)` over every `n`-wide row of `out`.
#[cfg(not(feature = "parallel"))]
pub(crate) fn for_each_row<F>(out: &mut [f64], n: usize, f: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    out.chunks_mut(n)
        .enumerate()
        .for_each(|(row, dst)| f(row, dst));
}
