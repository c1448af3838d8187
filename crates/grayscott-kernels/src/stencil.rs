//! Periodic discrete Laplacians.
//!
//! Both stencils are evaluated over the whole field by composing
//! shifted views of neighbouring rows, so the only per-cell work is a
//! fused multiply-add over contiguous slices. Edges wrap (torus).

use std::fmt;
use std::str::FromStr;

use grayscott_core::Field;

use crate::rows::{for_each_row, row_above, row_below, wrapped_pair_sum};

const NINE_POINT_ORTHO: f64 = 2.0 / 3.0;
const NINE_POINT_DIAG: f64 = 1.0 / 6.0;
const NINE_POINT_CENTER: f64 = 10.0 / 3.0;

/// Finite-difference Laplacian stencil.
///
/// - **FivePoint**: `(N + S + E + W - 4C) / h²`
/// - **NinePoint**: orthogonal neighbours weighted 2/3, diagonals 1/6,
///   centre -10/3, divided by `h²`. Same O(h²) order as the five-point
///   form with lower anisotropy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stencil {
    /// Four orthogonal neighbours.
    #[default]
    FivePoint,
    /// Orthogonal and diagonal neighbours.
    NinePoint,
}

impl Stencil {
    /// Laplacian of `field` with grid spacing squared `h2`.
    ///
    /// Pure: the input is not modified and the result has the same shape.
    pub fn laplacian(&self, field: &Field, h2: f64) -> Field {
        let mut out = field.clone();
        self.laplacian_into(field, h2, &mut out);
        out
    }

    /// Laplacian of `field` written into a caller-owned buffer.
    ///
    /// Every cell of `out` is overwritten. Panics if the shapes differ.
    pub fn laplacian_into(&self, field: &Field, h2: f64, out: &mut Field) {
        assert_eq!(
            field.n(),
            out.n(),
            "laplacian output side length differs from input"
        );
        let n = field.n();
        match self {
            Self::FivePoint => for_each_row(out.as_mut_slice(), n, |row, dst| {
                five_point_row(field, row, h2, dst)
            }),
            Self::NinePoint => for_each_row(out.as_mut_slice(), n, |row, dst| {
                nine_point_row(field, row, h2, dst)
            }),
        }
    }

    /// Largest `dt * D / h²` for which explicit Euler diffusion with this
    /// stencil is stable.
    pub fn max_diffusion_number(&self) -> f64 {
        match self {
            Self::FivePoint => 0.25,
            Self::NinePoint => 0.375,
        }
    }
}

fn five_point_row(src: &Field, row: usize, h2: f64, dst: &mut [f64]) {
    let n = src.n();
    let mid = src.row(row);
    let up = src.row(row_above(row, n));
    let down = src.row(row_below(row, n));

    wrapped_pair_sum(mid, dst);
    for (((d, &c), &a), &b) in dst.iter_mut().zip(mid).zip(up).zip(down) {
        // Pairwise sums keep a constant field's Laplacian exactly zero.
        *d = ((a + b) + *d - 4.0 * c) / h2;
    }
}

fn nine_point_row(src: &Field, row: usize, h2: f64, dst: &mut [f64]) {
    let n = src.n();
    let mid = src.row(row);
    let up = src.row(row_above(row, n));
    let down = src.row(row_below(row, n));

    wrapped_pair_sum(mid, dst);
    for (x, d) in dst.iter_mut().enumerate() {
        // Columns wrap the same way rows do.
        let (west, east) = (row_above(x, n), row_below(x, n));
        let ortho = (up[x] + down[x]) + *d;
        let diag = (up[west] + down[west]) + (up[east] + down[east]);
        *d = (ortho * NINE_POINT_ORTHO + diag * NINE_POINT_DIAG - mid[x] * NINE_POINT_CENTER)
            / h2;
    }
}

impl fmt::Display for Stencil {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FivePoint => write!(f, "5pt"),
            Self::NinePoint => write!(f, "9pt"),
        }
    }
}

impl FromStr for Stencil {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "5pt" | "5" | "lap5" | "five" => Ok(Self::FivePoint),
            "9pt" | "9" | "lap9" | "nine" => Ok(Self::NinePoint),
            other => Err(format!("unknown stencil '{other}', expected 5pt or 9pt")),
        }
    }
}
