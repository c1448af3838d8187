//! Test utilities and mock collaborators for Gray-Scott development.
//!
//! Provides scripted implementations of the two collaborator traits
//! ([`RandomSource`](grayscott_core::RandomSource) and
//! [`OutputSink`](grayscott_core::OutputSink)) plus field assertions shared by
//! unit and integration tests across the workspace.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{ConstRandom, FailingSink, RecordingSink, SequenceRandom};

use grayscott_core::Field;

/// Assert that two fields agree cell by cell within `tol`.
///
/// Reports the first offending cell as `(row, col)`.
pub fn assert_fields_close(actual: &Field, expected: &Field, tol: f64) {
    assert_eq!(actual.n(), expected.n(), "field side lengths differ");
    let n = actual.n();
    for (i, (a, e)) in actual
        .as_slice()
        .iter()
        .zip(expected.as_slice())
        .enumerate()
    {
        assert!(
            (a - e).abs() <= tol,
            "cell ({}, {}) differs: got {a}, expected {e} (tol {tol})",
            i / n,
            i % n
        );
    }
}

/// Assert that every cell of `field` equals `value` exactly.
pub fn assert_uniform(field: &Field, value: f64) {
    let n = field.n();
    for (i, &x) in field.as_slice().iter().enumerate() {
        assert!(
            x == value,
            "cell ({}, {}) is {x}, expected exactly {value}",
            i / n,
            i % n
        );
    }
}
