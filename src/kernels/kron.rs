// src/kernels/kron.rs

//! Blocked recursive Kronecker (tensor) product.
//!
//! Composes a multi-qubit register operator from smaller per-qubit
//! operators: for `A` of shape `m×n` and `B` of shape `p×q`, each scalar
//! `A[i][j]` contributes the scaled block `A[i][j]·B` at destination offset
//! `(i·p, j·q)`.

use nalgebra::DMatrix;
use num_complex::Complex;
use num_traits::Zero;
use std::ops::Range;

use crate::core::FeynError;

/// Computes `C := A ⊗ B` into the caller-allocated destination `C`.
///
/// `C` must be pre-allocated with shape `(m·p, n·q)`; the kernel zeroes it
/// once at the top level, then recurses, so the base case can accumulate.
///
/// # Errors
/// [`FeynError::ConformalityError`] reporting the expected vs. actual shape
/// when the destination is not conformal.
pub fn kron_into(
    a: &DMatrix<Complex<f64>>,
    b: &DMatrix<Complex<f64>>,
    c: &mut DMatrix<Complex<f64>>,
) -> Result<(), FeynError> {
    let (m, n) = a.shape();
    let (p, q) = b.shape();
    let expected = (m * p, n * q);
    if c.shape() != expected {
        return Err(FeynError::ConformalityError { expected, found: c.shape() });
    }
    c.fill(Complex::zero());
    kron_block(a, b, c, 0..m, 0..n);
    Ok(())
}

/// Allocating convenience wrapper around [`kron_into`].
pub fn kron(a: &DMatrix<Complex<f64>>, b: &DMatrix<Complex<f64>>) -> DMatrix<Complex<f64>> {
    let (m, n) = a.shape();
    let (p, q) = b.shape();
    let mut c = DMatrix::zeros(m * p, n * q);
    // Freshly zeroed and conformal by construction.
    kron_block(a, b, &mut c, 0..m, 0..n);
    c
}

/// Recursive quadrant sweep over a half-open row/column range of `A`.
///
/// Sub-calls write disjoint regions of `C`, so the four recursions are
/// independent and may later run block-parallel. The base case accumulates
/// (`C_block += α·B`) rather than overwriting; the destination block is
/// zeroed before the top-level call.
fn kron_block(
    a: &DMatrix<Complex<f64>>,
    b: &DMatrix<Complex<f64>>,
    c: &mut DMatrix<Complex<f64>>,
    rows: Range<usize>,
    cols: Range<usize>,
) {
    if rows.is_empty() || cols.is_empty() {
        return;
    }
    if rows.len() == 1 && cols.len() == 1 {
        let alpha = a[(rows.start, cols.start)];
        let (p, q) = b.shape();
        let (row0, col0) = (rows.start * p, cols.start * q);
        for j in 0..q {
            for i in 0..p {
                c[(row0 + i, col0 + j)] += alpha * b[(i, j)];
            }
        }
        return;
    }

    let row_mid = rows.start + rows.len().div_ceil(2);
    let col_mid = cols.start + cols.len().div_ceil(2);
    kron_block(a, b, c, rows.start..row_mid, cols.start..col_mid);
    kron_block(a, b, c, rows.start..row_mid, col_mid..cols.end);
    kron_block(a, b, c, row_mid..rows.end, cols.start..col_mid);
    kron_block(a, b, c, row_mid..rows.end, col_mid..cols.end);
}
