// src/kernels/transition.rs

//! Transition-amplitude kernel for path diagrams.
//!
//! For an operator `A` and the state `b` *before* `A` is applied, the
//! adjacency matrix `C` has `C[i][j] = b[i] · A[j][i]`: the amplitude that
//! input basis state `i` contributes toward output basis state `j` in this
//! evolution step. Rows index the input state, columns the output state;
//! the natural per-column computation produces the transpose, so the kernel
//! lays each scaled operator column down as a destination row at write time.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::core::{FeynError, PROBABILITY_SLACK};

/// Computes the `N×N` transition-amplitude matrix for one evolution step
/// from operator `a` and the pre-application state `state`.
///
/// # Errors
/// [`FeynError::DimensionMismatch`] unless `a` is square with side equal to
/// the state length.
pub fn transition_amplitudes(
    a: &DMatrix<Complex<f64>>,
    state: &DVector<Complex<f64>>,
) -> Result<DMatrix<Complex<f64>>, FeynError> {
    if a.nrows() != a.ncols() {
        return Err(FeynError::DimensionMismatch { expected: a.nrows(), found: a.ncols() });
    }
    if a.nrows() != state.len() {
        return Err(FeynError::DimensionMismatch { expected: a.nrows(), found: state.len() });
    }

    let n = state.len();
    let mut adjacency = DMatrix::zeros(n, n);
    for input in 0..n {
        let weight = state[input];
        for output in 0..n {
            adjacency[(input, output)] = weight * a[(output, input)];
        }
    }
    Ok(adjacency)
}

/// Extracts the probability `|amplitude|^2 = re^2 + im^2`.
///
/// A result above 1 (beyond floating-point slack) is a data-integrity
/// failure and is reported, never clamped; overshoot within the slack is
/// truncated to exactly 1.
///
/// # Errors
/// [`FeynError::ProbabilityOutOfRange`] for squared magnitudes above
/// `1 + PROBABILITY_SLACK`.
pub fn probability(amplitude: Complex<f64>) -> Result<f64, FeynError> {
    let value = amplitude.norm_sqr();
    if value > 1.0 + PROBABILITY_SLACK {
        return Err(FeynError::ProbabilityOutOfRange { value });
    }
    Ok(value.min(1.0))
}

/// Derives the real probability-adjacency matrix from an amplitude
/// adjacency matrix, entry by entry.
///
/// # Errors
/// Propagates [`FeynError::ProbabilityOutOfRange`] from the first offending
/// entry.
pub fn transition_probabilities(
    amplitudes: &DMatrix<Complex<f64>>,
) -> Result<DMatrix<f64>, FeynError> {
    let (rows, cols) = amplitudes.shape();
    let mut probs = DMatrix::zeros(rows, cols);
    for col in 0..cols {
        for row in 0..rows {
            probs[(row, col)] = probability(amplitudes[(row, col)])?;
        }
    }
    Ok(probs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex<f64> {
        Complex::new(re, im)
    }

    #[test]
    fn not_gate_routes_all_amplitude() {
        // NOT applied to |0⟩: the sole contribution is input 0 -> output 1.
        let not = DMatrix::from_row_slice(2, 2, &[c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)]);
        let state = DVector::from_vec(vec![c(1.0, 0.0), c(0.0, 0.0)]);
        let adjacency = transition_amplitudes(&not, &state).unwrap();

        assert_eq!(adjacency[(0, 1)], c(1.0, 0.0));
        assert_eq!(adjacency[(0, 0)], c(0.0, 0.0));
        assert_eq!(adjacency[(1, 0)], c(0.0, 0.0));
        assert_eq!(adjacency[(1, 1)], c(0.0, 0.0));
    }

    #[test]
    fn rows_are_input_weighted_columns() {
        let a = DMatrix::from_row_slice(2, 2, &[c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0), c(4.0, 0.0)]);
        let state = DVector::from_vec(vec![c(0.5, 0.0), c(0.0, 0.5)]);
        let adjacency = transition_amplitudes(&a, &state).unwrap();

        // C[i][j] = b[i] * A[j][i]
        for input in 0..2 {
            for output in 0..2 {
                assert_eq!(adjacency[(input, output)], state[input] * a[(output, input)]);
            }
        }
    }

    #[test]
    fn state_length_must_match() {
        let a = DMatrix::<Complex<f64>>::zeros(2, 2);
        let state = DVector::from_vec(vec![c(1.0, 0.0); 4]);
        assert_eq!(
            transition_amplitudes(&a, &state),
            Err(FeynError::DimensionMismatch { expected: 2, found: 4 })
        );
    }

    #[test]
    fn probability_of_unit_amplitudes() {
        assert_eq!(probability(c(1.0, 0.0)).unwrap(), 1.0);
        assert_eq!(probability(c(0.6, 0.8)).unwrap(), 1.0);
        let half = probability(c(std::f64::consts::FRAC_1_SQRT_2, 0.0)).unwrap();
        assert!((half - 0.5).abs() < 1e-12);
    }

    #[test]
    fn overlong_amplitude_rejected() {
        // |1.2 + 0.9i|^2 = 2.25: must surface, not clamp.
        match probability(c(1.2, 0.9)) {
            Err(FeynError::ProbabilityOutOfRange { value }) => {
                assert!((value - 2.25).abs() < 1e-12);
            }
            other => panic!("expected ProbabilityOutOfRange, got {:?}", other),
        }
    }
}
