// src/validation/mod.rs

//! Optional validation checks on states and operators.
//!
//! Nothing on the staging or evolution path runs these: the engine applies
//! whatever matrices it is given, including non-unitary ones. Callers that
//! want the physical guard rails invoke them explicitly.

use num_complex::Complex;
use num_traits::Zero;

use crate::core::{FeynError, NORM_TOLERANCE, StateVector, UNITARITY_TOLERANCE};
use crate::operators::Operator;

/// Checks that the state vector is normalized: `sum(|c_i|^2) ≈ 1`.
///
/// # Arguments
/// * `state` - The state to check.
/// * `tolerance` - Allowed deviation from 1.0; defaults to
///   [`NORM_TOLERANCE`].
///
/// # Errors
/// [`FeynError::StateNotNormalized`] reporting the observed norm.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), FeynError> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sqr: f64 = state.vector().iter().map(|amp| amp.norm_sqr()).sum();
    if (norm_sqr - 1.0).abs() > effective_tolerance {
        Err(FeynError::StateNotNormalized { norm_sqr })
    } else {
        Ok(())
    }
}

/// Checks that an operator is unitary: `A†A ≈ I`, entrywise.
///
/// # Arguments
/// * `operator` - The operator to check; must hold matrix storage.
/// * `tolerance` - Allowed entrywise deviation; defaults to
///   [`UNITARITY_TOLERANCE`].
///
/// # Errors
/// [`FeynError::NonUnitaryOperator`] with the largest deviation found;
/// [`FeynError::UninitializedOperator`] if the operator was released.
pub fn check_unitary(operator: &Operator, tolerance: Option<f64>) -> Result<(), FeynError> {
    let effective_tolerance = tolerance.unwrap_or(UNITARITY_TOLERANCE);
    let matrix = operator.matrix()?;
    let gram = matrix.adjoint() * matrix;

    let n = gram.nrows();
    let mut deviation = 0.0_f64;
    for col in 0..n {
        for row in 0..n {
            let expected = if row == col {
                Complex::new(1.0, 0.0)
            } else {
                Complex::zero()
            };
            let delta = (gram[(row, col)] - expected).norm();
            if delta > deviation {
                deviation = delta;
            }
        }
    }

    if deviation > effective_tolerance {
        Err(FeynError::NonUnitaryOperator {
            name: operator.name().to_string(),
            deviation,
        })
    } else {
        Ok(())
    }
}
