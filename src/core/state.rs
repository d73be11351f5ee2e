// src/core/state.rs

use nalgebra::DVector;
use num_complex::Complex;
use std::fmt;

use super::basis;
use super::error::FeynError;

/// The state vector of the simulated register: probability amplitudes over
/// the `2^num_qubits` computational basis states.
///
/// Owned exclusively by the [`Simulation`](crate::Simulation) context and
/// mutated in place by each evolution step. `sum(|c_i|^2)` stays 1 as long
/// as only unitary operators are staged; the crate does not enforce this —
/// see [`check_normalization`](crate::validation::check_normalization).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: u32,
    amplitudes: DVector<Complex<f64>>,
}

impl StateVector {
    /// Creates the state `|initial_state⟩`: amplitude `1+0i` at that basis
    /// index, zero elsewhere.
    pub(crate) fn basis(num_qubits: u32, initial_state: usize) -> Result<Self, FeynError> {
        let dim = basis::space_dim(num_qubits)?;
        if initial_state >= dim {
            return Err(FeynError::InvalidInitialState { index: initial_state, dim });
        }
        let mut amplitudes = DVector::zeros(dim);
        amplitudes[initial_state] = Complex::new(1.0, 0.0);
        Ok(Self { num_qubits, amplitudes })
    }

    /// Read-only access to the amplitude vector.
    pub fn vector(&self) -> &DVector<Complex<f64>> {
        &self.amplitudes
    }

    /// Mutable access for the evolution engine.
    pub(crate) fn vector_mut(&mut self) -> &mut DVector<Complex<f64>> {
        &mut self.amplitudes
    }

    /// Number of basis states represented (`2^num_qubits`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Qubit count of the register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Derives the per-basis-state probabilities `|c_i|^2`.
    ///
    /// # Errors
    /// [`FeynError::ProbabilityOutOfRange`] if any squared magnitude exceeds
    /// 1 beyond floating-point slack, which signals a non-unitary operator
    /// somewhere in the applied stage.
    pub fn probabilities(&self) -> Result<Vec<f64>, FeynError> {
        self.amplitudes
            .iter()
            .map(|amp| crate::kernels::probability(*amp))
            .collect()
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, amp)?;
        }
        write!(f, "]")
    }
}
