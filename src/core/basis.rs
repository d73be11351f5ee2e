// src/core/basis.rs

//! Computational basis kets and the rank-one outer-product terms built from
//! them. These are the leaf values of the operator algebra: every named gate
//! in this crate is assembled as a weighted sum of `|ket⟩⟨bra|` terms.

use super::error::FeynError;
use nalgebra::DVector;
use num_complex::Complex;
use std::fmt;

/// Returns the Hilbert-space dimension `2^num_qubits`, rejecting a zero
/// qubit count and shift overflow in one place.
pub(crate) fn space_dim(num_qubits: u32) -> Result<usize, FeynError> {
    if num_qubits == 0 {
        return Err(FeynError::InvalidQubitCount { num_qubits });
    }
    1usize
        .checked_shl(num_qubits)
        .ok_or(FeynError::InvalidQubitCount { num_qubits })
}

/// A computational basis ket `|k⟩` of an `n`-qubit register.
///
/// Immutable once created. Invariant: `eigen_value < 2^num_qubits`, checked
/// at construction. The `angle` carries no algebraic meaning; it is recorded
/// for the diagram renderer, which may use it to place the basis node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasisKet {
    num_qubits: u32,
    angle: f64,
    eigen_value: usize,
}

impl BasisKet {
    /// Creates a basis ket after validating the eigenvalue against the
    /// register's `2^num_qubits` computational states.
    ///
    /// # Errors
    /// * [`FeynError::InvalidQubitCount`] for `num_qubits == 0` or a qubit
    ///   count whose dimension overflows `usize`.
    /// * [`FeynError::InvalidEigenvalue`] for `eigen_value >= 2^num_qubits`.
    pub fn new(num_qubits: u32, angle: f64, eigen_value: usize) -> Result<Self, FeynError> {
        let dim = space_dim(num_qubits)?;
        if eigen_value >= dim {
            return Err(FeynError::InvalidEigenvalue { eigen_value, num_qubits });
        }
        Ok(Self { num_qubits, angle, eigen_value })
    }

    /// Qubit count of the register this ket lives in.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Renderer-facing placement angle; not used by the algebra.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Index of this ket in the computational basis.
    pub fn eigen_value(&self) -> usize {
        self.eigen_value
    }

    /// Dimension `2^num_qubits` of the ket's Hilbert space.
    pub fn space_dim(&self) -> usize {
        // Validated at construction, cannot overflow here.
        1usize << self.num_qubits
    }

    /// Materializes the ket as a dense column vector: zero everywhere except
    /// a `1+0i` at `eigen_value`.
    pub fn column_vector(&self) -> DVector<Complex<f64>> {
        let mut column = DVector::zeros(self.space_dim());
        column[self.eigen_value] = Complex::new(1.0, 0.0);
        column
    }

    /// Records the rank-one term `|self⟩⟨bra|`. Pure data; no matrix is
    /// computed until the descriptor is consumed by
    /// [`Operator::add_term`](crate::operators::Operator::add_term).
    pub fn outer(&self, bra: &BasisKet) -> OuterProduct {
        OuterProduct { ket: *self, bra: *bra }
    }
}

impl fmt::Display for BasisKet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}⟩({}q)", self.eigen_value, self.num_qubits)
    }
}

/// Descriptor of the rank-one projector term `|ket⟩⟨bra|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterProduct {
    ket: BasisKet,
    bra: BasisKet,
}

impl OuterProduct {
    /// The column side of the term.
    pub fn ket(&self) -> &BasisKet {
        &self.ket
    }

    /// The row side of the term.
    pub fn bra(&self) -> &BasisKet {
        &self.bra
    }
}

impl fmt::Display for OuterProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}⟩⟨{}|", self.ket.eigen_value, self.bra.eigen_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eigenvalue_bound_is_full_basis() {
        // A 2-qubit register addresses 4 states, not 2.
        assert!(BasisKet::new(2, 0.0, 3).is_ok());
        assert_eq!(
            BasisKet::new(2, 0.0, 4),
            Err(FeynError::InvalidEigenvalue { eigen_value: 4, num_qubits: 2 })
        );
    }

    #[test]
    fn zero_qubits_rejected() {
        assert_eq!(
            BasisKet::new(0, 0.0, 0),
            Err(FeynError::InvalidQubitCount { num_qubits: 0 })
        );
    }

    #[test]
    fn column_vector_is_one_hot() {
        let ket = BasisKet::new(2, 0.0, 2).unwrap();
        let column = ket.column_vector();
        assert_eq!(column.len(), 4);
        for (i, amp) in column.iter().enumerate() {
            let expected = if i == 2 { 1.0 } else { 0.0 };
            assert_eq!(*amp, Complex::new(expected, 0.0));
        }
    }
}
