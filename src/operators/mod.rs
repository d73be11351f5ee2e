// src/operators/mod.rs

//! Operator model: named dense linear maps over the register's Hilbert
//! space, populated by weighted sums of outer-product terms or by Kronecker
//! composition.

pub(crate) mod gates;

use nalgebra::DMatrix;
use num_complex::Complex;
use num_traits::One;
use std::fmt;

use crate::core::basis;
use crate::core::{FeynError, OuterProduct};

/// Longest accepted operator label, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// A named `N×N` complex operator acting on a `2^num_qubits`-dimensional
/// Hilbert space.
///
/// The matrix storage is an `Option`: `None` models the released
/// (uninitialized) lifecycle state, which makes [`release`](Self::release)
/// idempotent and any post-release matrix access a typed error instead of a
/// dangling pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    name: String,
    num_qubits: u32,
    matrix: Option<DMatrix<Complex<f64>>>,
}

impl Operator {
    /// Creates an operator with a zeroed `N×N` matrix, ready to accumulate
    /// outer-product terms.
    ///
    /// # Errors
    /// [`FeynError::NameTooLong`] past [`MAX_NAME_LEN`];
    /// [`FeynError::InvalidQubitCount`] for a zero or overflowing qubit
    /// count.
    pub(crate) fn new(name: &str, num_qubits: u32) -> Result<Self, FeynError> {
        Self::check_name(name)?;
        let dim = basis::space_dim(num_qubits)?;
        Ok(Self {
            name: name.to_string(),
            num_qubits,
            matrix: Some(DMatrix::zeros(dim, dim)),
        })
    }

    /// Wraps a matrix produced by kernel composition (e.g. a lifted gate).
    pub(crate) fn from_matrix(
        name: &str,
        num_qubits: u32,
        matrix: DMatrix<Complex<f64>>,
    ) -> Result<Self, FeynError> {
        Self::check_name(name)?;
        let dim = basis::space_dim(num_qubits)?;
        if matrix.shape() != (dim, dim) {
            return Err(FeynError::ConformalityError {
                expected: (dim, dim),
                found: matrix.shape(),
            });
        }
        Ok(Self { name: name.to_string(), num_qubits, matrix: Some(matrix) })
    }

    fn check_name(name: &str) -> Result<(), FeynError> {
        if name.chars().count() > MAX_NAME_LEN {
            return Err(FeynError::NameTooLong { name: name.to_string(), max: MAX_NAME_LEN });
        }
        Ok(())
    }

    /// Display label of the operator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qubit count the operator acts on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Matrix side length `2^num_qubits`. Remains available after release;
    /// the dimension is metadata, not storage.
    pub fn dim(&self) -> usize {
        1usize << self.num_qubits
    }

    /// Whether the operator currently holds matrix storage.
    pub fn is_initialized(&self) -> bool {
        self.matrix.is_some()
    }

    /// Read access to the matrix.
    ///
    /// # Errors
    /// [`FeynError::UninitializedOperator`] after release.
    pub fn matrix(&self) -> Result<&DMatrix<Complex<f64>>, FeynError> {
        self.matrix
            .as_ref()
            .ok_or_else(|| FeynError::UninitializedOperator { name: self.name.clone() })
    }

    /// Accumulates `coefficient · |ket⟩⟨bra|` into the matrix via a rank-one
    /// update. This is the sole mechanism by which the named gates are
    /// assembled.
    ///
    /// # Errors
    /// [`FeynError::DimensionMismatch`] unless both kets address a space of
    /// this operator's dimension; [`FeynError::UninitializedOperator`] after
    /// release.
    pub fn add_term(
        &mut self,
        coefficient: Complex<f64>,
        term: &OuterProduct,
    ) -> Result<(), FeynError> {
        let dim = self.dim();
        if term.ket().space_dim() != dim {
            return Err(FeynError::DimensionMismatch { expected: dim, found: term.ket().space_dim() });
        }
        if term.bra().space_dim() != dim {
            return Err(FeynError::DimensionMismatch { expected: dim, found: term.bra().space_dim() });
        }

        let ket = term.ket().column_vector();
        let bra = term.bra().column_vector();
        let Some(matrix) = self.matrix.as_mut() else {
            return Err(FeynError::UninitializedOperator { name: self.name.clone() });
        };
        // matrix += coefficient * |ket><bra|; basis vectors are real, so the
        // conjugation inside gerc is a no-op.
        matrix.gerc(coefficient, &ket, &bra, Complex::one());
        Ok(())
    }

    /// Releases the matrix storage. Idempotent: releasing twice, or an
    /// operator that was never populated, is a no-op.
    pub fn release(&mut self) {
        self.matrix = None;
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Operator '{}' ({} qubit)", self.name, self.num_qubits)?;
        match &self.matrix {
            Some(matrix) => write!(f, "{}", matrix),
            None => write!(f, "  <released>"),
        }
    }
}
