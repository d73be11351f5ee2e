// src/operators/gates.rs

//! Named single-qubit gates, each assembled strictly as a weighted sum of
//! rank-one outer-product terms:
//!
//! ```text
//! identity = |0⟩⟨0| + |1⟩⟨1|
//! not      = |0⟩⟨1| + |1⟩⟨0|
//! pauli-y  = -i|0⟩⟨1| + i|1⟩⟨0|
//! invert   = |0⟩⟨0| - |1⟩⟨1|
//! hadamard = (1/√2)(|0⟩⟨0| + |1⟩⟨0| + |0⟩⟨1| - |1⟩⟨1|)
//! phase(θ) = |0⟩⟨0| + e^(iθ)|1⟩⟨1|
//! ```

use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

use super::Operator;
use crate::core::{BasisKet, FeynError};

fn qubit_ket(eigen_value: usize) -> Result<BasisKet, FeynError> {
    BasisKet::new(1, 0.0, eigen_value)
}

const ONE: Complex<f64> = Complex::new(1.0, 0.0);

pub(crate) fn identity(op: &mut Operator) -> Result<(), FeynError> {
    let zero = qubit_ket(0)?;
    let one = qubit_ket(1)?;
    op.add_term(ONE, &zero.outer(&zero))?;
    op.add_term(ONE, &one.outer(&one))
}

pub(crate) fn pauli_x(op: &mut Operator) -> Result<(), FeynError> {
    let zero = qubit_ket(0)?;
    let one = qubit_ket(1)?;
    op.add_term(ONE, &zero.outer(&one))?;
    op.add_term(ONE, &one.outer(&zero))
}

pub(crate) fn pauli_y(op: &mut Operator) -> Result<(), FeynError> {
    let zero = qubit_ket(0)?;
    let one = qubit_ket(1)?;
    op.add_term(Complex::new(0.0, -1.0), &zero.outer(&one))?;
    op.add_term(Complex::new(0.0, 1.0), &one.outer(&zero))
}

pub(crate) fn pauli_z(op: &mut Operator) -> Result<(), FeynError> {
    let zero = qubit_ket(0)?;
    let one = qubit_ket(1)?;
    op.add_term(ONE, &zero.outer(&zero))?;
    op.add_term(Complex::new(-1.0, 0.0), &one.outer(&one))
}

pub(crate) fn hadamard(op: &mut Operator) -> Result<(), FeynError> {
    let zero = qubit_ket(0)?;
    let one = qubit_ket(1)?;
    let scale = Complex::new(FRAC_1_SQRT_2, 0.0);
    op.add_term(scale, &zero.outer(&zero))?;
    op.add_term(scale, &one.outer(&zero))?;
    op.add_term(scale, &zero.outer(&one))?;
    op.add_term(-scale, &one.outer(&one))
}

pub(crate) fn phase(op: &mut Operator, theta: f64) -> Result<(), FeynError> {
    let zero = qubit_ket(0)?;
    let one = qubit_ket(1)?;
    op.add_term(ONE, &zero.outer(&zero))?;
    op.add_term(Complex::from_polar(1.0, theta), &one.outer(&one))
}
