//! Error handling logic

use std::fmt;

/// Stable handle to an operator held in a [`Simulation`](crate::Simulation)
/// arena. Handles stay valid until the context is finalized or
/// re-initialized; a stale handle surfaces as [`FeynError::UnknownOperator`]
/// rather than a dangling pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(pub u64);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Op({})", self.0)
    }
}

/// Failures raised by the simulation core.
///
/// Every variant is a deterministic precondition violation local to the call
/// that triggered it. Errors are checked before any state mutation, so a
/// failed call never corrupts already-applied evolution steps.
#[derive(Debug, Clone, PartialEq)]
pub enum FeynError {
    /// Operation attempted before context creation or after `finalize`.
    ContextNotInitialized,

    /// An operator's matrix was accessed after release (or was never populated).
    UninitializedOperator {
        /// Name of the offending operator
        name: String,
    },

    /// An operator handle does not resolve in the current context.
    UnknownOperator {
        /// The stale or foreign handle
        id: OperatorId,
    },

    /// Operand dimensions are incompatible for an outer-product term or a
    /// matrix-vector product.
    DimensionMismatch {
        /// Dimension required by the left operand
        expected: usize,
        /// Dimension actually supplied
        found: usize,
    },

    /// A Kronecker destination was not pre-allocated conformally.
    ConformalityError {
        /// Required destination shape (rows, cols)
        expected: (usize, usize),
        /// Actual destination shape (rows, cols)
        found: (usize, usize),
    },

    /// A basis index does not address one of the `2^num_qubits` computational states.
    InvalidEigenvalue {
        /// The out-of-range index
        eigen_value: usize,
        /// Qubit count of the register
        num_qubits: u32,
    },

    /// A qubit count of zero, or one whose `2^n` dimension overflows `usize`.
    InvalidQubitCount {
        /// The rejected qubit count
        num_qubits: u32,
    },

    /// An initial basis index out of range for the requested dimension.
    InvalidInitialState {
        /// The out-of-range index
        index: usize,
        /// State-vector length `2^num_qubits`
        dim: usize,
    },

    /// An operator label longer than the supported bound.
    NameTooLong {
        /// The rejected label
        name: String,
        /// Maximum accepted length in characters
        max: usize,
    },

    /// A derived probability landed outside `[0, 1]`, indicating a
    /// non-unitary operator or a computation bug upstream.
    ProbabilityOutOfRange {
        /// The offending squared magnitude
        value: f64,
    },

    /// State vector norm deviated from 1 beyond tolerance.
    StateNotNormalized {
        /// Observed `sum(|c_i|^2)`
        norm_sqr: f64,
    },

    /// `A†A` deviated from the identity beyond tolerance.
    NonUnitaryOperator {
        /// Name of the offending operator
        name: String,
        /// Largest entrywise deviation of `A†A` from `I`
        deviation: f64,
    },
}

impl fmt::Display for FeynError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeynError::ContextNotInitialized => {
                write!(f, "Context Not Initialized: simulation context is absent or finalized")
            }
            FeynError::UninitializedOperator { name } => {
                write!(f, "Uninitialized Operator: '{}' has no matrix storage", name)
            }
            FeynError::UnknownOperator { id } => {
                write!(f, "Unknown Operator: handle {} does not resolve in this context", id)
            }
            FeynError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension Mismatch: expected {}, found {}", expected, found)
            }
            FeynError::ConformalityError { expected, found } => write!(
                f,
                "Conformality Error: destination must be {}x{}, found {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
            FeynError::InvalidEigenvalue { eigen_value, num_qubits } => write!(
                f,
                "Invalid Eigenvalue: {} does not address a basis state of a {}-qubit register",
                eigen_value, num_qubits
            ),
            FeynError::InvalidQubitCount { num_qubits } => {
                write!(f, "Invalid Qubit Count: {}", num_qubits)
            }
            FeynError::InvalidInitialState { index, dim } => write!(
                f,
                "Invalid Initial State: index {} out of range for dimension {}",
                index, dim
            ),
            FeynError::NameTooLong { name, max } => {
                write!(f, "Name Too Long: '{}' exceeds {} characters", name, max)
            }
            FeynError::ProbabilityOutOfRange { value } => {
                write!(f, "Probability Out Of Range: {}", value)
            }
            FeynError::StateNotNormalized { norm_sqr } => {
                write!(f, "State Not Normalized: sum(|c_i|^2) = {}", norm_sqr)
            }
            FeynError::NonUnitaryOperator { name, deviation } => write!(
                f,
                "Non-Unitary Operator: '{}' deviates from unitarity by {:.3e}",
                name, deviation
            ),
        }
    }
}

impl std::error::Error for FeynError {}
