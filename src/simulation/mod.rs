// src/simulation/mod.rs

//! The simulation context: owns the state vector, the operator arena and
//! the stage, and runs the sequential evolution engine.
//!
//! The context replaces the process-wide staging global of older designs
//! with an explicit object. Operators live in an arena addressed by
//! [`OperatorId`] handles; the stage records handles, never pointers, so a
//! value going out of scope cannot dangle.
//!
//! Lifecycle: [`Simulation::new`] puts the context in the Ready state;
//! [`finalize`](Simulation::finalize) releases every operator, drops the
//! state buffer and returns to Uninitialized, after which every operation
//! fails with [`FeynError::ContextNotInitialized`] until
//! [`reinitialize`](Simulation::reinitialize).

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

use crate::core::{FeynError, OperatorId, StateVector};
use crate::kernels::{kron_into, transition_amplitudes};
use crate::operators::{Operator, gates};
use crate::render::{EvolutionStep, StepObserver};
use crate::stage::Stage;

/// Simulation context over an `n`-qubit register.
pub struct Simulation {
    num_qubits: u32,
    state: Option<StateVector>,
    operators: Vec<Operator>,
    stage: Stage,
}

impl Simulation {
    /// Creates a Ready context with the state `|initial_state⟩`.
    ///
    /// # Errors
    /// [`FeynError::InvalidQubitCount`] for a zero or overflowing qubit
    /// count; [`FeynError::InvalidInitialState`] if the index does not
    /// address one of the `2^num_qubits` basis states.
    pub fn new(num_qubits: u32, initial_state: usize) -> Result<Self, FeynError> {
        let state = StateVector::basis(num_qubits, initial_state)?;
        Ok(Self {
            num_qubits,
            state: Some(state),
            operators: Vec::new(),
            stage: Stage::new(),
        })
    }

    /// Returns the context to Ready after a [`finalize`](Self::finalize),
    /// with a fresh register, empty arena and empty stage.
    pub fn reinitialize(&mut self, num_qubits: u32, initial_state: usize) -> Result<(), FeynError> {
        *self = Self::new(num_qubits, initial_state)?;
        Ok(())
    }

    /// Whether the context is in the Ready state.
    pub fn is_initialized(&self) -> bool {
        self.state.is_some()
    }

    fn ensure_ready(&self) -> Result<(), FeynError> {
        if self.state.is_some() {
            Ok(())
        } else {
            Err(FeynError::ContextNotInitialized)
        }
    }

    /// Qubit count of the register.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Read-only view of the current state vector.
    ///
    /// # Errors
    /// [`FeynError::ContextNotInitialized`] after finalize.
    pub fn state(&self) -> Result<&StateVector, FeynError> {
        self.state.as_ref().ok_or(FeynError::ContextNotInitialized)
    }

    /// The staged application sequence.
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    // --- operator arena -------------------------------------------------

    /// Allocates a zeroed operator in the arena and returns its handle.
    ///
    /// # Errors
    /// [`FeynError::ContextNotInitialized`] outside Ready;
    /// [`FeynError::NameTooLong`] and [`FeynError::InvalidQubitCount`] per
    /// [`Operator`] construction.
    pub fn create_operator(&mut self, name: &str, num_qubits: u32) -> Result<OperatorId, FeynError> {
        self.ensure_ready()?;
        let operator = Operator::new(name, num_qubits)?;
        Ok(self.insert(operator))
    }

    fn insert(&mut self, operator: Operator) -> OperatorId {
        let id = OperatorId(self.operators.len() as u64);
        self.operators.push(operator);
        id
    }

    fn resolve(&self, id: OperatorId) -> Result<&Operator, FeynError> {
        self.operators
            .get(id.0 as usize)
            .ok_or(FeynError::UnknownOperator { id })
    }

    /// Resolves a handle to its operator.
    pub fn operator(&self, id: OperatorId) -> Result<&Operator, FeynError> {
        self.ensure_ready()?;
        self.resolve(id)
    }

    /// Resolves a handle to its operator, mutably — for populating terms via
    /// [`Operator::add_term`].
    pub fn operator_mut(&mut self, id: OperatorId) -> Result<&mut Operator, FeynError> {
        self.ensure_ready()?;
        self.operators
            .get_mut(id.0 as usize)
            .ok_or(FeynError::UnknownOperator { id })
    }

    /// Releases an operator's matrix storage. Idempotent; the handle stays
    /// valid (and resolvable) but the operator is no longer appendable or
    /// applicable.
    pub fn release_operator(&mut self, id: OperatorId) -> Result<(), FeynError> {
        self.operator_mut(id)?.release();
        Ok(())
    }

    // --- named gates ----------------------------------------------------

    fn build_gate(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut Operator) -> Result<(), FeynError>,
    ) -> Result<OperatorId, FeynError> {
        self.ensure_ready()?;
        let mut operator = Operator::new(name, 1)?;
        build(&mut operator)?;
        Ok(self.insert(operator))
    }

    /// Single-qubit identity.
    pub fn identity(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("identity", gates::identity)
    }

    /// Pauli X (NOT).
    pub fn pauli_x(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("not", gates::pauli_x)
    }

    /// Pauli Y.
    pub fn pauli_y(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("pauli-y", gates::pauli_y)
    }

    /// Pauli Z (phase inversion).
    pub fn pauli_z(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("invert", gates::pauli_z)
    }

    /// Hadamard.
    pub fn hadamard(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("hadamard", gates::hadamard)
    }

    /// Phase gate `diag(1, e^(iθ))`.
    pub fn phase(&mut self, theta: f64) -> Result<OperatorId, FeynError> {
        self.build_gate(&format!("phase({:.3})", theta), |op| gates::phase(op, theta))
    }

    /// S gate, `phase(π/2)`.
    pub fn phase_s(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("phase-s", |op| gates::phase(op, std::f64::consts::FRAC_PI_2))
    }

    /// T gate, `phase(π/4)`.
    pub fn phase_t(&mut self) -> Result<OperatorId, FeynError> {
        self.build_gate("phase-t", |op| gates::phase(op, std::f64::consts::FRAC_PI_4))
    }

    // --- composition ----------------------------------------------------

    /// Embeds a single-qubit operator at qubit `target` of the register by
    /// tensoring identities around it: `I ⊗ U ⊗ I` with qubit 0 most
    /// significant. Returns the handle of the new register-wide operator.
    ///
    /// # Errors
    /// [`FeynError::DimensionMismatch`] if the source operator is not
    /// single-qubit or `target` is outside the register;
    /// [`FeynError::UninitializedOperator`] if the source was released.
    pub fn lift(&mut self, id: OperatorId, target: u32) -> Result<OperatorId, FeynError> {
        self.ensure_ready()?;
        let n = self.num_qubits;
        if target >= n {
            return Err(FeynError::DimensionMismatch {
                expected: n as usize,
                found: target as usize,
            });
        }

        let source = self.resolve(id)?;
        if source.num_qubits() != 1 {
            return Err(FeynError::DimensionMismatch { expected: 2, found: source.dim() });
        }
        let u = source.matrix()?;
        let name = format!("{}[q{}]", source.name(), target);

        let left: DMatrix<Complex<f64>> = DMatrix::identity(1 << target, 1 << target);
        let right_dim = 1usize << (n - 1 - target);
        let right: DMatrix<Complex<f64>> = DMatrix::identity(right_dim, right_dim);

        let mut mid = DMatrix::zeros(left.nrows() * u.nrows(), left.ncols() * u.ncols());
        kron_into(&left, u, &mut mid)?;
        let full_dim = 1usize << n;
        let mut full = DMatrix::zeros(full_dim, full_dim);
        kron_into(&mid, &right, &mut full)?;

        let operator = Operator::from_matrix(&name, n, full)?;
        Ok(self.insert(operator))
    }

    // --- stage ----------------------------------------------------------

    /// Appends an operator to the end of the stage. The same handle may be
    /// appended repeatedly; application order is append order.
    ///
    /// # Errors
    /// [`FeynError::UninitializedOperator`] if the operator was released;
    /// [`FeynError::UnknownOperator`] for a stale handle;
    /// [`FeynError::ContextNotInitialized`] outside Ready.
    pub fn append(&mut self, id: OperatorId) -> Result<(), FeynError> {
        self.ensure_ready()?;
        self.resolve(id)?.matrix()?;
        self.stage.push(id);
        Ok(())
    }

    // --- evolution ------------------------------------------------------

    /// Applies every staged operator to the state, in insertion order, one
    /// matrix-vector product per step.
    pub fn apply_all(&mut self) -> Result<(), FeynError> {
        self.evolve(None)
    }

    /// As [`apply_all`](Self::apply_all), additionally handing the observer
    /// a per-step snapshot — the pre-application state and its
    /// transition-amplitude adjacency — before each mutation.
    pub fn apply_all_observed<O: StepObserver>(&mut self, observer: &mut O) -> Result<(), FeynError> {
        self.evolve(Some(observer as &mut dyn StepObserver))
    }

    fn evolve(&mut self, mut observer: Option<&mut dyn StepObserver>) -> Result<(), FeynError> {
        // Pre-flight before any mutation: every staged operator must resolve,
        // hold a matrix, and be conformal with the state.
        let dim = match &self.state {
            Some(state) => state.dim(),
            None => return Err(FeynError::ContextNotInitialized),
        };
        for id in self.stage.operator_ids() {
            let matrix = self.resolve(*id)?.matrix()?;
            if matrix.nrows() != dim || matrix.ncols() != dim {
                return Err(FeynError::DimensionMismatch { expected: dim, found: matrix.nrows() });
            }
        }

        let mut scratch: DVector<Complex<f64>> = DVector::zeros(dim);
        for (index, id) in self.stage.operator_ids().iter().enumerate() {
            let Some(state) = self.state.as_mut() else {
                return Err(FeynError::ContextNotInitialized);
            };
            let operator = self
                .operators
                .get(id.0 as usize)
                .ok_or(FeynError::UnknownOperator { id: *id })?;
            let matrix = operator.matrix()?;

            if let Some(obs) = observer.as_deref_mut() {
                let amplitudes = transition_amplitudes(matrix, state.vector())?;
                obs.observe(EvolutionStep {
                    index,
                    operator_name: operator.name(),
                    pre_state: &*state,
                    amplitudes: &amplitudes,
                })?;
            }

            // state := matrix × state, through a scratch buffer so the
            // product never aliases its source.
            scratch.gemv(Complex::one(), matrix, state.vector(), Complex::zero());
            state.vector_mut().copy_from(&scratch);
        }
        Ok(())
    }

    /// Finalizes the context: releases every still-initialized operator in
    /// the arena (the authoritative sweep), clears the stage and drops the
    /// state buffer.
    ///
    /// # Errors
    /// [`FeynError::ContextNotInitialized`] on a second finalize without a
    /// [`reinitialize`](Self::reinitialize) in between.
    pub fn finalize(&mut self) -> Result<(), FeynError> {
        self.ensure_ready()?;
        for operator in &mut self.operators {
            operator.release();
        }
        self.operators.clear();
        self.stage.clear();
        self.state = None;
        Ok(())
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "feyn::Simulation[{} qubits, {} staged]",
            self.num_qubits,
            self.stage.len()
        )?;
        for (i, id) in self.stage.iter().enumerate() {
            let name = self
                .operators
                .get(id.0 as usize)
                .map(Operator::name)
                .unwrap_or("<unknown>");
            writeln!(f, "  {}: {}", i, name)?;
        }
        match &self.state {
            Some(state) => write!(f, "  {}", state),
            None => write!(f, "  <finalized>"),
        }
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
