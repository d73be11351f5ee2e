// src/render/mod.rs

//! Renderer interface boundary.
//!
//! The diagram renderer is an external collaborator: per evolution step it
//! receives a read-only snapshot — the pre-application state, the
//! transition-amplitude adjacency matrix derived from it, the operator's
//! display name, and the step index — and produces whatever artifact it
//! likes. The core depends on no visual library type.

use nalgebra::{DMatrix, DVector};
use num_complex::Complex;

use crate::core::{FeynError, StateVector};
use crate::kernels::transition_probabilities;

/// Read-only snapshot of one evolution step, borrowed from the engine for
/// the duration of the observer call.
#[derive(Debug, Clone, Copy)]
pub struct EvolutionStep<'a> {
    /// Zero-based position in the stage.
    pub index: usize,
    /// Display name of the operator applied at this step.
    pub operator_name: &'a str,
    /// State *before* the operator is applied.
    pub pre_state: &'a StateVector,
    /// Transition-amplitude adjacency computed from `pre_state`: entry
    /// `(i, j)` is the amplitude input basis state `i` contributes toward
    /// output basis state `j`.
    pub amplitudes: &'a DMatrix<Complex<f64>>,
}

impl EvolutionStep<'_> {
    /// Derives the real probability-adjacency matrix for this step.
    ///
    /// # Errors
    /// Propagates [`FeynError::ProbabilityOutOfRange`] for entries whose
    /// squared magnitude exceeds 1.
    pub fn probabilities(&self) -> Result<DMatrix<f64>, FeynError> {
        transition_probabilities(self.amplitudes)
    }
}

/// Consumer of per-step snapshots during
/// [`apply_all_observed`](crate::Simulation::apply_all_observed).
pub trait StepObserver {
    /// Called once per evolution step, before the step's state mutation.
    /// Returning an error aborts evolution with the state as it was before
    /// this step.
    fn observe(&mut self, step: EvolutionStep<'_>) -> Result<(), FeynError>;
}

/// Owned per-step record for consumers that outlive the borrowed snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStep {
    /// Zero-based position in the stage.
    pub index: usize,
    /// Display name of the operator applied at this step.
    pub operator_name: String,
    /// Amplitudes before the operator was applied.
    pub pre_state: DVector<Complex<f64>>,
    /// Transition-amplitude adjacency for the step.
    pub amplitudes: DMatrix<Complex<f64>>,
}

/// A recording observer: keeps an owned snapshot of every step, standing in
/// for the diagram renderer in tests and offline consumers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded steps, in application order.
    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl StepObserver for Trace {
    fn observe(&mut self, step: EvolutionStep<'_>) -> Result<(), FeynError> {
        self.steps.push(TraceStep {
            index: step.index,
            operator_name: step.operator_name.to_string(),
            pre_state: step.pre_state.vector().clone(),
            amplitudes: step.amplitudes.clone(),
        });
        Ok(())
    }
}
