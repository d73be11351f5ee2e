// src/lib.rs

//! `feyn` - staged quantum state evolution for path diagrams
//!
//! This library simulates the evolution of a discrete quantum state under an
//! ordered sequence ("stage") of linear operators and derives, for every
//! evolution step, the transition-amplitude flow between computational basis
//! states — the data a path-diagram renderer needs.

pub mod core;
pub mod kernels;
pub mod operators;
pub mod render;
pub mod simulation;
pub mod stage;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{BasisKet, FeynError, OperatorId, OuterProduct, StateVector};
pub use kernels::{kron, kron_into, probability, transition_amplitudes, transition_probabilities};
pub use operators::Operator;
pub use render::{EvolutionStep, StepObserver, Trace, TraceStep};
pub use simulation::Simulation;
pub use stage::Stage;
pub use validation::{check_normalization, check_unitary};

// Example 1: Hadamard round trip
// Hadamard is self-inverse, so staging it twice returns the register to its
// initial basis state.
/// ```
/// use feyn::{FeynError, Simulation};
///
/// fn main() -> Result<(), FeynError> {
///     let mut sim = Simulation::new(1, 0)?;
///
///     let h = sim.hadamard()?;
///     sim.append(h)?;
///     sim.append(h)?;
///     sim.apply_all()?;
///
///     let state = sim.state()?;
///     assert!((state.vector()[0].re - 1.0).abs() < 1e-9);
///     assert!(state.vector()[1].norm_sqr() < 1e-12);
///
///     sim.finalize()?;
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Tracing the amplitude flow of a NOT gate
// The observer receives, per step, the pre-application state and the
// transition-amplitude adjacency matrix a renderer would draw.
/// ```
/// use feyn::{FeynError, Simulation, Trace};
///
/// fn main() -> Result<(), FeynError> {
///     let mut sim = Simulation::new(1, 0)?;
///     let not = sim.pauli_x()?;
///     sim.append(not)?;
///
///     let mut trace = Trace::new();
///     sim.apply_all_observed(&mut trace)?;
///
///     let step = &trace.steps()[0];
///     assert_eq!(step.operator_name, "not");
///     // The whole amplitude flows from input state 0 to output state 1.
///     assert_eq!(step.amplitudes[(0, 1)].re, 1.0);
///     let probabilities = feyn::transition_probabilities(&step.amplitudes)?;
///     assert_eq!(probabilities[(0, 1)], 1.0);
///
///     // The state itself has moved on to |1>.
///     assert_eq!(sim.state()?.vector()[1].re, 1.0);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
