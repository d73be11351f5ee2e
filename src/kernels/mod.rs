// src/kernels/mod.rs

//! Dense numeric kernels: the Kronecker composition of register operators
//! and the per-step transition-amplitude derivation. Both operate on the
//! backend's matrix types directly and carry no simulation lifecycle state.

pub mod kron;
pub mod transition;

pub use kron::{kron, kron_into};
pub use transition::{probability, transition_amplitudes, transition_probabilities};
