// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod basis;
pub mod error;
pub mod state;

// Re-export public types for convenient access via `feyn::core::TypeName`
pub use basis::{BasisKet, OuterProduct};
pub use error::{FeynError, OperatorId};
pub use state::StateVector;

pub mod constants;
pub use constants::feyn_constants::{NORM_TOLERANCE, PROBABILITY_SLACK, UNITARITY_TOLERANCE}; // Re-export
