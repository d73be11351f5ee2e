//! Numeric tolerances shared across the simulation core.

/// Tolerance constants used by the kernels and validation checks
pub mod feyn_constants {
    /// Default allowed deviation of `sum(|c_i|^2)` from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Floating-point slack above 1.0 before a squared magnitude is rejected
    /// as an out-of-range probability.
    pub const PROBABILITY_SLACK: f64 = 1e-9;
    /// Default entrywise tolerance for the `A†A = I` unitarity check.
    pub const UNITARITY_TOLERANCE: f64 = 1e-9;
}
