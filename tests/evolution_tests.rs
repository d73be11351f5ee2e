// tests/evolution_tests.rs

// Import necessary types from the feyn crate
use feyn::{FeynError, Simulation, Trace, check_normalization};
use num_complex::Complex;

const TEST_TOLERANCE: f64 = 1e-9;

// Helper function to build a complex number tersely
fn c(re: f64, im: f64) -> Complex<f64> {
    Complex::new(re, im)
}

// Helper function to compare a state vector against expected amplitudes
fn check_state(sim: &Simulation, expected: &[Complex<f64>], context: &str) {
    let actual = sim.state().expect("context should be initialized");
    assert_eq!(actual.dim(), expected.len(), "Dimension mismatch - {}", context);
    for (i, (a, e)) in actual.vector().iter().zip(expected.iter()).enumerate() {
        let dist_sqr = (a - e).norm_sqr();
        assert!(
            dist_sqr < TEST_TOLERANCE * TEST_TOLERANCE,
            "Amplitude mismatch at index {} - Actual: {}, Expected: {}, Context: {}",
            i,
            a,
            e,
            context
        );
    }
}

#[test]
fn test_initial_state_is_one_hot() -> Result<(), FeynError> {
    for num_qubits in 1..=4u32 {
        let dim = 1usize << num_qubits;
        for initial in [0, dim / 2, dim - 1] {
            let sim = Simulation::new(num_qubits, initial)?;
            let state = sim.state()?;
            assert_eq!(state.dim(), dim);
            for (i, amp) in state.vector().iter().enumerate() {
                let expected = if i == initial { 1.0 } else { 0.0 };
                assert_eq!(*amp, c(expected, 0.0), "qubits={} initial={}", num_qubits, initial);
            }
        }
    }
    Ok(())
}

#[test]
fn test_initial_state_out_of_range() {
    assert_eq!(
        Simulation::new(2, 4).unwrap_err(),
        FeynError::InvalidInitialState { index: 4, dim: 4 }
    );
    assert_eq!(
        Simulation::new(0, 0).unwrap_err(),
        FeynError::InvalidQubitCount { num_qubits: 0 }
    );
}

#[test]
fn test_identity_preserves_state() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 1)?;
    let id = sim.identity()?;
    sim.append(id)?;
    sim.apply_all()?;
    check_state(&sim, &[c(0.0, 0.0), c(1.0, 0.0)], "identity on |1>");
    Ok(())
}

#[test]
fn test_not_flips_basis_state() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    sim.append(not)?;
    sim.apply_all()?;
    check_state(&sim, &[c(0.0, 0.0), c(1.0, 0.0)], "NOT on |0>");
    Ok(())
}

#[test]
fn test_not_twice_is_involution() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    sim.append(not)?;
    sim.append(not)?;
    sim.apply_all()?;
    check_state(&sim, &[c(1.0, 0.0), c(0.0, 0.0)], "NOT twice round trip");
    Ok(())
}

#[test]
fn test_hadamard_amplitudes_and_probabilities() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let h = sim.hadamard()?;
    sim.append(h)?;
    sim.apply_all()?;

    let s = std::f64::consts::FRAC_1_SQRT_2;
    check_state(&sim, &[c(s, 0.0), c(s, 0.0)], "Hadamard on |0>");

    let probabilities = sim.state()?.probabilities()?;
    assert!((probabilities[0] - 0.5).abs() < TEST_TOLERANCE);
    assert!((probabilities[1] - 0.5).abs() < TEST_TOLERANCE);
    check_normalization(sim.state()?, None)?;
    Ok(())
}

#[test]
fn test_phase_gate_leaves_probabilities() -> Result<(), FeynError> {
    // phase(pi/2) on an equal superposition rotates |1>'s amplitude onto the
    // imaginary axis without moving probability mass.
    let mut sim = Simulation::new(1, 0)?;
    let h = sim.hadamard()?;
    let s_gate = sim.phase_s()?;
    sim.append(h)?;
    sim.append(s_gate)?;
    sim.apply_all()?;

    let s = std::f64::consts::FRAC_1_SQRT_2;
    check_state(&sim, &[c(s, 0.0), c(0.0, s)], "S after Hadamard");
    let probabilities = sim.state()?.probabilities()?;
    assert!((probabilities[0] - 0.5).abs() < TEST_TOLERANCE);
    assert!((probabilities[1] - 0.5).abs() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_append_released_operator_fails() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    sim.release_operator(not)?;

    assert_eq!(
        sim.append(not).unwrap_err(),
        FeynError::UninitializedOperator { name: "not".to_string() }
    );
    assert!(sim.stage().is_empty(), "failed append must not stage anything");
    Ok(())
}

#[test]
fn test_append_preserves_insertion_order() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    let y = sim.pauli_y()?;
    let id = sim.identity()?;

    sim.append(not)?;
    sim.append(y)?;
    sim.append(id)?;
    sim.append(not)?; // repeats are allowed

    assert_eq!(sim.stage().len(), 4);
    assert_eq!(sim.stage().operator_ids(), &[not, y, id, not]);

    let names: Vec<&str> = sim
        .stage()
        .iter()
        .map(|id| sim.operator(*id).map(|op| op.name()))
        .collect::<Result<_, _>>()?;
    assert_eq!(names, ["not", "pauli-y", "identity", "not"]);
    Ok(())
}

#[test]
fn test_end_to_end_hadamard_round_trip() -> Result<(), FeynError> {
    // Stage = [Identity, Hadamard, Hadamard]; Hadamard is self-inverse, so
    // the final state equals the initial state.
    let mut sim = Simulation::new(1, 0)?;
    let id = sim.identity()?;
    let h = sim.hadamard()?;
    sim.append(id)?;
    sim.append(h)?;
    sim.append(h)?;

    let mut trace = Trace::new();
    sim.apply_all_observed(&mut trace)?;

    check_state(&sim, &[c(1.0, 0.0), c(0.0, 0.0)], "H-H round trip");

    // The trace mirrors the stage, step by step.
    assert_eq!(trace.len(), 3);
    let names: Vec<&str> = trace.steps().iter().map(|s| s.operator_name.as_str()).collect();
    assert_eq!(names, ["identity", "hadamard", "hadamard"]);

    // Every per-step adjacency derives to valid probabilities.
    for step in trace.steps() {
        let probabilities = feyn::transition_probabilities(&step.amplitudes)?;
        for p in probabilities.iter() {
            assert!((0.0..=1.0).contains(p), "probability {} out of range", p);
        }
    }

    // Step 2 saw the post-Hadamard superposition as its input.
    let s = std::f64::consts::FRAC_1_SQRT_2;
    assert!((trace.steps()[2].pre_state[0] - c(s, 0.0)).norm() < TEST_TOLERANCE);
    assert!((trace.steps()[2].pre_state[1] - c(s, 0.0)).norm() < TEST_TOLERANCE);
    Ok(())
}

#[test]
fn test_operations_require_ready_context() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    sim.finalize()?;

    assert_eq!(sim.create_operator("late", 1).unwrap_err(), FeynError::ContextNotInitialized);
    assert_eq!(sim.hadamard().unwrap_err(), FeynError::ContextNotInitialized);
    assert_eq!(sim.append(not).unwrap_err(), FeynError::ContextNotInitialized);
    assert_eq!(sim.apply_all().unwrap_err(), FeynError::ContextNotInitialized);
    assert_eq!(sim.state().unwrap_err(), FeynError::ContextNotInitialized);
    assert_eq!(sim.finalize().unwrap_err(), FeynError::ContextNotInitialized);
    Ok(())
}

#[test]
fn test_release_is_idempotent_through_context() -> Result<(), FeynError> {
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    sim.release_operator(not)?;
    sim.release_operator(not)?; // second release is a safe no-op
    assert!(!sim.operator(not)?.is_initialized());
    Ok(())
}

#[test]
fn test_evolution_applies_in_append_order() -> Result<(), FeynError> {
    // X then S is not S then X; verify the staged order is the one applied.
    // S·X|0> = S|1> = i|1>, whereas X·S|0> = X|0> = |1>.
    let mut sim = Simulation::new(1, 0)?;
    let not = sim.pauli_x()?;
    let s_gate = sim.phase_s()?;
    sim.append(not)?;
    sim.append(s_gate)?;
    sim.apply_all()?;
    check_state(&sim, &[c(0.0, 0.0), c(0.0, 1.0)], "X before S");
    Ok(())
}
