//! Integration tests for the block-diagonal metric tensor.

use qvar_adapter_sim::DefaultQubit;
use qvar_ir::{Hamiltonian, Observable, QuantumTape};
use qvar_vqe::{AnsatzError, ExpvalCost, VqeError};

fn z0() -> Hamiltonian {
    Hamiltonian::term(1.0, Observable::pauli_z(0))
}

fn rx_then_ry(params: &[f64], tape: &mut QuantumTape) -> Result<(), AnsatzError> {
    tape.rx(params[0], 0)?.ry(params[1], 0)?;
    Ok(())
}

fn bell_then_ry(params: &[f64], tape: &mut QuantumTape) -> Result<(), AnsatzError> {
    tape.h(0)?.cnot(0, 1)?;
    tape.ry(params[0], 0)?.ry(params[1], 1)?;
    Ok(())
}

fn shared_rx(params: &[f64], tape: &mut QuantumTape) -> Result<(), AnsatzError> {
    tape.rx(params[0], 0)?.rx(params[0], 1)?;
    Ok(())
}

fn doubled_ry(params: &[f64], tape: &mut QuantumTape) -> Result<(), AnsatzError> {
    tape.ry(2.0 * params[0], 0)?;
    Ok(())
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-8,
        "expected {expected}, got {actual}"
    );
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[test]
fn sequential_rotations_form_separate_blocks() {
    let dev = DefaultQubit::with_num_wires(1).unwrap();
    let cost = ExpvalCost::new(rx_then_ry, z0(), &dev);
    let p0 = 0.7;
    let g = cost.metric_tensor(&[p0, -0.3], false).unwrap();

    assert_eq!(g.dim(), (2, 2));
    assert_close(g[[0, 0]], 0.25);
    assert_close(g[[1, 1]], p0.cos().powi(2) / 4.0);
    assert_close(g[[0, 1]], 0.0);
    assert_close(g[[1, 0]], 0.0);
}

#[test]
fn entangled_layer_has_off_diagonal_terms() {
    let dev = DefaultQubit::with_num_wires(2).unwrap();
    let cost = ExpvalCost::new(bell_then_ry, z0(), &dev);

    let g = cost.metric_tensor(&[0.4, 1.1], false).unwrap();
    assert_close(g[[0, 0]], 0.25);
    assert_close(g[[1, 1]], 0.25);
    assert_close(g[[0, 1]], -0.25);
    assert_close(g[[1, 0]], -0.25);

    let diag = cost.metric_tensor(&[0.4, 1.1], true).unwrap();
    assert_close(diag[[0, 0]], 0.25);
    assert_close(diag[[1, 1]], 0.25);
    assert_close(diag[[0, 1]], 0.0);
}

#[test]
fn shared_parameter_sums_gate_contributions() {
    let dev = DefaultQubit::with_num_wires(2).unwrap();
    let cost = ExpvalCost::new(shared_rx, z0(), &dev);
    let g = cost.metric_tensor(&[0.2], false).unwrap();
    assert_eq!(g.dim(), (1, 1));
    assert_close(g[[0, 0]], 0.5);
}

#[test]
fn rescaled_parameter_follows_chain_rule() {
    let dev = DefaultQubit::with_num_wires(1).unwrap();
    let cost = ExpvalCost::new(doubled_ry, z0(), &dev);
    let g = cost.metric_tensor(&[0.3], false).unwrap();
    assert_close(g[[0, 0]], 1.0);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn rot_gate_is_unsupported() {
    let dev = DefaultQubit::with_num_wires(1).unwrap();
    let cost = ExpvalCost::new(
        |p: &[f64], tape: &mut QuantumTape| -> Result<(), AnsatzError> {
            tape.rot(p[0], p[1], p[2], 0)?;
            Ok(())
        },
        z0(),
        &dev,
    );
    let err = cost.metric_tensor(&[0.1, 0.2, 0.3], false).unwrap_err();
    assert!(matches!(err, VqeError::UnsupportedGate(ref name) if name == "Rot"));
}

#[test]
fn gate_count_must_not_depend_on_parameters() {
    let dev = DefaultQubit::with_num_wires(2).unwrap();
    let cost = ExpvalCost::new(
        |p: &[f64], tape: &mut QuantumTape| -> Result<(), AnsatzError> {
            tape.rx(p[0], 0)?;
            if p[0] > 0.5 {
                tape.rx(p[0], 1)?;
            }
            Ok(())
        },
        z0(),
        &dev,
    );
    let err = cost.metric_tensor(&[0.5], false).unwrap_err();
    assert!(matches!(
        err,
        VqeError::InconsistentAnsatz {
            expected: 1,
            got: 2
        }
    ));
}
