//! Tests that deserialised IR values go through the same validation as the
//! constructors.

use ndarray::array;
use qvar_ir::{GateKind, Hamiltonian, Observable, Operation, QuantumTape, Tensor, Wires};

// ---------------------------------------------------------------------------
// Valid values
// ---------------------------------------------------------------------------

#[test]
fn hamiltonian_survives_json() {
    let h = Hamiltonian::term(0.5, Tensor::from_pauli_word("XZ", [0, 2]).unwrap())
        + Hamiltonian::term(
            -1.0,
            Observable::hermitian_real(array![[1.0, 1.0], [1.0, 1.0]], [1u32]).unwrap(),
        );
    let json = serde_json::to_string(&h).unwrap();
    let back: Hamiltonian = serde_json::from_str(&json).unwrap();
    assert_eq!(back, h);
}

#[test]
fn tape_survives_json() {
    let mut tape = QuantumTape::new();
    tape.h(0).unwrap().pauli_rot(0.3, "XY", [0, 1]).unwrap();
    tape.expval(Observable::pauli_z(1));
    let json = serde_json::to_string(&tape).unwrap();
    let back: QuantumTape = serde_json::from_str(&json).unwrap();
    assert_eq!(back, tape);
}

// ---------------------------------------------------------------------------
// Rejected values
// ---------------------------------------------------------------------------

#[test]
fn empty_tensor_rejected() {
    let err = serde_json::from_str::<Tensor>(r#"{"factors":[]}"#).unwrap_err();
    assert!(err.to_string().contains("at least one observable"));
}

#[test]
fn overlapping_tensor_rejected() {
    let json = r#"{"factors":[{"kind":"PauliZ","wires":[0]},{"kind":"PauliX","wires":[0]}]}"#;
    let err = serde_json::from_str::<Tensor>(json).unwrap_err();
    assert!(err.to_string().contains("overlap on wire 0"));
}

#[test]
fn duplicate_wires_rejected() {
    assert!(serde_json::from_str::<Wires>("[1, 1]").is_err());
    assert_eq!(
        serde_json::from_str::<Wires>("[3, 1]").unwrap(),
        Wires::new([3u32, 1]).unwrap()
    );
}

#[test]
fn observable_wire_count_checked() {
    let json = r#"{"kind":"PauliZ","wires":[0,1]}"#;
    assert!(serde_json::from_str::<Observable>(json).is_err());
}

#[test]
fn non_hermitian_matrix_rejected() {
    let obs = Observable::hermitian_real(array![[0.0, 1.0], [1.0, 0.0]], [0u32]).unwrap();
    let mut value = serde_json::to_value(&obs).unwrap();
    // Zero the lower-left entry so the matrix is no longer Hermitian.
    value["kind"]["Hermitian"]["data"][2] = serde_json::json!([0.0, 0.0]);
    let err = serde_json::from_value::<Observable>(value).unwrap_err();
    assert!(err.to_string().contains("Hermitian"));
}

#[test]
fn operation_wire_count_checked() {
    assert!(serde_json::from_str::<Operation>(r#"{"kind":"CNOT","wires":[0]}"#).is_err());
    assert!(serde_json::from_str::<Operation>(r#"{"kind":{"MultiRZ":0.1},"wires":[]}"#).is_err());

    let op: Operation = serde_json::from_str(r#"{"kind":"CNOT","wires":[0,1]}"#).unwrap();
    assert_eq!(op.kind(), &GateKind::CNOT);
}

#[test]
fn hamiltonian_term_count_checked() {
    let json = r#"{"coeffs":[1.0,2.0],"ops":[{"factors":[{"kind":"PauliZ","wires":[0]}]}]}"#;
    let err = serde_json::from_str::<Hamiltonian>(json).unwrap_err();
    assert!(err.to_string().contains("number of coefficients"));
}
