//! Tests for the entangler layer templates.

use std::f64::consts::PI;

use qvar_adapter_sim::{DefaultQubit, Device};
use qvar_ir::{Observable, QuantumTape, Wire, Wires};
use qvar_sim::{Coupling, CustomEntanglerLayers, Pattern, Rotation, SimError};

fn names(tape: &QuantumTape) -> Vec<&'static str> {
    tape.operations().iter().map(|op| op.name()).collect()
}

#[test]
fn default_ring_of_cnots() {
    let mut tape = QuantumTape::new();
    CustomEntanglerLayers::new(vec![vec![0.1, 0.2, 0.3]], Wires::range(3))
        .apply(&mut tape)
        .unwrap();
    assert_eq!(names(&tape), vec!["RX", "RX", "RX", "CNOT", "CNOT", "CNOT"]);
    assert_eq!(tape.operations()[5].wires().as_slice(), &[Wire(2), Wire(0)]);
}

#[test]
fn coupling_weights_default_to_crx() {
    let mut tape = QuantumTape::new();
    CustomEntanglerLayers::new(vec![vec![0.0; 4], vec![0.0; 4]], Wires::range(4))
        .with_pattern(Pattern::Chain)
        .with_coupling_weights(vec![vec![0.5; 3], vec![0.7; 3]])
        .with_rotation(Rotation::RY)
        .apply(&mut tape)
        .unwrap();
    assert_eq!(tape.operations().len(), 14);
    assert_eq!(tape.operations()[4].name(), "CRX");
    assert_eq!(tape.operations()[13].params(), vec![0.7]);
    assert_eq!(tape.operations()[7].name(), "RY");
}

#[test]
fn custom_pattern_flips_expected_wires() {
    // RX(π) on every wire, then CRX(π) on (0, 1): [-1, 1, -1]
    let dev = DefaultQubit::with_num_wires(3).unwrap();
    let mut tape = QuantumTape::new();
    CustomEntanglerLayers::new(vec![vec![PI, PI, PI]], Wires::range(3))
        .with_coupling_weights(vec![vec![PI]])
        .with_coupling(Coupling::CRX)
        .with_pattern(Pattern::Custom(vec![(Wire(0), Wire(1))]))
        .apply(&mut tape)
        .unwrap();
    for w in 0..3u32 {
        tape.expval(Observable::pauli_z(w));
    }
    let res = dev.execute(&tape).unwrap();
    let expected = [-1.0, 1.0, -1.0];
    for (r, e) in res.iter().zip(expected) {
        assert!((r - e).abs() < 1e-10);
    }
}

#[test]
fn shape_errors() {
    let bad_rot = CustomEntanglerLayers::new(vec![vec![0.1, 0.2]], Wires::range(3));
    assert!(matches!(bad_rot.validate(), Err(SimError::InvalidTemplate(_))));

    let bad_coupling = CustomEntanglerLayers::new(vec![vec![0.1; 3]], Wires::range(3))
        .with_coupling_weights(vec![vec![0.1; 2]]);
    assert!(bad_coupling.validate().is_err());

    let layer_mismatch = CustomEntanglerLayers::new(vec![vec![0.1; 3]], Wires::range(3))
        .with_coupling_weights(vec![vec![0.1; 3], vec![0.1; 3]]);
    assert!(layer_mismatch.validate().is_err());
}

#[test]
fn gate_parameter_errors() {
    let cnot_with_weights = CustomEntanglerLayers::new(vec![vec![0.1; 2]], Wires::range(2))
        .with_coupling(Coupling::CNOT)
        .with_coupling_weights(vec![vec![0.1]]);
    let err = cnot_with_weights.validate().unwrap_err();
    assert!(err.to_string().contains("does not take parameters"));

    let crz_without = CustomEntanglerLayers::new(vec![vec![0.1; 2]], Wires::range(2))
        .with_coupling(Coupling::CRZ);
    let err = crz_without.validate().unwrap_err();
    assert!(err.to_string().contains("must take parameters"));
}

#[test]
fn single_pattern_rejected_with_or_without_weights() {
    let plain = CustomEntanglerLayers::new(vec![vec![0.1; 3]], Wires::range(3))
        .with_pattern(Pattern::Single);
    let err = plain.validate().unwrap_err();
    assert!(err.to_string().contains("pattern 'single'"));

    let weighted = CustomEntanglerLayers::new(vec![vec![0.1; 3]], Wires::range(3))
        .with_pattern(Pattern::Single)
        .with_coupling_weights(vec![vec![0.2; 3]]);
    assert!(matches!(weighted.validate(), Err(SimError::InvalidTemplate(_))));

    let mut tape = QuantumTape::new();
    assert!(plain.apply(&mut tape).is_err());
    assert!(tape.operations().is_empty());
}

#[test]
fn single_wire_has_no_couplings() {
    let mut tape = QuantumTape::new();
    CustomEntanglerLayers::new(vec![vec![0.4]], Wires::range(1))
        .apply(&mut tape)
        .unwrap();
    assert_eq!(names(&tape), vec!["RX"]);
}
