//! Tests for Trotter time evolution and Pauli-rotation synthesis.

use qvar_adapter_sim::{DefaultQubit, Device};
use qvar_ir::{GateKind, Hamiltonian, Observable, QuantumTape, Tensor, Wire, Wires};
use qvar_sim::{ApproxTimeEvolution, SimError, expand_pauli_rotations};

fn x0_x1() -> Hamiltonian {
    Hamiltonian::term(1.0, Observable::pauli_x(0)) + Hamiltonian::term(1.0, Observable::pauli_x(1))
}

fn z_expvals(tape: &mut QuantumTape, dev: &DefaultQubit) -> Vec<f64> {
    for w in dev.wires().iter() {
        tape.expval(Observable::pauli_z(w));
    }
    dev.execute(tape).unwrap()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn empty_hamiltonian_returns_error() {
    let evol = ApproxTimeEvolution::new(Hamiltonian::default(), 1.0, 1);
    assert!(matches!(evol.first_order(), Err(SimError::EmptyHamiltonian)));
}

#[test]
fn zero_steps_returns_error() {
    let evol = ApproxTimeEvolution::new(x0_x1(), 1.0, 0);
    assert!(matches!(evol.first_order(), Err(SimError::InvalidSteps(0))));
}

#[test]
fn non_pauli_term_rejected() {
    let h = Hamiltonian::term(1.0, Observable::hadamard(0));
    let err = ApproxTimeEvolution::new(h, 1.0, 1).first_order().unwrap_err();
    assert!(matches!(err, SimError::NonPauliTerm(_)));
    assert!(err.to_string().contains("must be written in terms of Pauli matrices"));
}

#[test]
fn term_wire_out_of_template_range() {
    let h = Hamiltonian::term(1.0, Observable::pauli_z(3));
    let evol = ApproxTimeEvolution::new(h, 1.0, 1).with_wires(Wires::range(2));
    assert!(matches!(
        evol.first_order(),
        Err(SimError::WireOutOfRange { wire: Wire(3), n_wires: 2 })
    ));
}

// ---------------------------------------------------------------------------
// Structure
// ---------------------------------------------------------------------------

#[test]
fn rotation_angles_and_repetitions() {
    let h = Hamiltonian::new(
        vec![0.5, -1.0],
        vec![
            Observable::pauli_z(0).tensor(Observable::pauli_y(1)).unwrap(),
            Observable::pauli_x(1).into(),
        ],
    )
    .unwrap();
    let tape = ApproxTimeEvolution::new(h, 2.0, 4).first_order().unwrap();
    assert_eq!(tape.operations().len(), 8);
    match tape.operations()[0].kind() {
        GateKind::PauliRot { theta, word } => {
            assert_eq!(word, "ZY");
            assert!((theta - 0.5).abs() < 1e-12); // 2 · 2.0 · 0.5 / 4
        }
        other => panic!("expected PauliRot, got {other:?}"),
    }
    assert_eq!(tape.operations()[1].params(), vec![-1.0]);
    assert_eq!(tape.operations()[6], tape.operations()[0]);
}

#[test]
fn identity_terms_skipped() {
    let h = Hamiltonian::term(3.0, Observable::identity(0)) + Hamiltonian::term(1.0, Observable::pauli_z(1));
    let tape = ApproxTimeEvolution::new(h, 1.0, 2).first_order().unwrap();
    assert_eq!(tape.operations().len(), 2);
    assert!(tape.operations().iter().all(|op| op.wires().as_slice() == [Wire(1)]));
}

#[test]
fn template_wires_index_term_wires() {
    let h = Hamiltonian::term(1.0, Observable::pauli_x(0).tensor(Observable::pauli_z(2)).unwrap());
    let evol = ApproxTimeEvolution::new(h, 1.0, 1).with_wires(Wires::new([10u32, 11, 12]).unwrap());
    let tape = evol.first_order().unwrap();
    assert_eq!(tape.operations()[0].wires().as_slice(), &[Wire(10), Wire(12)]);
}

#[test]
fn second_order_is_symmetric() {
    let h = x0_x1() + Hamiltonian::term(0.3, Tensor::from_pauli_word("ZZ", [0, 1]).unwrap());
    let tape = ApproxTimeEvolution::new(h, 1.0, 1).second_order().unwrap();
    let ops = tape.operations();
    assert_eq!(ops.len(), 6);
    for i in 0..3 {
        assert_eq!(ops[i], ops[5 - i]);
    }
}

// ---------------------------------------------------------------------------
// Physics
// ---------------------------------------------------------------------------

#[test]
fn x_evolution_expectations() {
    let dev = DefaultQubit::with_num_wires(2).unwrap();
    let mut tape = ApproxTimeEvolution::new(x0_x1(), 1.0, 1).first_order().unwrap();
    let res = z_expvals(&mut tape, &dev);
    for r in res {
        assert!((r - (-0.416_146_836_547_142_4)).abs() < 1e-9);
    }
}

#[test]
fn commuting_terms_are_exact_for_any_n() {
    let h = Hamiltonian::term(0.7, Tensor::from_pauli_word("ZZ", [0, 1]).unwrap())
        + Hamiltonian::term(-0.4, Observable::pauli_z(0));
    let dev = DefaultQubit::with_num_wires(2).unwrap();
    let mut base = QuantumTape::new();
    base.h(0).unwrap().h(1).unwrap();

    let mut one = base.clone();
    ApproxTimeEvolution::new(h.clone(), 0.9, 1).apply(&mut one).unwrap();
    let mut five = base.clone();
    ApproxTimeEvolution::new(h, 0.9, 5).apply(&mut five).unwrap();

    one.expval(Observable::pauli_x(0));
    five.expval(Observable::pauli_x(0));
    let a = dev.execute(&one).unwrap()[0];
    let b = dev.execute(&five).unwrap()[0];
    assert!((a - b).abs() < 1e-10);
}

#[test]
fn second_order_error_is_quadratic_in_steps() {
    let h = Hamiltonian::term(1.0, Observable::pauli_x(0))
        + Hamiltonian::term(1.0, Tensor::from_pauli_word("ZZ", [0, 1]).unwrap());
    let dev = DefaultQubit::with_num_wires(2).unwrap();
    let run = |n: usize| {
        let mut tape = ApproxTimeEvolution::new(h.clone(), 1.0, n)
            .second_order()
            .unwrap();
        tape.expval(Observable::pauli_z(0));
        dev.execute(&tape).unwrap()[0]
    };
    let exact = run(400);
    let coarse = (run(4) - exact).abs();
    let fine = (run(8) - exact).abs();
    // Halving the slice width divides the error by about four.
    let ratio = coarse / fine;
    assert!((3.5..4.5).contains(&ratio), "ratio {ratio}");
}

#[test]
fn synthesis_preserves_expectations() {
    let h = Hamiltonian::new(
        vec![0.3, -0.8, 0.5],
        vec![
            Tensor::from_pauli_word("XY", [0, 1]).unwrap(),
            Tensor::from_pauli_word("ZIX", [0, 1, 2]).unwrap(),
            Observable::pauli_y(2).into(),
        ],
    )
    .unwrap();
    let dev = DefaultQubit::with_num_wires(3).unwrap();
    let mut tape = QuantumTape::new();
    tape.h(1).unwrap();
    ApproxTimeEvolution::new(h, 1.3, 2).apply(&mut tape).unwrap();
    let mut expanded = expand_pauli_rotations(&tape).unwrap();
    assert!(expanded
        .operations()
        .iter()
        .all(|op| !matches!(op.kind(), GateKind::PauliRot { .. })));

    let a = z_expvals(&mut tape, &dev);
    let b = z_expvals(&mut expanded, &dev);
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() < 1e-10);
    }
}
