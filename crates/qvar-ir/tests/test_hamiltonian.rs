//! Tests for Hamiltonian construction, remapping, decomposition and diagonality.

use ndarray::array;
use qvar_ir::{Hamiltonian, IrError, Observable, Tensor, Wire, Wires, wire_map};

fn herm_ones(wire: u32) -> Observable {
    Observable::hermitian_real(array![[1.0, 1.0], [1.0, 1.0]], [wire]).unwrap()
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn mismatched_lengths_rejected() {
    let err = Hamiltonian::new(vec![1.0], vec![]).unwrap_err();
    assert!(matches!(err, IrError::TermCountMismatch { coeffs: 1, ops: 0 }));
    assert!(err.to_string().contains("number of coefficients"));
}

#[test]
fn wires_in_term_order() {
    let h = Hamiltonian::new(
        vec![1.0, 1.0],
        vec![
            Observable::pauli_x(3).tensor(Observable::pauli_z(1)).unwrap(),
            Observable::pauli_y(0).tensor(Observable::pauli_z(3)).unwrap(),
        ],
    )
    .unwrap();
    assert_eq!(h.wires().as_slice(), &[Wire(3), Wire(1), Wire(0)]);
}

// ---------------------------------------------------------------------------
// map_wires
// ---------------------------------------------------------------------------

#[test]
fn map_wires_relabels_and_keeps_unmapped() {
    let h = Hamiltonian::new(
        vec![0.5, 2.0],
        vec![
            Observable::pauli_z(0).tensor(Observable::pauli_x(1)).unwrap(),
            herm_ones(2).into(),
        ],
    )
    .unwrap();
    let mapped = h.map_wires(&wire_map([(0u32, 5u32), (2, 7)])).unwrap();
    assert_eq!(mapped.coeffs(), h.coeffs());
    assert_eq!(mapped.ops()[0].to_string(), "Z5 X1");
    assert_eq!(mapped.ops()[1].to_string(), "Herm7");
    assert_eq!(mapped.ops()[1].factors()[0].matrix(), herm_ones(0).matrix());
}

#[test]
fn map_wires_collision_is_error() {
    let h = Hamiltonian::term(1.0, Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap());
    assert!(h.map_wires(&wire_map([(0u32, 1u32)])).is_err());
}

// ---------------------------------------------------------------------------
// decompose
// ---------------------------------------------------------------------------

#[test]
fn decompose_mixed_term() {
    // X0 ⊗ [[1,1],[1,1]]_1 + X0
    let h = Hamiltonian::new(
        vec![1.0, 1.0],
        vec![
            Observable::pauli_x(0).tensor(herm_ones(1)).unwrap(),
            Observable::pauli_x(0).into(),
        ],
    )
    .unwrap();
    let d = h.decompose().unwrap();
    let terms: Vec<String> = d.ops().iter().map(Tensor::to_string).collect();
    assert_eq!(terms, vec!["X0 I1", "X0 X1", "X0"]);
    assert_eq!(d.coeffs(), &[1.0, 1.0, 1.0]);
}

#[test]
fn decompose_product_of_hermitians() {
    let h = Hamiltonian::term(3.0, herm_ones(0).tensor(herm_ones(1)).unwrap());
    let d = h.decompose().unwrap();
    assert_eq!(d.len(), 4);
    assert!(d.coeffs().iter().all(|c| (*c - 3.0).abs() < 1e-12));
    assert!(d.ops().iter().all(Tensor::is_pauli_word));
}

#[test]
fn decompose_two_wire_hermitian_keeps_wire_order() {
    // Z ⊗ I placed on wires [4, 2] acts as Z on wire 4.
    let zi = array![
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 0.0, -1.0]
    ];
    let h = Hamiltonian::term(1.0, Observable::hermitian_real(zi, [4u32, 2]).unwrap());
    let d = h.decompose().unwrap();
    assert_eq!(d.len(), 1);
    assert_eq!(d.ops()[0].prune().to_string(), "Z4");
}

#[test]
fn decomposed_matrix_matches_original() {
    let m = array![[2.0, 1.0], [1.0, -1.0]];
    let h = Hamiltonian::term(0.7, Observable::hermitian_real(m, [1]).unwrap())
        + Hamiltonian::term(0.2, Observable::pauli_y(0));
    let wires = Wires::range(2);
    let a = h.matrix(&wires).unwrap();
    let b = h.decompose().unwrap().matrix(&wires).unwrap();
    assert!(qvar_ir::matrix::approx_eq(&a, &b));
}

// ---------------------------------------------------------------------------
// is_diagonal
// ---------------------------------------------------------------------------

#[test]
fn z_words_are_diagonal() {
    let h = Hamiltonian::new(
        vec![0.5, -1.0, 2.0],
        vec![
            Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap(),
            Observable::identity(2).into(),
            Observable::pauli_z(2).into(),
        ],
    )
    .unwrap();
    assert!(h.is_diagonal().unwrap());
}

#[test]
fn x_term_is_not_diagonal() {
    let h = Hamiltonian::term(0.1, Observable::pauli_x(0)) + Hamiltonian::term(1.0, Observable::pauli_z(0));
    assert!(!h.is_diagonal().unwrap());
}

#[test]
fn diagonal_hermitian_is_diagonal() {
    let h = Hamiltonian::term(
        1.0,
        Observable::hermitian_real(array![[3.0, 0.0], [0.0, 1.0]], [0]).unwrap(),
    );
    assert!(h.is_diagonal().unwrap());
    assert!(!Hamiltonian::term(1.0, herm_ones(0)).is_diagonal().unwrap());
}

#[test]
fn hadamard_is_not_diagonal() {
    assert!(!Hamiltonian::term(1.0, Observable::hadamard(0)).is_diagonal().unwrap());
}

#[test]
fn cancelling_off_diagonal_terms_are_diagonal() {
    // X0 Y1 - Y1 X0 as written in different factor order
    let h = Hamiltonian::new(
        vec![1.0, -1.0],
        vec![
            Observable::pauli_x(0).tensor(Observable::pauli_y(1)).unwrap(),
            Observable::pauli_y(1).tensor(Observable::pauli_x(0)).unwrap(),
        ],
    )
    .unwrap();
    assert!(h.is_diagonal().unwrap());
}

// ---------------------------------------------------------------------------
// simplify
// ---------------------------------------------------------------------------

#[test]
fn simplify_keeps_first_occurrence_order() {
    let h = Hamiltonian::new(
        vec![1.0, 1.0, 1.0, 1e-10],
        vec![
            Observable::pauli_y(1).into(),
            Observable::pauli_x(0).tensor(Observable::identity(1)).unwrap(),
            Observable::pauli_y(1).into(),
            Observable::pauli_z(2).into(),
        ],
    )
    .unwrap();
    let s = h.simplify();
    assert_eq!(s.to_string(), "(2.0) [Y1]\n+ (1.0) [X0]");
}
