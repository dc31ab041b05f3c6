//! qvar Observable and Tape Representation
//!
//! This crate provides the data model shared by the rest of qvar: wire
//! labels, observables, Hamiltonians, gates and the quantum tapes that a
//! device executes.
//!
//! # Core Components
//!
//! - **Wires**: [`Wire`], [`Wires`] and [`WireMap`] for labelling subsystems
//! - **Observables**: [`Observable`] (Pauli, Hadamard, Hermitian) and their
//!   tensor products [`Tensor`]
//! - **Hamiltonians**: [`Hamiltonian`], a weighted sum of tensor terms with
//!   decomposition, simplification and diagonality checks
//! - **Operations**: [`GateKind`] and [`Operation`]
//! - **Tapes**: [`QuantumTape`] and [`Measurement`]
//! - **Transforms**: [`hamiltonian_expand`] and qubit-wise commuting grouping
//!
//! # Example: Decomposing a Hermitian term
//!
//! ```rust
//! use ndarray::array;
//! use qvar_ir::{Hamiltonian, Observable};
//!
//! let herm = Observable::hermitian_real(array![[1.0, 1.0], [1.0, 1.0]], [0]).unwrap();
//! let h = Hamiltonian::term(0.5, herm);
//!
//! // [[1, 1], [1, 1]] = I + X
//! let paulis = h.decompose().unwrap();
//! assert_eq!(paulis.to_string(), "(0.5) [I0]\n+ (0.5) [X0]");
//! ```
//!
//! # Example: Expanding a Hamiltonian measurement
//!
//! ```rust
//! use qvar_ir::{hamiltonian_expand, Hamiltonian, Observable, QuantumTape};
//!
//! let h = Hamiltonian::term(1.0, Observable::pauli_z(0)) + Hamiltonian::term(2.0, Observable::pauli_x(1));
//! let mut tape = QuantumTape::new();
//! tape.h(1).unwrap();
//! tape.expval_hamiltonian(h);
//!
//! let expansion = hamiltonian_expand(&tape, true).unwrap();
//! assert_eq!(expansion.tapes().len(), 1);
//! ```

pub mod decompose;
pub mod error;
pub mod grouping;
pub mod hamiltonian;
pub mod matrix;
pub mod observable;
pub mod operation;
pub mod tape;
pub mod transforms;
pub mod wires;

pub use decompose::pauli_decompose;
pub use error::{IrError, IrResult};
pub use grouping::{group_observables, qubit_wise_commute};
pub use hamiltonian::Hamiltonian;
pub use observable::{Observable, ObservableKind, Tensor};
pub use operation::{GateKind, Operation};
pub use tape::{Measurement, QuantumTape};
pub use transforms::{HamiltonianExpansion, hamiltonian_expand};
pub use wires::{Wire, WireMap, Wires, wire_map};
