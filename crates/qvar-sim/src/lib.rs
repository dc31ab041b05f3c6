//! `qvar-sim` — Hamiltonian time-evolution and layer templates.
//!
//! Turns a Pauli-word [`Hamiltonian`](qvar_ir::Hamiltonian) into a sequence of
//! Pauli rotations approximating `exp(-i H t)` and provides the repeated-layer
//! templates used to build variational ansätze:
//!
//! - **Trotter-Suzuki** product formulas (first- and second-order)
//! - **Pauli-rotation synthesis** into H / RX / CNOT / RZ gates
//! - **Layer templates**: [`layer`] and [`CustomEntanglerLayers`]
//!
//! # Quick start
//!
//! ```rust
//! use qvar_ir::{Hamiltonian, Observable};
//! use qvar_sim::ApproxTimeEvolution;
//!
//! // Transverse-field Ising model: H = -J·ZZ - h·X
//! let h = Hamiltonian::term(-1.0, Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap())
//!     + Hamiltonian::term(-0.5, Observable::pauli_x(0))
//!     + Hamiltonian::term(-0.5, Observable::pauli_x(1));
//!
//! let evol = ApproxTimeEvolution::new(h, 1.0 /* t */, 10 /* steps */);
//! let tape = evol.first_order().unwrap();
//! assert_eq!(tape.operations().len(), 30);
//! ```

pub mod error;
pub mod layers;
pub mod synthesis;
pub mod trotter;

pub use error::{SimError, SimResult};
pub use layers::{Coupling, CustomEntanglerLayers, Pattern, Rotation, layer};
pub use synthesis::{append_pauli_rotation, expand_pauli_rotations};
pub use trotter::{ApproxTimeEvolution, PauliRotation};
