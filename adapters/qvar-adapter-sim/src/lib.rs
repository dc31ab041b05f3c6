//! qvar Local Statevector Device
//!
//! This crate provides `default.qubit`, a dense statevector device that
//! executes [`QuantumTape`](qvar_ir::QuantumTape)s. It returns exact
//! expectation values by default, or finite-shot estimates drawn from a
//! seedable RNG.
//!
//! # Features
//!
//! - **Exact Simulation**: Full statevector representation (no sampling noise)
//! - **All qvar Gates**: Including `PauliRot`, `MultiRZ` and `BasisState`
//! - **Arbitrary Observables**: Pauli words, Hadamard and Hermitian matrices
//! - **Shot Sampling**: Pauli-word expectation values and probabilities
//!
//! # Performance
//!
//! | Wires | Memory | Simulation Speed |
//! |-------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//! | 24 | ~256 MB | Slow |
//!
//! # Example
//!
//! ```rust
//! use qvar_adapter_sim::{DefaultQubit, Device};
//! use qvar_ir::{Observable, QuantumTape};
//!
//! let dev = DefaultQubit::with_num_wires(2).unwrap();
//!
//! let mut tape = QuantumTape::new();
//! tape.h(0).unwrap().cnot(0, 1).unwrap();
//! tape.expval(Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap());
//!
//! let result = dev.execute(&tape).unwrap();
//! assert!((result[0] - 1.0).abs() < 1e-12);
//! ```

pub mod device;
pub mod error;
pub mod statevector;

pub use device::{DefaultQubit, Device, MAX_WIRES};
pub use error::{DeviceError, DeviceResult};
pub use statevector::Statevector;
