//! `qvar-vqe` — variational eigensolver toolkit.
//!
//! - [`ExpvalCost`]: `⟨ψ(θ)|H|ψ(θ)⟩` from an ansatz, a Hamiltonian and a device
//! - [`gradient::finite_difference`]: central-difference gradients
//! - [`ExpvalCost::metric_tensor`]: block-diagonal Fubini-Study metric
//! - optimizers: [`Cobyla`] (minimize-style) and [`GradientDescentOptimizer`],
//!   [`AdamOptimizer`] (step-style)
//! - [`particle_number`]: the particle-number observable under
//!   Jordan-Wigner or Bravyi-Kitaev mapping
//!
//! # Example
//!
//! ```rust
//! use qvar_adapter_sim::DefaultQubit;
//! use qvar_ir::{Hamiltonian, Observable, QuantumTape};
//! use qvar_vqe::{ExpvalCost, GradientDescentOptimizer, StepOptimizer};
//!
//! let dev = DefaultQubit::with_num_wires(1).unwrap();
//! let cost = ExpvalCost::new(
//!     |p: &[f64], tape: &mut QuantumTape| {
//!         tape.ry(p[0], 0)?;
//!         Ok(())
//!     },
//!     Hamiltonian::term(1.0, Observable::pauli_z(0)),
//!     &dev,
//! );
//!
//! let mut opt = GradientDescentOptimizer::new(0.4);
//! let mut params = vec![0.1];
//! for _ in 0..50 {
//!     params = opt.step(|p| cost.evaluate(p), &params).unwrap();
//! }
//! assert!(cost.evaluate(&params).unwrap() < -0.99);
//! ```

pub mod cost;
pub mod error;
pub mod gradient;
pub mod metric;
pub mod optimizers;
pub mod qchem;

pub use cost::ExpvalCost;
pub use error::{AnsatzError, VqeError, VqeResult};
pub use gradient::finite_difference;
pub use metric::block_diag_metric_tensor;
pub use optimizers::{
    AdamOptimizer, Cobyla, GradientDescentOptimizer, OptimizationResult, Optimizer, StepOptimizer,
};
pub use qchem::{Mapping, particle_number};
