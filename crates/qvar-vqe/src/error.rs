//! Error types for the VQE crate.

use thiserror::Error;

/// Boxed error returned by a user-supplied ansatz.
pub type AnsatzError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by cost functions, gradients and optimizers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VqeError {
    /// Number of spatial orbitals must be positive.
    #[error("'n_orbitals' must be greater than 0, got {0}")]
    InvalidOrbitals(usize),

    /// Unknown fermion-to-qubit mapping name.
    #[error("'{0}' is not supported, use 'jordan_wigner' or 'bravyi_kitaev'")]
    InvalidMapping(String),

    /// Parameter vector is empty or has the wrong length.
    #[error("Expected {expected} parameters, got {got}")]
    ParameterShape {
        /// Required length.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Finite-difference step must be positive and finite.
    #[error("Invalid finite-difference step {0}")]
    InvalidStep(f64),

    /// The objective returned a non-finite value.
    #[error("Objective returned a non-finite value {0}")]
    NonFinite(f64),

    /// Gate without a Pauli-word generator.
    #[error("Metric tensor does not support gate '{0}'")]
    UnsupportedGate(String),

    /// The ansatz records a different number of gate parameters when its
    /// inputs change.
    #[error("Ansatz recorded {got} gate parameters, expected {expected}")]
    InconsistentAnsatz {
        /// Count at the unshifted parameters.
        expected: usize,
        /// Count at a shifted point.
        got: usize,
    },

    /// The ansatz failed to build its circuit.
    #[error("Ansatz failed: {0}")]
    Ansatz(#[source] AnsatzError),

    /// Device execution error.
    #[error("Device error: {0}")]
    Device(#[from] qvar_adapter_sim::DeviceError),

    /// IR error.
    #[error("IR error: {0}")]
    Ir(#[from] qvar_ir::IrError),
}

/// Result type for VQE operations.
pub type VqeResult<T> = Result<T, VqeError>;
