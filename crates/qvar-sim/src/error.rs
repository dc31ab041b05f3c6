//! Error types for the sim crate.

use qvar_ir::Wire;
use thiserror::Error;

/// Errors produced by time-evolution and layer templates.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Hamiltonian contains no terms.
    #[error("Hamiltonian is empty, no terms to evolve under")]
    EmptyHamiltonian,

    /// A term is not a product of Pauli operators.
    #[error("`hamiltonian` must be written in terms of Pauli matrices, got {0}")]
    NonPauliTerm(String),

    /// A term wire indexes past the end of the template wires.
    #[error("Term wire {wire} is out of range for a template on {n_wires} wires")]
    WireOutOfRange {
        /// The offending term wire.
        wire: Wire,
        /// Number of template wires.
        n_wires: usize,
    },

    /// Number of Trotter steps must be ≥ 1.
    #[error("n must be at least 1, got {0}")]
    InvalidSteps(usize),

    /// Template arguments have the wrong shape or combination.
    #[error("Invalid template arguments: {0}")]
    InvalidTemplate(String),

    /// Tape builder returned an error.
    #[error("IR error: {0}")]
    Ir(#[from] qvar_ir::IrError),
}

/// Result type for template operations.
pub type SimResult<T> = Result<T, SimError>;
