//! Error types for the QAOA crate.

use qvar_ir::Wire;
use thiserror::Error;

/// Errors produced while building QAOA Hamiltonians and circuits.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QaoaError {
    /// Graph edge list is malformed.
    #[error("{0}")]
    InvalidGraph(String),

    /// An edge refers to a node the graph does not contain.
    #[error("Edge endpoint {0} is not a node of the graph")]
    UnknownNode(Wire),

    /// Cost Hamiltonian contains off-diagonal factors.
    #[error("hamiltonian must be written only in terms of PauliZ and Identity gates")]
    NotDiagonal,

    /// Layer parameters do not match the circuit depth.
    #[error("Expected {expected} {name} parameters, got {got}")]
    ParameterShape {
        /// Which parameter vector.
        name: &'static str,
        /// Circuit depth.
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// Time-evolution template error.
    #[error("Template error: {0}")]
    Sim(#[from] qvar_sim::SimError),

    /// IR error.
    #[error("IR error: {0}")]
    Ir(#[from] qvar_ir::IrError),
}

/// Result type for QAOA operations.
pub type QaoaResult<T> = Result<T, QaoaError>;
