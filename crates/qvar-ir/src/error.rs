//! Error types for the IR crate.

use crate::wires::Wire;
use thiserror::Error;

/// Errors that can occur while building observables, Hamiltonians and tapes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Coefficient and term lists have different lengths.
    #[error(
        "Could not create valid Hamiltonian; number of coefficients ({coeffs}) and operators ({ops}) does not match"
    )]
    TermCountMismatch {
        /// Number of coefficients supplied.
        coeffs: usize,
        /// Number of observable terms supplied.
        ops: usize,
    },

    /// A coefficient has a non-zero imaginary part.
    #[error("Could not create valid Hamiltonian; coefficient {index} is not real-valued ({value})")]
    NonRealCoefficient {
        /// Position of the offending coefficient.
        index: usize,
        /// The offending value, formatted.
        value: String,
    },

    /// A wire label appears more than once where labels must be unique.
    #[error("Duplicate wire {0}")]
    DuplicateWire(Wire),

    /// A wire label that is not part of the wire order being used.
    #[error("Wire {0} is not part of the given wire order")]
    UnknownWire(Wire),

    /// Two factors of a tensor product act on the same wire.
    #[error("Tensor factors overlap on wire {0}")]
    OverlappingTensor(Wire),

    /// A tensor product with no factors.
    #[error("Tensor product must contain at least one observable")]
    EmptyTensor,

    /// An operation or observable was given the wrong number of wires.
    #[error("'{name}' requires {expected} wires, got {got}")]
    WireCountMismatch {
        /// Name of the operation or observable.
        name: String,
        /// Expected number of wires.
        expected: usize,
        /// Actual number of wires provided.
        got: usize,
    },

    /// Matrix has the wrong shape.
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Matrix is not equal to its conjugate transpose.
    #[error("Observable must be Hermitian")]
    NotHermitian,

    /// Pauli word contains characters outside `IXYZ` or has the wrong length.
    #[error("Invalid Pauli word '{word}' for {wires} wires")]
    InvalidPauliWord {
        /// The offending word.
        word: String,
        /// Number of wires the word was applied to.
        wires: usize,
    },

    /// Basis state contains values other than 0 and 1.
    #[error("Basis state must only contain 0 and 1, got {0:?}")]
    InvalidBasisState(Vec<u8>),

    /// Tape cannot be expanded into Hamiltonian term tapes.
    #[error("Passed tape must end in `expval(H)`, where H is a Hamiltonian")]
    InvalidHamiltonianTape,

    /// Results handed to a post-processing function have the wrong shape.
    #[error("Expected {expected} results, got {got}")]
    ResultShapeMismatch {
        /// Expected number of values.
        expected: usize,
        /// Number of values received.
        got: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
