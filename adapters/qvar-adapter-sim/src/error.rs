//! Error types for the statevector device.

use qvar_ir::Wire;
use thiserror::Error;

/// Errors raised while executing tapes on a device.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// A tape uses a wire the device does not have.
    #[error("Wire {0} is not a device wire")]
    UnknownWire(Wire),

    /// The device was created with too many wires to simulate.
    #[error("Device supports at most {max} wires, got {got}")]
    TooManyWires {
        /// Maximum supported wires.
        max: usize,
        /// Requested wires.
        got: usize,
    },

    /// Finite-shot estimation was requested for an observable that is not a Pauli word.
    #[error("Sampling is only supported for Pauli-word observables, got {0}")]
    SamplingUnsupported(String),

    /// Operation cannot be applied at its position in the tape.
    #[error("Operation {0} is not supported here")]
    UnsupportedOperation(String),

    /// The state does not define a probability distribution to sample from.
    #[error("Cannot sample from the current state: {0}")]
    InvalidState(String),

    /// Number of shots must be ≥ 1.
    #[error("shots must be at least 1")]
    InvalidShots,

    /// IR-level error while preparing an observable.
    #[error("IR error: {0}")]
    Ir(#[from] qvar_ir::IrError),
}

/// Result type for device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;
