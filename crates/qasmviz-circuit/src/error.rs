//! Error types for the circuit model.

use crate::operation::GateKind;
use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur when checking a circuit model.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CircuitError {
    /// An operation references a qubit that is not part of the circuit.
    #[error("Operation {position} ({gate}) references unknown qubit {qubit}")]
    DanglingQubit {
        /// Index of the operation in the operation list.
        position: usize,
        /// Gate tag of the offending operation.
        gate: GateKind,
        /// The unresolved qubit.
        qubit: QubitId,
    },

    /// Qubit identifiers are not the dense sequence `0..n`.
    #[error("Qubit at position {position} has id {found}, expected q{position}")]
    NonContiguousQubit {
        /// Position in the qubit list.
        position: usize,
        /// The identifier found there.
        found: QubitId,
    },

    /// JSON serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for circuit model operations.
pub type CircuitResult<T> = Result<T, CircuitError>;
