//! Error types for the lowering pass.

use qasmviz_circuit::CircuitError;
use thiserror::Error;

/// Errors that abort a lowering run.
///
/// Every variant is fatal: the first one raised ends the run and no circuit
/// is produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LowerError {
    /// Version declaration other than the single accepted one.
    #[error("Unsupported OPENQASM version: {0} (expected 2.0)")]
    UnsupportedVersion(String),

    /// Top-level node of an unexpected shape.
    #[error("Unexpected element: {0}")]
    UnexpectedElement(String),

    /// Statement of an unrecognised shape.
    #[error("Unexpected statement: {0}")]
    UnexpectedStatement(String),

    /// Gate identifier outside the supported vocabulary.
    #[error("Unsupported gate '{gate}' in `{statement}`")]
    UnsupportedGate { gate: String, statement: String },

    /// Identifier other than `pi` inside an expression.
    #[error("Unknown identifier: {0}")]
    UnknownIdentifier(String),

    /// Binary operator other than `*` or `/`.
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Expression leaf or operand of an unsupported shape.
    #[error("Malformed operand: {0}")]
    MalformedOperand(String),

    /// Reference to a register that was never declared.
    #[error("Undeclared register: {0}")]
    UndeclaredRegister(String),

    /// Index out of bounds, or supplied/omitted inconsistently with the
    /// register's declaration.
    #[error("Invalid index into register '{register}': {detail}")]
    IndexOutOfRange { register: String, detail: String },

    /// Register declared twice.
    #[error("Duplicate declaration: {0}")]
    DuplicateDeclaration(String),

    /// Wrong number of qubit operands.
    #[error("Gate '{gate}' expects {expected} operands, got {got}")]
    WrongOperandCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Wrong number of parenthesized arguments.
    #[error("Gate '{gate}' expects {expected} arguments, got {got}")]
    WrongArgumentCount {
        gate: String,
        expected: usize,
        got: usize,
    },

    /// Register size that is not a non-negative integer.
    #[error("Invalid register size: {0}")]
    InvalidDesignator(String),

    /// The assembled circuit failed validation.
    #[error("Circuit error: {0}")]
    Circuit(#[from] CircuitError),
}

/// Result type for lowering operations.
pub type LowerResult<T> = Result<T, LowerError>;
