//! The finished circuit model.

use serde::{Deserialize, Serialize};

use crate::error::{CircuitError, CircuitResult};
use crate::operation::{GateKind, Operation};
use crate::qubit::{Qubit, QubitId};

/// Qubit wires plus the ordered operations placed on them.
///
/// `qubits` keeps allocation order and `operations` keeps source statement
/// order. A model produced by the lowering pass is frozen: it exposes read
/// access only. Deserialized models are checked the same way as
/// [`CircuitModel::new`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitParts")]
pub struct CircuitModel {
    qubits: Vec<Qubit>,
    operations: Vec<Operation>,
}

/// Unchecked wire form of [`CircuitModel`].
#[derive(Deserialize)]
struct CircuitParts {
    qubits: Vec<Qubit>,
    operations: Vec<Operation>,
}

impl TryFrom<CircuitParts> for CircuitModel {
    type Error = CircuitError;

    fn try_from(parts: CircuitParts) -> CircuitResult<Self> {
        Self::new(parts.qubits, parts.operations)
    }
}

impl CircuitModel {
    /// Assemble a model from its parts, checking every invariant.
    pub fn new(qubits: Vec<Qubit>, operations: Vec<Operation>) -> CircuitResult<Self> {
        let model = Self { qubits, operations };
        model.validate()?;
        Ok(model)
    }

    /// The qubit wires in allocation order.
    pub fn qubits(&self) -> &[Qubit] {
        &self.qubits
    }

    /// The operations in source order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of operations.
    pub fn num_operations(&self) -> usize {
        self.operations.len()
    }

    /// Look up a qubit by id.
    pub fn qubit(&self, id: QubitId) -> Option<&Qubit> {
        self.qubits.get(id.0 as usize)
    }

    /// Count operations carrying the given gate tag.
    pub fn count_gate(&self, gate: GateKind) -> usize {
        self.operations.iter().filter(|op| op.gate == gate).count()
    }

    /// Check that qubit ids are dense and every operation resolves.
    pub fn validate(&self) -> CircuitResult<()> {
        for (position, qubit) in self.qubits.iter().enumerate() {
            if qubit.id.0 as usize != position {
                return Err(CircuitError::NonContiguousQubit {
                    position,
                    found: qubit.id,
                });
            }
        }

        for (position, op) in self.operations.iter().enumerate() {
            if let Some(qubit) = op.qubits().find(|q| self.qubit(*q).is_none()) {
                return Err(CircuitError::DanglingQubit {
                    position,
                    gate: op.gate,
                    qubit,
                });
            }
        }

        Ok(())
    }

    /// Serialize to the renderer's JSON representation.
    pub fn to_json(&self) -> CircuitResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
