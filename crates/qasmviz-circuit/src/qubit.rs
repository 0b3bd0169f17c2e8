//! Qubit and register-reference types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a qubit within a circuit.
///
/// Identifiers are dense: a circuit with `n` qubits uses exactly `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

/// A qubit wire in the rendered circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// Number of classical result wires hanging off this qubit.
    ///
    /// Set once the qubit has been measured; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_children: Option<u32>,
}

impl Qubit {
    /// Create a fresh, unmeasured qubit.
    pub fn new(id: QubitId) -> Self {
        Self {
            id,
            num_children: None,
        }
    }

    /// Record that this qubit has a classical result.
    ///
    /// Measuring the same qubit twice still yields a single result wire.
    pub fn mark_measured(&mut self) {
        self.num_children = Some(1);
    }

    /// Whether a classical result has been recorded for this qubit.
    pub fn is_measured(&self) -> bool {
        self.num_children.is_some()
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_measured() {
            write!(f, "{} (measured)", self.id)
        } else {
            write!(f, "{}", self.id)
        }
    }
}

/// Which kind of wire a [`Register`] reference points at.
///
/// Serialized as the renderer's numeric tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum RegisterType {
    /// The quantum wire itself.
    #[default]
    Qubit,
    /// A classical result wire attached to a qubit.
    Classical,
}

impl RegisterType {
    #[allow(clippy::trivially_copy_pass_by_ref)]
    fn is_qubit(&self) -> bool {
        *self == RegisterType::Qubit
    }
}

impl From<RegisterType> for u8 {
    fn from(kind: RegisterType) -> Self {
        match kind {
            RegisterType::Qubit => 0,
            RegisterType::Classical => 1,
        }
    }
}

impl TryFrom<u8> for RegisterType {
    type Error = String;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(RegisterType::Qubit),
            1 => Ok(RegisterType::Classical),
            other => Err(format!("unknown register type tag {other}")),
        }
    }
}

/// A reference from an operation to a wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    /// Wire kind; omitted from JSON for plain qubit wires.
    #[serde(rename = "type", default, skip_serializing_if = "RegisterType::is_qubit")]
    pub kind: RegisterType,
    /// The qubit this wire belongs to.
    pub q_id: QubitId,
    /// Index of the classical result wire, for classical references.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c_id: Option<u32>,
}

impl Register {
    /// Reference a qubit wire.
    pub fn qubit(q_id: QubitId) -> Self {
        Self {
            kind: RegisterType::Qubit,
            q_id,
            c_id: None,
        }
    }

    /// Reference the `c_id`-th classical result wire of a qubit.
    pub fn classical(q_id: QubitId, c_id: u32) -> Self {
        Self {
            kind: RegisterType::Classical,
            q_id,
            c_id: Some(c_id),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.c_id) {
            (RegisterType::Classical, Some(c)) => write!(f, "{}.c{c}", self.q_id),
            _ => write!(f, "{}", self.q_id),
        }
    }
}
