//! Operations placed on the circuit's wires.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::qubit::{QubitId, Register};

/// Gate tag understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Z-axis rotation.
    #[serde(rename = "RZ")]
    Rz,
    /// X-axis rotation.
    #[serde(rename = "RX")]
    Rx,
    /// Pauli-X, drawn as the target of a controlled-X.
    X,
    /// Measurement into a classical result wire.
    Measure,
}

impl GateKind {
    /// The tag as the renderer spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            GateKind::Rz => "RZ",
            GateKind::Rx => "RX",
            GateKind::X => "X",
            GateKind::Measure => "Measure",
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single operation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Gate tag.
    pub gate: GateKind,
    /// Formatted rotation angle, for single-parameter gates only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_args: Option<String>,
    /// True only for the controlled-X form.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_controlled: bool,
    /// True for measurements.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_measurement: bool,
    /// Control wires; empty unless controlled or a measurement.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<Register>,
    /// Target wires.
    pub targets: Vec<Register>,
}

impl Operation {
    /// A single-qubit rotation with its formatted angle.
    pub fn rotation(gate: GateKind, target: QubitId, display_args: impl Into<String>) -> Self {
        Self {
            gate,
            display_args: Some(display_args.into()),
            is_controlled: false,
            is_measurement: false,
            controls: vec![],
            targets: vec![Register::qubit(target)],
        }
    }

    /// A controlled-X with one control and one target.
    pub fn controlled_x(control: QubitId, target: QubitId) -> Self {
        Self {
            gate: GateKind::X,
            display_args: None,
            is_controlled: true,
            is_measurement: false,
            controls: vec![Register::qubit(control)],
            targets: vec![Register::qubit(target)],
        }
    }

    /// A measurement of `qubit` into its first classical result wire.
    ///
    /// The measured qubit is both the control (the quantum wire the meter sits
    /// on) and the target (the classical wire that receives the result).
    pub fn measure(qubit: QubitId) -> Self {
        Self {
            gate: GateKind::Measure,
            display_args: None,
            is_controlled: false,
            is_measurement: true,
            controls: vec![Register::qubit(qubit)],
            targets: vec![Register::classical(qubit, 0)],
        }
    }

    /// Every qubit this operation touches, controls first.
    pub fn qubits(&self) -> impl Iterator<Item = QubitId> + '_ {
        self.controls
            .iter()
            .chain(self.targets.iter())
            .map(|r| r.q_id)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        if let Some(args) = &self.display_args {
            write!(f, "({args})")?;
        }
        let join = |regs: &[Register]| {
            regs.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        if !self.controls.is_empty() {
            write!(f, " [{}] ->", join(&self.controls))?;
        }
        write!(f, " {}", join(&self.targets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rotation_json() {
        let op = Operation::rotation(GateKind::Rz, QubitId(0), "π/2");
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!({ "gate": "RZ", "displayArgs": "π/2", "targets": [{ "qId": 0 }] })
        );
    }

    #[test]
    fn test_controlled_x_json() {
        let op = Operation::controlled_x(QubitId(0), QubitId(1));
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!({
                "gate": "X",
                "isControlled": true,
                "controls": [{ "qId": 0 }],
                "targets": [{ "qId": 1 }]
            })
        );
    }

    #[test]
    fn test_measure_json() {
        let op = Operation::measure(QubitId(1));
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(
            value,
            json!({
                "gate": "Measure",
                "isMeasurement": true,
                "controls": [{ "qId": 1 }],
                "targets": [{ "type": 1, "qId": 1, "cId": 0 }]
            })
        );
    }

    #[test]
    fn test_operation_qubits() {
        let op = Operation::controlled_x(QubitId(2), QubitId(5));
        let qubits: Vec<_> = op.qubits().collect();
        assert_eq!(qubits, vec![QubitId(2), QubitId(5)]);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(
            Operation::rotation(GateKind::Rx, QubitId(0), "π").to_string(),
            "RX(π) q0"
        );
        assert_eq!(
            Operation::controlled_x(QubitId(0), QubitId(1)).to_string(),
            "X [q0] -> q1"
        );
        assert_eq!(Operation::measure(QubitId(1)).to_string(), "Measure [q1] -> q1.c0");
    }
}
