//! Circuit model for the qasmviz renderer hand-off
//!
//! This crate holds the normalized circuit representation produced by the
//! QASM lowering pass: a list of qubit wires and an ordered list of
//! operations, in the JSON shape the circuit renderer draws from.
//!
//! # Example
//!
//! ```rust
//! use qasmviz_circuit::{CircuitModel, GateKind, Operation, Qubit, QubitId};
//!
//! let qubits = vec![Qubit::new(QubitId(0)), Qubit::new(QubitId(1))];
//! let operations = vec![
//!     Operation::rotation(GateKind::Rz, QubitId(0), "π/2"),
//!     Operation::controlled_x(QubitId(0), QubitId(1)),
//! ];
//!
//! let circuit = CircuitModel::new(qubits, operations).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert!(circuit.to_json().unwrap().contains("\"isControlled\":true"));
//! ```
//!
//! # Gate Tags
//!
//! | Tag | Wires | Produced by |
//! |-----|-------|-------------|
//! | `RZ`, `RX` | 1 target | `rz(θ) q;`, `rx(θ) q;` |
//! | `X` | 1 control, 1 target | `cx a, b;` |
//! | `Measure` | qubit control, classical target | `c = measure q;` |

pub mod circuit;
pub mod error;
pub mod operation;
pub mod qubit;
pub mod render;

pub use circuit::CircuitModel;
pub use error::{CircuitError, CircuitResult};
pub use operation::{GateKind, Operation};
pub use qubit::{Qubit, QubitId, Register, RegisterType};
pub use render::{RenderRequest, Style};
