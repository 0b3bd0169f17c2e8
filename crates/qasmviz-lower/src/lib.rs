//! `OpenQASM` syntax tree to circuit model lowering
//!
//! This crate turns a parsed program (see [`qasmviz_syntax`]) into the
//! [`CircuitModel`] the renderer draws. The pass is a single synchronous
//! walk: declarations allocate qubits, recognised gate calls and
//! measurements append one operation each, and the first unsupported
//! construct aborts the run.
//!
//! # Example
//!
//! ```rust
//! use qasmviz_lower::{lower, LowerConfig};
//! use qasmviz_circuit::GateKind;
//!
//! let program = qasmviz_syntax::parse(r#"
//!     OPENQASM 2.0;
//!     qreg q[2];
//!     creg c[2];
//!     rz(pi/2) q[0];
//!     cx q[0], q[1];
//!     c[1] = measure q[1];
//! "#).unwrap();
//!
//! let circuit = lower(&program, &LowerConfig::default()).unwrap();
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.operations()[0].display_args.as_deref(), Some("π/2"));
//! assert_eq!(circuit.operations()[1].gate, GateKind::X);
//! assert_eq!(circuit.operations()[2].gate, GateKind::Measure);
//! ```
//!
//! # Supported Constructs
//!
//! | Construct | Example | Result |
//! |-----------|---------|--------|
//! | Version | `OPENQASM 2.0;` | checked, no output |
//! | Include | `include "qelib1.inc";` | ignored |
//! | Quantum register | `qreg q[2];`, `qreg a;` | qubits allocated |
//! | Classical register | `creg c[2];` | ignored |
//! | Rotation | `rz(3*pi/4) q[0];`, `rx(0.5) a;` | `RZ` / `RX` |
//! | Controlled-X | `cx q[0], q[1];` | `X`, controlled |
//! | Measurement | `c[0] = measure q[0];` | `Measure` |
//!
//! # Angle Formatting
//!
//! [`FormatMode::Numeric`] reduces angles to sixteenths of π (`pi/2` → `π/2`,
//! `8*pi/16` → `π/2`). [`FormatMode::Symbolic`] keeps the written structure
//! (`8*pi/16` → `8×π/16`).

pub mod config;
pub mod emitter;
pub mod error;
pub mod eval;
pub mod format;
pub mod registry;
pub mod walker;

pub use config::{FormatMode, LowerConfig};
pub use emitter::OperationEmitter;
pub use error::{LowerError, LowerResult};
pub use eval::{MAX_EXPRESSION_DEPTH, evaluate};
pub use format::{ExpressionFormatter, format_angle};
pub use registry::{MAX_QUBITS, QubitRegistry};
pub use walker::{SUPPORTED_VERSION, SyntaxTreeWalker};

use qasmviz_circuit::CircuitModel;
use qasmviz_syntax::syntax::Program;
use tracing::{info, instrument};

/// Lower a parsed program into a circuit model.
///
/// Either the whole program lowers or an error is returned; no partial
/// circuit is ever produced.
#[instrument(skip_all, fields(format = %config.format, measurement = config.measurement))]
pub fn lower(program: &Program, config: &LowerConfig) -> LowerResult<CircuitModel> {
    let circuit = SyntaxTreeWalker::new(config).walk(program)?;
    info!(
        qubits = circuit.num_qubits(),
        operations = circuit.num_operations(),
        "lowered circuit"
    );
    Ok(circuit)
}
