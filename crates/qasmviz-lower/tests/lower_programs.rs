//! End-to-end lowering tests: source text through the reference parser to a
//! circuit model.

use qasmviz_circuit::{CircuitModel, GateKind, QubitId, RegisterType};
use qasmviz_lower::{FormatMode, LowerConfig, LowerError, MAX_EXPRESSION_DEPTH, lower};
use serde_json::{Value, json};

fn lower_source(source: &str, config: &LowerConfig) -> Result<CircuitModel, LowerError> {
    let program = qasmviz_syntax::parse(source).expect("source should parse");
    lower(&program, config)
}

fn lower_default(source: &str) -> Result<CircuitModel, LowerError> {
    lower_source(source, &LowerConfig::default())
}

const BELL_WITH_ROTATION: &str = r#"
OPENQASM 2.0;
include "qelib1.inc";
qreg q[2];
creg c[2];
rz(pi/2) q[0];
cx q[0], q[1];
c[1] = measure q[1];
"#;

#[test]
fn test_end_to_end() {
    let circuit = lower_default(BELL_WITH_ROTATION).unwrap();
    assert_eq!(circuit.num_qubits(), 2);
    assert_eq!(circuit.num_operations(), 3);

    let ops = circuit.operations();
    assert_eq!(ops[0].gate, GateKind::Rz);
    assert_eq!(ops[0].display_args.as_deref(), Some("π/2"));
    assert_eq!(ops[0].targets[0].q_id, QubitId(0));

    assert_eq!(ops[1].gate, GateKind::X);
    assert!(ops[1].is_controlled);
    assert_eq!(ops[1].controls[0].q_id, QubitId(0));
    assert_eq!(ops[1].targets[0].q_id, QubitId(1));

    assert_eq!(ops[2].gate, GateKind::Measure);
    assert!(ops[2].is_measurement);
    assert_eq!(ops[2].controls[0].q_id, QubitId(1));
    assert_eq!(ops[2].targets[0].q_id, QubitId(1));
    assert_eq!(ops[2].targets[0].kind, RegisterType::Classical);

    assert!(!circuit.qubits()[0].is_measured());
    assert!(circuit.qubits()[1].is_measured());
}

#[test]
fn test_mixed_rotations() {
    let circuit = lower_default(
        r#"
        OPENQASM 2.0;
        qreg q1[8];
        qreg anc;
        rz(5*pi/4) q1[0];
        rx(3*pi/4) q1[7];
        rx(0.37) anc;
        rz(2*pi) anc;
        "#,
    )
    .unwrap();

    assert_eq!(circuit.num_qubits(), 9);
    let display: Vec<_> = circuit
        .operations()
        .iter()
        .map(|op| op.display_args.clone().unwrap())
        .collect();
    assert_eq!(display, vec!["5π/4", "3π/4", "0.37", "2π"]);
    assert_eq!(circuit.operations()[1].targets[0].q_id, QubitId(7));
    assert_eq!(circuit.operations()[2].targets[0].q_id, QubitId(8));
    assert_eq!(circuit.count_gate(GateKind::Rx), 2);
}

#[test]
fn test_symbolic_mode() {
    let config = LowerConfig::default().with_format(FormatMode::Symbolic);
    let circuit = lower_source(
        "qreg q[1];\nrz(8*pi/16) q[0];\nrx(pi/2) q[0];\n",
        &config,
    )
    .unwrap();

    let ops = circuit.operations();
    assert_eq!(ops[0].display_args.as_deref(), Some("8×π/16"));
    assert_eq!(ops[1].display_args.as_deref(), Some("π/2"));
}

#[test]
fn test_measurement_disabled() {
    let config = LowerConfig::default().with_measurement(false);
    let err = lower_source(BELL_WITH_ROTATION, &config).unwrap_err();
    assert!(matches!(err, LowerError::UnexpectedStatement(text) if text.contains("measure")));

    // Programs without measurements are unaffected.
    let circuit = lower_source("qreg q[2];\ncx q[0], q[1];\n", &config).unwrap();
    assert_eq!(circuit.num_operations(), 1);
}

#[test]
fn test_register_index_expressions() {
    let circuit = lower_default("qreg q[2*2];\ncx q[6/2], q[0];\n").unwrap();
    assert_eq!(circuit.num_qubits(), 4);
    assert_eq!(circuit.operations()[0].controls[0].q_id, QubitId(3));
}

#[test]
fn test_unsupported_version() {
    let err = lower_default("OPENQASM 3.0;\nqreg q[1];\n").unwrap_err();
    assert!(matches!(err, LowerError::UnsupportedVersion(v) if v == "3.0"));

    let err = lower_default("OPENQASM 3;\nqreg q[1];\n").unwrap_err();
    assert!(matches!(err, LowerError::UnsupportedVersion(v) if v == "3"));
}

#[test]
fn test_unsupported_gate() {
    let err = lower_default("qreg q[1];\nrz(pi) q[0];\nh q[0];\n").unwrap_err();
    assert!(matches!(
        err,
        LowerError::UnsupportedGate { ref gate, ref statement }
            if gate == "h" && statement == "h q[0];"
    ));
}

#[test]
fn test_undeclared_register() {
    let err = lower_default("qreg q[1];\nrz(pi) r[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::UndeclaredRegister(name) if name == "r"));
}

#[test]
fn test_index_out_of_range() {
    let err = lower_default("qreg q[2];\ncx q[0], q[2];\n").unwrap_err();
    assert!(matches!(err, LowerError::IndexOutOfRange { register, .. } if register == "q"));

    let err = lower_default("qreg a;\nrz(pi) a[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::IndexOutOfRange { .. }));
}

#[test]
fn test_duplicate_declaration() {
    let err = lower_default("qreg q[2];\nqreg q[3];\n").unwrap_err();
    assert!(matches!(err, LowerError::DuplicateDeclaration(name) if name == "q"));
}

#[test]
fn test_expression_errors() {
    let err = lower_default("qreg q[1];\nrz(theta) q[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::UnknownIdentifier(name) if name == "theta"));

    let err = lower_default("qreg q[1];\nrz(pi+1) q[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::UnknownOperator(op) if op == "+"));

    let err = lower_default("qreg q[1];\nrz(-pi) q[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::MalformedOperand(_)));

    let err = lower_default("qreg q[1];\nrz((pi)) q[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::MalformedOperand(_)));
}

#[test]
fn test_unrecognised_statements() {
    let err = lower_default("qreg q[1];\nreset q[0];\n").unwrap_err();
    assert!(matches!(err, LowerError::UnexpectedStatement(_)));

    let err = lower_default("qubit[2] q;\n").unwrap_err();
    assert!(matches!(err, LowerError::UnexpectedStatement(_)));

    let err = lower_default("qreg q[1];\n{ rz(pi) q[0]; }\n").unwrap_err();
    assert!(matches!(err, LowerError::UnexpectedElement(_)));
}

#[test]
fn test_invalid_designator() {
    let err = lower_default("qreg q[pi];\n").unwrap_err();
    assert!(matches!(err, LowerError::InvalidDesignator(_)));

    let err = lower_default("qreg q[4294967295];\n").unwrap_err();
    assert!(matches!(err, LowerError::InvalidDesignator(_)));

    let err = lower_default("qreg a[1048576];\nqreg b;\n").unwrap_err();
    assert!(matches!(err, LowerError::InvalidDesignator(text) if text.contains("'b'")));
}

#[test]
fn test_huge_angle_falls_back_to_decimals() {
    let circuit = lower_default("qreg q[1];\nrz(1e20*pi) q[0];\n").unwrap();
    let expected = format!("{:.2}", 1e20 * std::f64::consts::PI);
    assert_eq!(circuit.operations()[0].display_args.as_deref(), Some(expected.as_str()));
}

#[test]
fn test_long_operator_chain() {
    let source = format!("qreg q[1];\nrz(pi{}) q[0];\n", "*1".repeat(100_000));
    for format in [FormatMode::Numeric, FormatMode::Symbolic] {
        let config = LowerConfig::default().with_format(format);
        let err = lower_source(&source, &config).unwrap_err();
        assert!(matches!(err, LowerError::MalformedOperand(text) if text.contains("nested")));
    }

    let within = format!("qreg q[1];\nrz(pi{}) q[0];\n", "*1".repeat(MAX_EXPRESSION_DEPTH - 1));
    let circuit = lower_default(&within).unwrap();
    assert_eq!(circuit.operations()[0].display_args.as_deref(), Some("π"));
}

#[test]
fn test_empty_program() {
    let circuit = lower_default("OPENQASM 2.0;\n").unwrap();
    assert_eq!(circuit.num_qubits(), 0);
    assert_eq!(circuit.num_operations(), 0);
}

#[test]
fn test_json_shape() {
    let circuit = lower_default(BELL_WITH_ROTATION).unwrap();
    let value: Value = serde_json::from_str(&circuit.to_json().unwrap()).unwrap();

    assert_eq!(
        value,
        json!({
            "qubits": [
                { "id": 0 },
                { "id": 1, "numChildren": 1 }
            ],
            "operations": [
                {
                    "gate": "RZ",
                    "displayArgs": "π/2",
                    "targets": [{ "qId": 0 }]
                },
                {
                    "gate": "X",
                    "isControlled": true,
                    "controls": [{ "qId": 0 }],
                    "targets": [{ "qId": 1 }]
                },
                {
                    "gate": "Measure",
                    "isMeasurement": true,
                    "controls": [{ "qId": 1 }],
                    "targets": [{ "type": 1, "qId": 1, "cId": 0 }]
                }
            ]
        })
    );
}
