//! Property-based tests for qubit allocation and angle formatting.

use std::f64::consts::PI;

use proptest::prelude::*;
use qasmviz_circuit::QubitId;
use qasmviz_lower::{LowerConfig, format_angle, lower};

/// Build a program declaring one register per size, named `r0`, `r1`, ...
/// Size 0 declares a single-qubit register without a designator.
fn declarations(sizes: &[usize]) -> String {
    let mut source = String::from("OPENQASM 2.0;\n");
    for (i, size) in sizes.iter().enumerate() {
        if *size == 0 {
            source.push_str(&format!("qreg r{i};\n"));
        } else {
            source.push_str(&format!("qreg r{i}[{size}];\n"));
        }
    }
    source
}

/// Reference rendering of `k·π/16`.
fn expected_fraction(k: i64) -> String {
    if k == 0 {
        return "0".to_string();
    }
    let (mut a, mut b) = (k.unsigned_abs(), 16_u64);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    let num = k.unsigned_abs() / a;
    let den = 16 / a;
    let sign = if k < 0 { "-" } else { "" };
    let num = if num == 1 { String::new() } else { num.to_string() };
    let den = if den == 1 { String::new() } else { format!("/{den}") };
    format!("{sign}{num}π{den}")
}

proptest! {
    /// Ids across all declarations are exactly `0..total`, in declaration order.
    #[test]
    fn qubit_ids_are_contiguous(sizes in prop::collection::vec(0_usize..6, 1..8)) {
        let program = qasmviz_syntax::parse(&declarations(&sizes)).unwrap();
        let circuit = lower(&program, &LowerConfig::default()).unwrap();

        let total: usize = sizes.iter().map(|s| (*s).max(1)).sum();
        let ids: Vec<u32> = circuit.qubits().iter().map(|q| q.id.0).collect();
        let expected: Vec<u32> = (0..total as u32).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Indexing a register reaches the qubit allocated at that offset.
    #[test]
    fn indexed_operand_resolves_to_offset(
        before in 0_usize..5,
        size in 1_usize..6,
        index_seed in any::<usize>(),
    ) {
        let index = index_seed % size;
        let source = format!(
            "qreg pre[{}];\nqreg q[{size}];\nrz(pi) q[{index}];\n",
            before.max(1),
        );
        let program = qasmviz_syntax::parse(&source).unwrap();
        let circuit = lower(&program, &LowerConfig::default()).unwrap();

        let target = circuit.operations()[0].targets[0].q_id;
        prop_assert_eq!(target, QubitId((before.max(1) + index) as u32));
    }

    /// Every multiple of π/16 renders as a reduced fraction.
    #[test]
    fn sixteenths_render_as_fractions(k in -64_i64..=64) {
        let value = k as f64 * PI / 16.0;
        prop_assert_eq!(format_angle(value), expected_fraction(k));
    }

    /// Values strictly between sixteenths fall back to two decimals.
    #[test]
    fn off_grid_values_use_decimals(k in -32_i64..32, offset in 0.01_f64..0.99) {
        let value = (k as f64 + offset) * PI / 16.0;
        prop_assert_eq!(format_angle(value), format!("{value:.2}"));
    }
}
