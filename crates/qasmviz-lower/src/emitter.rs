//! Statement-to-operation translation.

use qasmviz_circuit::{GateKind, Operation, QubitId};
use qasmviz_syntax::syntax::{
    AssignmentStatement, AssignmentValue, Expression, GateCallStatement, GateOperand,
    IndexOperator, TerminalKind,
};
use tracing::debug;

use crate::error::{LowerError, LowerResult};
use crate::eval::{as_index, evaluate};
use crate::format::ExpressionFormatter;
use crate::registry::QubitRegistry;

/// Translates recognised statements into operations, one per statement.
#[derive(Debug, Default)]
pub struct OperationEmitter {
    formatter: ExpressionFormatter,
    measurement: bool,
    operations: Vec<Operation>,
}

impl OperationEmitter {
    pub fn new(formatter: ExpressionFormatter, measurement: bool) -> Self {
        Self {
            formatter,
            measurement,
            operations: Vec::new(),
        }
    }

    /// Operations emitted so far, in statement order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Hand off the operation list.
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// Emit the operation for a gate call.
    pub fn emit_gate_call(
        &mut self,
        registry: &QubitRegistry,
        call: &GateCallStatement,
    ) -> LowerResult<()> {
        if !call.modifiers.is_empty() || call.designator.is_some() {
            return Err(LowerError::UnexpectedStatement(call.to_string()));
        }

        let op = match call.identifier.as_str() {
            "rz" => self.rotation(registry, call, GateKind::Rz)?,
            "rx" => self.rotation(registry, call, GateKind::Rx)?,
            "cx" => {
                expect_arguments(call, 0)?;
                expect_operands(call, 2)?;
                let control = resolve_operand(registry, &call.operands[0])?;
                let target = resolve_operand(registry, &call.operands[1])?;
                Operation::controlled_x(control, target)
            }
            other => {
                return Err(LowerError::UnsupportedGate {
                    gate: other.to_string(),
                    statement: call.to_string(),
                });
            }
        };

        self.push(op);
        Ok(())
    }

    /// Emit the operation for a `c = measure q;` assignment.
    pub fn emit_assignment(
        &mut self,
        registry: &mut QubitRegistry,
        stmt: &AssignmentStatement,
    ) -> LowerResult<()> {
        if !self.measurement || stmt.op.kind != TerminalKind::Equals {
            return Err(LowerError::UnexpectedStatement(stmt.to_string()));
        }
        let AssignmentValue::Measure(operand) = &stmt.value else {
            return Err(LowerError::UnexpectedStatement(stmt.to_string()));
        };

        let qubit = resolve_operand(registry, operand)?;
        registry.mark_measured(qubit);
        self.push(Operation::measure(qubit));
        Ok(())
    }

    fn rotation(
        &self,
        registry: &QubitRegistry,
        call: &GateCallStatement,
        gate: GateKind,
    ) -> LowerResult<Operation> {
        let angle = expect_arguments(call, 1)?;
        expect_operands(call, 1)?;
        let target = resolve_operand(registry, &call.operands[0])?;
        let display = self.formatter.format(&angle[0])?;
        Ok(Operation::rotation(gate, target, display))
    }

    fn push(&mut self, op: Operation) {
        debug!(operation = %op, "emitted");
        self.operations.push(op);
    }
}

/// Resolve a scalar (`q`) or singly-indexed (`q[i]`) operand.
pub fn resolve_operand(registry: &QubitRegistry, operand: &GateOperand) -> LowerResult<QubitId> {
    let GateOperand::IndexedIdentifier(target) = operand else {
        return Err(LowerError::MalformedOperand(operand.to_string()));
    };

    match target.indices.as_slice() {
        [] => registry.resolve(&target.identifier, None),
        [IndexOperator::Expressions(exprs)] if exprs.len() == 1 => {
            let value = evaluate(&exprs[0])?;
            let index = as_index(value).ok_or_else(|| LowerError::IndexOutOfRange {
                register: target.identifier.clone(),
                detail: format!("index {} is not a non-negative integer", exprs[0]),
            })?;
            registry.resolve(&target.identifier, Some(index))
        }
        _ => Err(LowerError::MalformedOperand(operand.to_string())),
    }
}

fn expect_operands(call: &GateCallStatement, expected: usize) -> LowerResult<()> {
    if call.operands.len() == expected {
        Ok(())
    } else {
        Err(LowerError::WrongOperandCount {
            gate: call.identifier.clone(),
            expected,
            got: call.operands.len(),
        })
    }
}

fn expect_arguments(call: &GateCallStatement, expected: usize) -> LowerResult<&[Expression]> {
    let args = call.arguments.as_deref().unwrap_or_default();
    if args.len() == expected {
        Ok(args)
    } else {
        Err(LowerError::WrongArgumentCount {
            gate: call.identifier.clone(),
            expected,
            got: args.len(),
        })
    }
}
