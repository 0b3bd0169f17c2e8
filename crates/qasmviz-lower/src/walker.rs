//! Top-level dispatch over a parsed program.

use qasmviz_circuit::CircuitModel;
use qasmviz_syntax::syntax::{
    OldStyleDeclarationStatement, Program, Statement, StatementOrScope, TerminalKind, TopLevel,
};
use tracing::debug;

use crate::config::LowerConfig;
use crate::emitter::OperationEmitter;
use crate::error::{LowerError, LowerResult};
use crate::eval::{as_index, evaluate};
use crate::format::ExpressionFormatter;
use crate::registry::QubitRegistry;

/// The only version specifier accepted in a `OPENQASM` header.
pub const SUPPORTED_VERSION: &str = "2.0";

/// Owns the state of one lowering run.
#[derive(Debug)]
pub struct SyntaxTreeWalker {
    registry: QubitRegistry,
    emitter: OperationEmitter,
}

impl SyntaxTreeWalker {
    pub fn new(config: &LowerConfig) -> Self {
        Self {
            registry: QubitRegistry::new(),
            emitter: OperationEmitter::new(
                ExpressionFormatter::new(config.format),
                config.measurement,
            ),
        }
    }

    /// Walk every top-level node and assemble the circuit.
    ///
    /// Consumes the walker: state never outlives a run.
    pub fn walk(mut self, program: &Program) -> LowerResult<CircuitModel> {
        let Some((TopLevel::Eof, body)) = program.children.split_last() else {
            let last = program
                .children
                .last()
                .map_or_else(|| "empty program".to_string(), ToString::to_string);
            return Err(LowerError::UnexpectedElement(last));
        };

        for (position, node) in body.iter().enumerate() {
            match node {
                TopLevel::Version(version) if position == 0 => {
                    if version.specifier != SUPPORTED_VERSION {
                        return Err(LowerError::UnsupportedVersion(version.specifier.clone()));
                    }
                    debug!(version = %version.specifier, "version accepted");
                }
                TopLevel::StatementOrScope(StatementOrScope::Statement(stmt)) => {
                    self.visit_statement(stmt)?;
                }
                other => return Err(LowerError::UnexpectedElement(other.to_string())),
            }
        }

        let circuit =
            CircuitModel::new(self.registry.into_qubits(), self.emitter.into_operations())?;
        Ok(circuit)
    }

    fn visit_statement(&mut self, stmt: &Statement) -> LowerResult<()> {
        match stmt {
            Statement::Include(include) => {
                debug!(path = %include.path, "include ignored");
                Ok(())
            }
            Statement::OldStyleDeclaration(decl) => self.visit_declaration(decl),
            Statement::GateCall(call) => {
                debug!(gate = %call.identifier, "gate call");
                self.emitter.emit_gate_call(&self.registry, call)
            }
            Statement::Assignment(assign) => {
                debug!(register = %assign.target, "assignment");
                self.emitter.emit_assignment(&mut self.registry, assign)
            }
            Statement::Other(opaque) => Err(LowerError::UnexpectedStatement(opaque.to_string())),
        }
    }

    fn visit_declaration(&mut self, decl: &OldStyleDeclarationStatement) -> LowerResult<()> {
        match decl.kind.kind {
            TerminalKind::Creg => {
                debug!(register = %decl.identifier, "classical register ignored");
                Ok(())
            }
            TerminalKind::Qreg => {
                match &decl.designator {
                    Some(designator) => {
                        let size = evaluate(&designator.expression)?;
                        let count = as_index(size)
                            .ok_or_else(|| LowerError::InvalidDesignator(decl.to_string()))?;
                        self.registry.declare_array(&decl.identifier, count)?;
                        debug!(register = %decl.identifier, size = count, "quantum register");
                    }
                    None => {
                        self.registry.declare_scalar(&decl.identifier)?;
                        debug!(register = %decl.identifier, "single-qubit register");
                    }
                }
                Ok(())
            }
            _ => Err(LowerError::UnexpectedStatement(decl.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qasmviz_syntax::syntax::{
        Designator, Expression, IncludeStatement, Opaque, Rule, Terminal, Version,
    };

    fn stmt(statement: Statement) -> TopLevel {
        TopLevel::StatementOrScope(StatementOrScope::Statement(statement))
    }

    fn qreg(name: &str, size: Option<&str>) -> TopLevel {
        decl(TerminalKind::Qreg, "qreg", name, size)
    }

    fn decl(kind: TerminalKind, keyword: &str, name: &str, size: Option<&str>) -> TopLevel {
        stmt(Statement::OldStyleDeclaration(OldStyleDeclarationStatement {
            kind: Terminal::new(kind, keyword),
            identifier: name.to_string(),
            designator: size.map(|s| Designator {
                expression: Expression::literal(TerminalKind::DecimalIntegerLiteral, s),
            }),
        }))
    }

    fn version(specifier: &str) -> TopLevel {
        TopLevel::Version(Version {
            specifier: specifier.to_string(),
        })
    }

    fn walk(children: Vec<TopLevel>) -> LowerResult<CircuitModel> {
        SyntaxTreeWalker::new(&LowerConfig::default()).walk(&Program { children })
    }

    #[test]
    fn test_declarations_allocate_in_order() {
        let circuit = walk(vec![
            version("2.0"),
            qreg("a", Some("2")),
            decl(TerminalKind::Creg, "creg", "c", Some("2")),
            qreg("b", None),
            TopLevel::Eof,
        ])
        .unwrap();
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_operations(), 0);
    }

    #[test]
    fn test_version_is_optional() {
        let circuit = walk(vec![qreg("q", Some("1")), TopLevel::Eof]).unwrap();
        assert_eq!(circuit.num_qubits(), 1);
    }

    #[test]
    fn test_unsupported_version() {
        let err = walk(vec![version("3.0"), qreg("q", Some("1")), TopLevel::Eof]).unwrap_err();
        assert!(matches!(err, LowerError::UnsupportedVersion(v) if v == "3.0"));
    }

    #[test]
    fn test_late_version_is_unexpected() {
        let err = walk(vec![qreg("q", None), version("2.0"), TopLevel::Eof]).unwrap_err();
        assert!(matches!(err, LowerError::UnexpectedElement(_)));
    }

    #[test]
    fn test_missing_eof() {
        let err = walk(vec![qreg("q", None)]).unwrap_err();
        assert!(matches!(err, LowerError::UnexpectedElement(_)));

        let err = walk(vec![]).unwrap_err();
        assert!(matches!(err, LowerError::UnexpectedElement(text) if text == "empty program"));
    }

    #[test]
    fn test_scope_is_unexpected() {
        let err = walk(vec![
            TopLevel::StatementOrScope(StatementOrScope::Scope(vec![])),
            TopLevel::Eof,
        ])
        .unwrap_err();
        assert!(matches!(err, LowerError::UnexpectedElement(_)));
    }

    #[test]
    fn test_include_ignored() {
        let circuit = walk(vec![
            stmt(Statement::Include(IncludeStatement {
                path: "qelib1.inc".to_string(),
            })),
            TopLevel::Eof,
        ])
        .unwrap();
        assert_eq!(circuit.num_qubits(), 0);
    }

    #[test]
    fn test_other_statement_is_unexpected() {
        let err = walk(vec![
            stmt(Statement::Other(Opaque {
                rule: Rule::ResetStatement,
                text: "reset q;".to_string(),
            })),
            TopLevel::Eof,
        ])
        .unwrap_err();
        assert!(matches!(err, LowerError::UnexpectedStatement(text) if text.contains("reset")));
    }

    #[test]
    fn test_invalid_designator() {
        let err = walk(vec![
            stmt(Statement::OldStyleDeclaration(OldStyleDeclarationStatement {
                kind: Terminal::new(TerminalKind::Qreg, "qreg"),
                identifier: "q".to_string(),
                designator: Some(Designator {
                    expression: Expression::literal(TerminalKind::FloatLiteral, "2.5"),
                }),
            })),
            TopLevel::Eof,
        ])
        .unwrap_err();
        assert!(matches!(err, LowerError::InvalidDesignator(_)));
    }

    #[test]
    fn test_unknown_declaration_kind() {
        let err = walk(vec![
            decl(TerminalKind::Identifier, "reg", "q", None),
            TopLevel::Eof,
        ])
        .unwrap_err();
        assert!(matches!(err, LowerError::UnexpectedStatement(_)));
    }

    #[test]
    fn test_duplicate_declaration() {
        let err = walk(vec![qreg("q", Some("2")), qreg("q", None), TopLevel::Eof]).unwrap_err();
        assert!(matches!(err, LowerError::DuplicateDeclaration(name) if name == "q"));
    }
}
