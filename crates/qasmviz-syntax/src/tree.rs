//! Syntax tree for the `OpenQASM` dialect.
//!
//! The tree keeps one enum variant per grammar-rule shape. Shapes that the
//! lowering pass does not understand are still represented (as
//! [`Statement::Other`], [`StatementOrScope::Scope`], [`Expression::Unary`],
//! ...) so that a consumer can reject them by matching on the tag.
//!
//! Every node implements `Display`, rendering it back to QASM-like text.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

/// Root of a parsed source file.
///
/// The last child is always [`TopLevel::Eof`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub children: Vec<TopLevel>,
}

/// A direct child of [`Program`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TopLevel {
    /// `OPENQASM <specifier>;`
    Version(Version),
    StatementOrScope(StatementOrScope),
    /// End of input.
    Eof,
}

/// Version declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// The specifier exactly as written, e.g. `2.0` or `3`.
    pub specifier: String,
}

/// Either a statement or a braced block of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StatementOrScope {
    Statement(Statement),
    Scope(Vec<StatementOrScope>),
}

/// A concrete statement, tagged by grammar rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Include(IncludeStatement),
    OldStyleDeclaration(OldStyleDeclarationStatement),
    GateCall(GateCallStatement),
    Assignment(AssignmentStatement),
    /// Any other statement rule, kept as source text.
    Other(Opaque),
}

/// `include "file";`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncludeStatement {
    pub path: String,
}

/// `qreg name[size];` or `creg name;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OldStyleDeclarationStatement {
    /// The `qreg`/`creg` keyword.
    pub kind: Terminal,
    pub identifier: String,
    pub designator: Option<Designator>,
}

/// Bracketed size expression, `[expr]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Designator {
    pub expression: Expression,
}

/// `modifiers @ name(args)[duration] operands;`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateCallStatement {
    /// Modifier source text, e.g. `ctrl` or `pow(2)`.
    pub modifiers: Vec<String>,
    pub identifier: String,
    /// `None` when the call has no parenthesized argument list at all.
    pub arguments: Option<Vec<Expression>>,
    pub designator: Option<Designator>,
    pub operands: Vec<GateOperand>,
}

/// A qubit operand of a gate call or measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateOperand {
    IndexedIdentifier(IndexedIdentifier),
    /// Physical qubit, `$n`.
    HardwareQubit(String),
}

/// `name` followed by zero or more `[...]` index operators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedIdentifier {
    pub identifier: String,
    pub indices: Vec<IndexOperator>,
}

/// One `[...]` index operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexOperator {
    /// Comma-separated plain expressions.
    Expressions(Vec<Expression>),
    /// Ranges or sets, kept as source text.
    Opaque(String),
}

/// `target = value;` and compound forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStatement {
    pub target: IndexedIdentifier,
    /// `=` or a compound assignment operator.
    pub op: Terminal,
    pub value: AssignmentValue,
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AssignmentValue {
    /// `measure operand`
    Measure(GateOperand),
    Expression(Expression),
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// `lhs op rhs`
    Binary {
        lhs: Box<Expression>,
        op: Terminal,
        rhs: Box<Expression>,
    },
    /// A single literal or identifier token.
    Literal(Terminal),
    /// `( expr )`
    Parenthesis(Box<Expression>),
    /// `-expr`, `~expr`, `!expr`
    Unary { op: Terminal, operand: Box<Expression> },
    /// `name(args)`
    Call {
        name: String,
        arguments: Vec<Expression>,
    },
}

impl Expression {
    /// Build a binary node.
    pub fn binary(lhs: Expression, op: Terminal, rhs: Expression) -> Self {
        Expression::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Build a leaf node.
    pub fn literal(kind: TerminalKind, text: impl Into<String>) -> Self {
        Expression::Literal(Terminal::new(kind, text))
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// Computed without recursion, so it is safe on arbitrarily deep trees.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            match expr {
                Expression::Binary { lhs, rhs, .. } => {
                    pending.push((lhs.as_ref(), depth + 1));
                    pending.push((rhs.as_ref(), depth + 1));
                }
                Expression::Parenthesis(inner) | Expression::Unary { operand: inner, .. } => {
                    pending.push((inner.as_ref(), depth + 1));
                }
                Expression::Call { arguments, .. } => {
                    pending.extend(arguments.iter().map(|arg| (arg, depth + 1)));
                }
                Expression::Literal(_) => {}
            }
        }
        deepest
    }

    /// Move the direct children out, leaving empty leaves behind.
    fn detach_children(&mut self, into: &mut Vec<Expression>) {
        match self {
            Expression::Binary { lhs, rhs, .. } => {
                into.push(mem::replace(lhs.as_mut(), Expression::empty()));
                into.push(mem::replace(rhs.as_mut(), Expression::empty()));
            }
            Expression::Parenthesis(inner) | Expression::Unary { operand: inner, .. } => {
                into.push(mem::replace(inner.as_mut(), Expression::empty()));
            }
            Expression::Call { arguments, .. } => into.append(arguments),
            Expression::Literal(_) => {}
        }
    }

    /// A leaf that owns no heap memory.
    fn empty() -> Self {
        Expression::Literal(Terminal {
            kind: TerminalKind::Identifier,
            text: String::new(),
        })
    }
}

impl Drop for Expression {
    // Long operator chains are as deep as they are long; unwind them with an
    // explicit stack instead of the default recursive drop.
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

/// A leaf token together with its exact source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    pub kind: TerminalKind,
    pub text: String,
}

impl Terminal {
    pub fn new(kind: TerminalKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Token kinds that can appear as a [`Terminal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalKind {
    // Declaration kinds
    Qreg,
    Creg,

    // Literals
    DecimalIntegerLiteral,
    BinaryIntegerLiteral,
    OctalIntegerLiteral,
    HexIntegerLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    BooleanLiteral,
    Identifier,

    // Operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    DoubleAsterisk,
    Tilde,
    ExclamationPoint,

    // Assignment
    Equals,
    CompoundAssignment,
}

/// Grammar rules that the tree keeps only as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    QuantumDeclarationStatement,
    ClassicalDeclarationStatement,
    ConstDeclarationStatement,
    MeasureArrowAssignmentStatement,
    ResetStatement,
    BarrierStatement,
    DelayStatement,
    GateStatement,
    DefStatement,
    IfStatement,
    ForStatement,
    WhileStatement,
    BoxStatement,
    OtherStatement,
}

/// A statement the tree does not model structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opaque {
    pub rule: Rule,
    /// Source text of the whole statement.
    pub text: String,
}

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            if !matches!(child, TopLevel::Eof) {
                writeln!(f, "{child}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for TopLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopLevel::Version(v) => write!(f, "{v}"),
            TopLevel::StatementOrScope(s) => write!(f, "{s}"),
            TopLevel::Eof => write!(f, "<EOF>"),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OPENQASM {};", self.specifier)
    }
}

impl fmt::Display for StatementOrScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementOrScope::Statement(s) => write!(f, "{s}"),
            StatementOrScope::Scope(body) => write!(f, "{{ {} }}", join(body, " ")),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Include(s) => write!(f, "{s}"),
            Statement::OldStyleDeclaration(s) => write!(f, "{s}"),
            Statement::GateCall(s) => write!(f, "{s}"),
            Statement::Assignment(s) => write!(f, "{s}"),
            Statement::Other(s) => write!(f, "{s}"),
        }
    }
}

impl fmt::Display for IncludeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "include \"{}\";", self.path)
    }
}

impl fmt::Display for OldStyleDeclarationStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.identifier)?;
        if let Some(d) = &self.designator {
            write!(f, "{d}")?;
        }
        write!(f, ";")
    }
}

impl fmt::Display for Designator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.expression)
    }
}

impl fmt::Display for GateCallStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for m in &self.modifiers {
            write!(f, "{m} @ ")?;
        }
        write!(f, "{}", self.identifier)?;
        if let Some(args) = &self.arguments {
            write!(f, "({})", join(args, ", "))?;
        }
        if let Some(d) = &self.designator {
            write!(f, "{d}")?;
        }
        if !self.operands.is_empty() {
            write!(f, " {}", join(&self.operands, ", "))?;
        }
        write!(f, ";")
    }
}

impl fmt::Display for GateOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateOperand::IndexedIdentifier(id) => write!(f, "{id}"),
            GateOperand::HardwareQubit(q) => write!(f, "{q}"),
        }
    }
}

impl fmt::Display for IndexedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier)?;
        for index in &self.indices {
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl fmt::Display for IndexOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexOperator::Expressions(exprs) => write!(f, "[{}]", join(exprs, ", ")),
            IndexOperator::Opaque(text) => write!(f, "[{text}]"),
        }
    }
}

impl fmt::Display for AssignmentStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {};", self.target, self.op, self.value)
    }
}

impl fmt::Display for AssignmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignmentValue::Measure(operand) => write!(f, "measure {operand}"),
            AssignmentValue::Expression(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a> {
            Node(&'a Expression),
            Text(&'a str),
        }

        // Pieces are pushed in reverse so they pop in source order.
        let mut pending = vec![Piece::Node(self)];
        while let Some(piece) = pending.pop() {
            let node = match piece {
                Piece::Text(text) => {
                    f.write_str(text)?;
                    continue;
                }
                Piece::Node(node) => node,
            };
            match node {
                Expression::Binary { lhs, op, rhs } => {
                    pending.push(Piece::Node(rhs.as_ref()));
                    pending.push(Piece::Text(&op.text));
                    pending.push(Piece::Node(lhs.as_ref()));
                }
                Expression::Literal(t) => f.write_str(&t.text)?,
                Expression::Parenthesis(inner) => {
                    pending.push(Piece::Text(")"));
                    pending.push(Piece::Node(inner.as_ref()));
                    pending.push(Piece::Text("("));
                }
                Expression::Unary { op, operand } => {
                    pending.push(Piece::Node(operand.as_ref()));
                    pending.push(Piece::Text(&op.text));
                }
                Expression::Call { name, arguments } => {
                    pending.push(Piece::Text(")"));
                    for (i, arg) in arguments.iter().enumerate().rev() {
                        pending.push(Piece::Node(arg));
                        if i > 0 {
                            pending.push(Piece::Text(", "));
                        }
                    }
                    pending.push(Piece::Text("("));
                    pending.push(Piece::Text(name));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl fmt::Display for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
