//! Statement parsing.

use super::Parser;
use crate::error::{ParseError, ParseResult};
use crate::lexer::Token;
use crate::tree::{
    AssignmentStatement, AssignmentValue, Designator, GateCallStatement, GateOperand,
    IncludeStatement, IndexOperator, IndexedIdentifier, OldStyleDeclarationStatement, Opaque,
    Rule, Statement, StatementOrScope, Terminal, TerminalKind,
};

/// Statement keywords that are lexed as identifiers and kept as text.
fn keyword_rule(word: &str) -> Option<Rule> {
    Some(match word {
        "qubit" => Rule::QuantumDeclarationStatement,
        "bit" | "int" | "uint" | "float" | "angle" | "bool" | "complex" | "duration"
        | "stretch" | "array" => Rule::ClassicalDeclarationStatement,
        "const" => Rule::ConstDeclarationStatement,
        "reset" => Rule::ResetStatement,
        "barrier" => Rule::BarrierStatement,
        "delay" => Rule::DelayStatement,
        "gate" => Rule::GateStatement,
        "def" | "defcal" | "extern" | "cal" => Rule::DefStatement,
        "if" => Rule::IfStatement,
        "for" => Rule::ForStatement,
        "while" => Rule::WhileStatement,
        "box" => Rule::BoxStatement,
        "let" | "input" | "output" | "return" | "break" | "continue" | "end" | "opaque"
        | "pragma" | "defcalgrammar" => Rule::OtherStatement,
        _ => return None,
    })
}

impl Parser<'_> {
    /// Parse a statement or a braced scope.
    pub(super) fn parse_statement_or_scope(&mut self) -> ParseResult<StatementOrScope> {
        if !self.check(Token::LBrace) {
            return Ok(StatementOrScope::Statement(self.parse_statement()?));
        }

        let open_line = self.line();
        self.advance();
        let mut body = Vec::new();
        loop {
            match self.peek() {
                Some(Token::RBrace) => {
                    self.advance();
                    return Ok(StatementOrScope::Scope(body));
                }
                Some(_) => body.push(self.nested(|p| p.parse_statement_or_scope())?),
                None => {
                    return Err(ParseError::Unclosed {
                        delimiter: '{',
                        line: open_line,
                    });
                }
            }
        }
    }

    /// Parse a statement.
    fn parse_statement(&mut self) -> ParseResult<Statement> {
        let token = self
            .peek()
            .ok_or_else(|| ParseError::UnexpectedEof("statement".into()))?;

        match token {
            Token::Include => self.parse_include(),
            Token::Qreg | Token::Creg => self.parse_old_style_declaration(),
            Token::Measure => self.parse_opaque(Rule::MeasureArrowAssignmentStatement),
            Token::Ctrl | Token::NegCtrl | Token::Inv | Token::Pow => {
                Ok(Statement::GateCall(self.parse_gate_call()?))
            }
            Token::Identifier => {
                if let Some(rule) = keyword_rule(self.current_text()) {
                    self.parse_opaque(rule)
                } else if self.is_assignment() {
                    Ok(Statement::Assignment(self.parse_assignment()?))
                } else {
                    Ok(Statement::GateCall(self.parse_gate_call()?))
                }
            }
            _ => Err(self.unexpected("statement")),
        }
    }

    /// Parse include statement.
    fn parse_include(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Include)?;
        let quoted = self.expect(Token::StringLiteral)?;
        self.expect(Token::Semicolon)?;
        Ok(Statement::Include(IncludeStatement {
            path: quoted.trim_matches('"').to_string(),
        }))
    }

    /// Parse `qreg`/`creg` declaration.
    fn parse_old_style_declaration(&mut self) -> ParseResult<Statement> {
        let kind = match self.advance() {
            Some(Token::Qreg) => Terminal::new(TerminalKind::Qreg, "qreg"),
            Some(Token::Creg) => Terminal::new(TerminalKind::Creg, "creg"),
            _ => return Err(self.unexpected("qreg or creg")),
        };
        let identifier = self.expect(Token::Identifier)?.to_string();
        let designator = if self.check(Token::LBracket) {
            Some(self.parse_designator()?)
        } else {
            None
        };
        self.expect(Token::Semicolon)?;

        Ok(Statement::OldStyleDeclaration(OldStyleDeclarationStatement {
            kind,
            identifier,
            designator,
        }))
    }

    /// Parse `[expr]`.
    fn parse_designator(&mut self) -> ParseResult<Designator> {
        self.expect(Token::LBracket)?;
        let expression = self.parse_expression()?;
        self.expect(Token::RBracket)?;
        Ok(Designator { expression })
    }

    /// Parse a gate call, including any leading modifiers.
    fn parse_gate_call(&mut self) -> ParseResult<GateCallStatement> {
        let mut modifiers = Vec::new();
        while matches!(
            self.peek(),
            Some(Token::Ctrl | Token::NegCtrl | Token::Inv | Token::Pow)
        ) {
            let start = self.pos;
            self.advance();
            if self.consume(Token::LParen) {
                self.parse_expression()?;
                self.expect(Token::RParen)?;
            }
            modifiers.push(self.slice_from(start).to_string());
            self.expect(Token::At)?;
        }

        let identifier = self.expect(Token::Identifier)?.to_string();

        let arguments = if self.consume(Token::LParen) {
            let args = self.parse_expression_list()?;
            self.expect(Token::RParen)?;
            Some(args)
        } else {
            None
        };

        let designator = if self.check(Token::LBracket) {
            Some(self.parse_designator()?)
        } else {
            None
        };

        let mut operands = Vec::new();
        if !self.check(Token::Semicolon) {
            operands.push(self.parse_gate_operand()?);
            while self.consume(Token::Comma) {
                operands.push(self.parse_gate_operand()?);
            }
        }
        self.expect(Token::Semicolon)?;

        Ok(GateCallStatement {
            modifiers,
            identifier,
            arguments,
            designator,
            operands,
        })
    }

    /// Parse a gate operand.
    pub(super) fn parse_gate_operand(&mut self) -> ParseResult<GateOperand> {
        match self.peek() {
            Some(Token::HardwareQubit) => {
                let text = self.current_text().to_string();
                self.advance();
                Ok(GateOperand::HardwareQubit(text))
            }
            Some(Token::Identifier) => {
                Ok(GateOperand::IndexedIdentifier(self.parse_indexed_identifier()?))
            }
            _ => Err(self.unexpected("gate operand")),
        }
    }

    /// Parse `name[...][...]`.
    fn parse_indexed_identifier(&mut self) -> ParseResult<IndexedIdentifier> {
        let identifier = self.expect(Token::Identifier)?.to_string();
        let mut indices = Vec::new();
        while self.check(Token::LBracket) {
            indices.push(self.parse_index_operator()?);
        }
        Ok(IndexedIdentifier {
            identifier,
            indices,
        })
    }

    /// Parse one `[...]` index operator.
    fn parse_index_operator(&mut self) -> ParseResult<IndexOperator> {
        let open_line = self.line();
        self.expect(Token::LBracket)?;

        if self.index_is_plain(open_line)? {
            let exprs = self.parse_expression_list()?;
            if exprs.is_empty() {
                return Err(self.unexpected("index expression"));
            }
            self.expect(Token::RBracket)?;
            return Ok(IndexOperator::Expressions(exprs));
        }

        // Ranges and sets: keep the inner text.
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Some(Token::RBracket) if depth == 0 => break,
                Some(Token::LBracket | Token::LParen | Token::LBrace) => depth += 1,
                Some(Token::RBracket | Token::RParen | Token::RBrace) => {
                    depth = depth.saturating_sub(1);
                }
                Some(_) => {}
                None => {
                    return Err(ParseError::Unclosed {
                        delimiter: '[',
                        line: open_line,
                    });
                }
            }
            self.advance();
        }
        let text = self.slice_from(start).to_string();
        self.expect(Token::RBracket)?;
        Ok(IndexOperator::Opaque(text))
    }

    /// Whether the index operator starting at the current token holds only
    /// comma-separated expressions (no range colon, no set braces).
    fn index_is_plain(&self, open_line: usize) -> ParseResult<bool> {
        let mut depth = 0usize;
        for spanned in &self.tokens[self.pos..] {
            match spanned.token {
                Token::RBracket if depth == 0 => return Ok(true),
                Token::Colon | Token::LBrace if depth == 0 => return Ok(false),
                Token::LBracket | Token::LParen => depth += 1,
                Token::RBracket | Token::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
        }
        Err(ParseError::Unclosed {
            delimiter: '[',
            line: open_line,
        })
    }

    /// Look past `name[...]...` for an assignment operator.
    fn is_assignment(&self) -> bool {
        let mut n = 1;
        let mut depth = 0usize;
        loop {
            match self.peek_nth(n) {
                Some(Token::LBracket) => depth += 1,
                Some(Token::RBracket) if depth > 0 => depth -= 1,
                Some(Token::Eq | Token::CompoundAssign) if depth == 0 => return true,
                Some(_) if depth > 0 => {}
                _ => return false,
            }
            n += 1;
        }
    }

    /// Parse `target = value;`.
    fn parse_assignment(&mut self) -> ParseResult<AssignmentStatement> {
        let target = self.parse_indexed_identifier()?;
        let op = match self.peek() {
            Some(Token::Eq) => Terminal::new(TerminalKind::Equals, "="),
            Some(Token::CompoundAssign) => {
                Terminal::new(TerminalKind::CompoundAssignment, self.current_text())
            }
            _ => return Err(self.unexpected("assignment operator")),
        };
        self.advance();

        let value = if self.consume(Token::Measure) {
            AssignmentValue::Measure(self.parse_gate_operand()?)
        } else {
            AssignmentValue::Expression(self.parse_expression()?)
        };
        self.expect(Token::Semicolon)?;

        Ok(AssignmentStatement { target, op, value })
    }

    /// Consume a statement the tree keeps as text, up to its terminating
    /// `;` or closing brace.
    fn parse_opaque(&mut self, rule: Rule) -> ParseResult<Statement> {
        let start = self.pos;
        let start_line = self.line();
        let mut depth = 0usize;
        loop {
            let Some(token) = self.advance() else {
                return Err(if depth > 0 {
                    ParseError::Unclosed {
                        delimiter: '{',
                        line: start_line,
                    }
                } else {
                    ParseError::UnexpectedEof("';'".into())
                });
            };
            match token {
                Token::LBrace => depth += 1,
                Token::RBrace => {
                    if depth == 0 {
                        self.pos -= 1;
                        return Err(self.unexpected("';'"));
                    }
                    depth -= 1;
                    if depth == 0
                        && !(self.check(Token::Identifier) && self.current_text() == "else")
                    {
                        break;
                    }
                }
                Token::Semicolon if depth == 0 => break,
                _ => {}
            }
        }

        Ok(Statement::Other(Opaque {
            rule,
            text: self.slice_from(start).to_string(),
        }))
    }
}
