//! Expression parsing.

use super::Parser;
use crate::error::ParseResult;
use crate::lexer::Token;
use crate::tree::{Expression, Terminal, TerminalKind};

impl Parser<'_> {
    /// Parse an expression.
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_expr(0)
    }

    /// Parse binary expression with precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> ParseResult<Expression> {
        self.nested(|p| p.parse_binary_tail(min_prec))
    }

    fn parse_binary_tail(&mut self, min_prec: u8) -> ParseResult<Expression> {
        let mut left = self.parse_unary_expr()?;

        while let Some(kind) = self.peek_binary_op() {
            let prec = op_precedence(kind);
            if prec < min_prec {
                break;
            }
            let op = Terminal::new(kind, self.current_text());
            self.advance();

            // `**` is right-associative, everything else left-associative.
            let next_min = if kind == TerminalKind::DoubleAsterisk {
                prec
            } else {
                prec + 1
            };
            let right = self.parse_binary_expr(next_min)?;
            left = Expression::binary(left, op, right);
        }

        Ok(left)
    }

    /// Parse unary expression.
    fn parse_unary_expr(&mut self) -> ParseResult<Expression> {
        let kind = match self.peek() {
            Some(Token::Minus) => TerminalKind::Minus,
            Some(Token::Tilde) => TerminalKind::Tilde,
            Some(Token::Not) => TerminalKind::ExclamationPoint,
            _ => return self.parse_primary_expr(),
        };
        let op = Terminal::new(kind, self.current_text());
        self.advance();
        let operand = self.nested(|p| p.parse_unary_expr())?;
        Ok(Expression::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Parse primary expression.
    fn parse_primary_expr(&mut self) -> ParseResult<Expression> {
        let kind = match self.peek() {
            Some(Token::DecimalIntegerLiteral) => TerminalKind::DecimalIntegerLiteral,
            Some(Token::BinaryIntegerLiteral) => TerminalKind::BinaryIntegerLiteral,
            Some(Token::OctalIntegerLiteral) => TerminalKind::OctalIntegerLiteral,
            Some(Token::HexIntegerLiteral) => TerminalKind::HexIntegerLiteral,
            Some(Token::FloatLiteral) => TerminalKind::FloatLiteral,
            Some(Token::ImaginaryLiteral) => TerminalKind::ImaginaryLiteral,
            Some(Token::BooleanLiteral) => TerminalKind::BooleanLiteral,
            Some(Token::Identifier) => {
                if self.peek_nth(1) == Some(Token::LParen) {
                    return self.parse_call();
                }
                TerminalKind::Identifier
            }
            Some(Token::LParen) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(Token::RParen)?;
                return Ok(Expression::Parenthesis(Box::new(expr)));
            }
            _ => return Err(self.unexpected("expression")),
        };

        let literal = Expression::literal(kind, self.current_text());
        self.advance();
        Ok(literal)
    }

    /// Parse `name(args)`.
    fn parse_call(&mut self) -> ParseResult<Expression> {
        let name = self.expect(Token::Identifier)?.to_string();
        self.expect(Token::LParen)?;
        let arguments = self.parse_expression_list()?;
        self.expect(Token::RParen)?;
        Ok(Expression::Call { name, arguments })
    }

    /// Peek at binary operator.
    fn peek_binary_op(&self) -> Option<TerminalKind> {
        match self.peek()? {
            Token::Plus => Some(TerminalKind::Plus),
            Token::Minus => Some(TerminalKind::Minus),
            Token::Star => Some(TerminalKind::Asterisk),
            Token::Slash => Some(TerminalKind::Slash),
            Token::Percent => Some(TerminalKind::Percent),
            Token::Power => Some(TerminalKind::DoubleAsterisk),
            _ => None,
        }
    }

    /// Parse a comma-separated expression list, stopping before `)` or `]`.
    pub(super) fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        if self.check(Token::RParen) || self.check(Token::RBracket) {
            return Ok(vec![]);
        }
        let mut exprs = vec![self.parse_expression()?];
        while self.consume(Token::Comma) {
            exprs.push(self.parse_expression()?);
        }
        Ok(exprs)
    }
}

/// Get operator precedence.
fn op_precedence(kind: TerminalKind) -> u8 {
    match kind {
        TerminalKind::Plus | TerminalKind::Minus => 1,
        TerminalKind::Asterisk | TerminalKind::Slash | TerminalKind::Percent => 2,
        TerminalKind::DoubleAsterisk => 3,
        _ => 0,
    }
}
