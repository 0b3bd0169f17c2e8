//! Numeric evaluation of angle and size expressions.
//!
//! Accepted: decimal integer and float literals, the identifier `pi`, and
//! `*` / `/` between two such expressions. Anything else is rejected.

use qasmviz_syntax::syntax::{Expression, TerminalKind};
use std::f64::consts::PI;

use crate::error::{LowerError, LowerResult};

/// Deepest expression tree accepted by evaluation and formatting.
pub const MAX_EXPRESSION_DEPTH: usize = 256;

/// Reject expressions nested past [`MAX_EXPRESSION_DEPTH`].
pub(crate) fn check_depth(expr: &Expression) -> LowerResult<()> {
    if expr.depth() > MAX_EXPRESSION_DEPTH {
        return Err(LowerError::MalformedOperand(format!(
            "expression nested deeper than {MAX_EXPRESSION_DEPTH} levels"
        )));
    }
    Ok(())
}

/// Reduce an expression to a floating-point value.
pub fn evaluate(expr: &Expression) -> LowerResult<f64> {
    check_depth(expr)?;
    evaluate_node(expr)
}

fn evaluate_node(expr: &Expression) -> LowerResult<f64> {
    match expr {
        Expression::Binary { lhs, op, rhs } => {
            let l = evaluate_node(lhs)?;
            let r = evaluate_node(rhs)?;
            match op.kind {
                TerminalKind::Asterisk => Ok(l * r),
                TerminalKind::Slash => Ok(l / r),
                _ => Err(LowerError::UnknownOperator(op.text.clone())),
            }
        }
        Expression::Literal(terminal) => match terminal.kind {
            TerminalKind::DecimalIntegerLiteral | TerminalKind::FloatLiteral => {
                parse_number(&terminal.text)
            }
            TerminalKind::Identifier if terminal.text == "pi" => Ok(PI),
            TerminalKind::Identifier => Err(LowerError::UnknownIdentifier(terminal.text.clone())),
            _ => Err(LowerError::MalformedOperand(terminal.text.clone())),
        },
        other => Err(LowerError::MalformedOperand(other.to_string())),
    }
}

/// Interpret an evaluated value as a count or index.
///
/// Returns `None` unless the value is a finite, non-negative integer.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
pub fn as_index(value: f64) -> Option<usize> {
    // 2^53: beyond this not every integer is representable.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.is_finite() && value >= 0.0 && value.trunc() == value && value <= MAX_EXACT {
        Some(value as usize)
    } else {
        None
    }
}

fn parse_number(text: &str) -> LowerResult<f64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    digits
        .parse::<f64>()
        .map_err(|_| LowerError::MalformedOperand(text.to_string()))
}
