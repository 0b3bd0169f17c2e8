//! Display formatting of angle expressions.
//!
//! Two strategies share one entry point, selected by [`FormatMode`]:
//!
//! - **Numeric** evaluates the expression and reduces it to the nearest
//!   sixteenth of π (`π/2`, `3π/4`, `2π`), falling back to two decimals.
//! - **Symbolic** never evaluates; it re-renders the expression with display
//!   glyphs (`π`, `×`).

use qasmviz_syntax::syntax::{Expression, TerminalKind};
use std::f64::consts::PI;

use crate::config::FormatMode;
use crate::error::{LowerError, LowerResult};
use crate::eval::{check_depth, evaluate};

/// Finest fraction of π the numeric strategy recognises.
const PI_DENOMINATOR: i64 = 16;

/// Largest multiple of π/16 rendered as a fraction; past 2^53 sixteenths
/// adjacent integers are no longer distinguishable.
const MAX_SIXTEENTHS: f64 = 9_007_199_254_740_992.0;

/// Distance from an integer still treated as exact.
const TOLERANCE: f64 = 1e-5;

/// Display glyphs for identifiers in symbolic mode.
const SYMBOLS: &[(&str, &str)] = &[("pi", "π")];

/// Renders angle expressions for `displayArgs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionFormatter {
    mode: FormatMode,
}

impl ExpressionFormatter {
    pub fn new(mode: FormatMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> FormatMode {
        self.mode
    }

    /// Render `expr` with the configured strategy.
    pub fn format(&self, expr: &Expression) -> LowerResult<String> {
        match self.mode {
            FormatMode::Numeric => evaluate(expr).map(format_angle),
            FormatMode::Symbolic => {
                check_depth(expr)?;
                format_symbolic(expr)
            }
        }
    }
}

/// Render an angle in radians as a reduced fraction of π when it is a
/// multiple of π/16, else with two decimals.
#[allow(clippy::cast_possible_truncation)]
pub fn format_angle(value: f64) -> String {
    let sixteenths = value / PI * PI_DENOMINATOR as f64;
    let nearest = sixteenths.round();
    if nearest.abs() <= MAX_SIXTEENTHS && (sixteenths - nearest).abs() < TOLERANCE {
        pi_fraction(nearest as i64, PI_DENOMINATOR)
    } else {
        format!("{value:.2}")
    }
}

/// Render `numerator/denominator · π` in lowest terms.
fn pi_fraction(numerator: i64, denominator: i64) -> String {
    if numerator == 0 {
        return "0".to_string();
    }
    let divisor = gcd(numerator.unsigned_abs(), denominator.unsigned_abs());
    let num = numerator.unsigned_abs() / divisor;
    let den = denominator.unsigned_abs() / divisor;
    let sign = if numerator < 0 { "-" } else { "" };

    match (num, den) {
        (1, 1) => format!("{sign}π"),
        (n, 1) => format!("{sign}{n}π"),
        (1, d) => format!("{sign}π/{d}"),
        (n, d) => format!("{sign}{n}π/{d}"),
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Re-render an expression with display glyphs, without evaluating it.
fn format_symbolic(expr: &Expression) -> LowerResult<String> {
    match expr {
        Expression::Binary { lhs, op, rhs } => {
            let glyph = match op.kind {
                TerminalKind::Asterisk => "×",
                TerminalKind::Slash => "/",
                _ => return Err(LowerError::UnknownOperator(op.text.clone())),
            };
            Ok(format!(
                "{}{glyph}{}",
                format_symbolic(lhs)?,
                format_symbolic(rhs)?
            ))
        }
        Expression::Literal(terminal) => match terminal.kind {
            TerminalKind::DecimalIntegerLiteral | TerminalKind::FloatLiteral => {
                Ok(terminal.text.clone())
            }
            TerminalKind::Identifier => SYMBOLS
                .iter()
                .find(|(name, _)| *name == terminal.text)
                .map(|(_, glyph)| (*glyph).to_string())
                .ok_or_else(|| LowerError::UnknownIdentifier(terminal.text.clone())),
            _ => Err(LowerError::MalformedOperand(terminal.text.clone())),
        },
        other => Err(LowerError::MalformedOperand(other.to_string())),
    }
}
