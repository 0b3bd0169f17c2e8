//! Error types for the reference front-end.

use thiserror::Error;

/// Errors that can occur while building a syntax tree from source text.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Lexer error (invalid token).
    #[error("Lexer error at line {line}: {message}")]
    LexerError { line: usize, message: String },

    /// Unexpected token.
    #[error("Unexpected token at line {line}: expected {expected}, found {found}")]
    UnexpectedToken {
        line: usize,
        expected: String,
        found: String,
    },

    /// Unexpected end of input.
    #[error("Unexpected end of input: expected {0}")]
    UnexpectedEof(String),

    /// Unbalanced braces or brackets.
    #[error("Unclosed '{delimiter}' opened at line {line}")]
    Unclosed { delimiter: char, line: usize },

    /// Expressions or scopes nested past the parser's limit.
    #[error("Nesting deeper than {limit} levels at line {line}")]
    NestingTooDeep { line: usize, limit: usize },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
