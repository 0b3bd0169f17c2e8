//! Reference parser producing the syntax tree.

mod expression;
mod statement;

use crate::error::{ParseError, ParseResult};
use crate::lexer::{SpannedToken, Token, tokenize};
use crate::tree::{Program, TopLevel, Version};

/// Deepest expression or scope nesting the parser descends into.
pub const MAX_NESTING: usize = 256;

/// Parse a source string into a syntax tree.
pub fn parse(source: &str) -> ParseResult<Program> {
    let mut parser = Parser::new(source)?;
    parser.parse_program()
}

/// Parser state.
pub(super) struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<SpannedToken>,
    pub(super) pos: usize,
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Create a new parser from source.
    fn new(source: &'src str) -> ParseResult<Self> {
        let mut tokens = Vec::new();

        for result in tokenize(source) {
            match result {
                Ok(t) => tokens.push(t),
                Err((span, message)) => {
                    return Err(ParseError::LexerError {
                        line: line_of(source, span.start),
                        message,
                    });
                }
            }
        }

        Ok(Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
        })
    }

    /// Run `f` one nesting level deeper, failing past [`MAX_NESTING`].
    pub(super) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                line: self.line(),
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Check if we've reached the end.
    pub(super) fn is_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Peek at the current token.
    pub(super) fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).map(|t| t.token)
    }

    /// Peek `n` tokens ahead of the current one.
    pub(super) fn peek_nth(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).map(|t| t.token)
    }

    /// Advance and return the current token.
    pub(super) fn advance(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    /// Source text of the token at `index`.
    pub(super) fn text_at(&self, index: usize) -> &'src str {
        self.tokens
            .get(index)
            .map_or("", |t| &self.source[t.span.clone()])
    }

    /// Source text of the current token.
    pub(super) fn current_text(&self) -> &'src str {
        self.text_at(self.pos)
    }

    /// Source text covering tokens `start..self.pos`.
    pub(super) fn slice_from(&self, start: usize) -> &'src str {
        if start >= self.pos {
            return "";
        }
        let begin = self.tokens[start].span.start;
        let end = self.tokens[self.pos - 1].span.end;
        &self.source[begin..end]
    }

    /// Line number (1-based) of the current token, or of the end of input.
    pub(super) fn line(&self) -> usize {
        let offset = self
            .tokens
            .get(self.pos)
            .map_or(self.source.len(), |t| t.span.start);
        line_of(self.source, offset)
    }

    /// Build the error for an unexpected current token.
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        if self.is_eof() {
            ParseError::UnexpectedEof(expected.into())
        } else {
            ParseError::UnexpectedToken {
                line: self.line(),
                expected: expected.into(),
                found: format!("'{}'", self.current_text()),
            }
        }
    }

    /// Expect a specific token, returning its source text.
    pub(super) fn expect(&mut self, expected: Token) -> ParseResult<&'src str> {
        if self.check(expected) {
            let text = self.current_text();
            self.pos += 1;
            Ok(text)
        } else {
            Err(self.unexpected(&expected.to_string()))
        }
    }

    /// Check if current token matches.
    pub(super) fn check(&self, token: Token) -> bool {
        self.peek() == Some(token)
    }

    /// Consume token if it matches.
    pub(super) fn consume(&mut self, token: Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Parse the entire program.
    fn parse_program(&mut self) -> ParseResult<Program> {
        let mut children = Vec::new();
        while !self.is_eof() {
            if self.check(Token::OpenQasm) {
                children.push(TopLevel::Version(self.parse_version()?));
            } else {
                children.push(TopLevel::StatementOrScope(
                    self.parse_statement_or_scope()?,
                ));
            }
        }
        children.push(TopLevel::Eof);
        Ok(Program { children })
    }

    /// Parse `OPENQASM <specifier>;`.
    fn parse_version(&mut self) -> ParseResult<Version> {
        self.expect(Token::OpenQasm)?;
        let specifier = match self.peek() {
            Some(Token::FloatLiteral | Token::DecimalIntegerLiteral) => {
                let text = self.current_text();
                self.pos += 1;
                text.to_string()
            }
            _ => return Err(self.unexpected("version number")),
        };
        self.expect(Token::Semicolon)?;
        Ok(Version { specifier })
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset.min(source.len())]
        .bytes()
        .filter(|b| *b == b'\n')
        .count()
        + 1
}
