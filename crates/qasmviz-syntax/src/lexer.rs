//! Lexer for `OpenQASM` source text.

use logos::Logos;

/// Tokens for `OpenQASM`.
///
/// Tokens carry no payload; the parser slices the source by span to get the
/// exact text, so literals keep their original spelling.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/")]
pub enum Token {
    // Keywords
    #[token("OPENQASM")]
    OpenQasm,

    #[token("include")]
    Include,

    #[token("qreg")]
    Qreg,

    #[token("creg")]
    Creg,

    #[token("measure")]
    Measure,

    #[token("ctrl")]
    Ctrl,

    #[token("negctrl")]
    NegCtrl,

    #[token("inv")]
    Inv,

    #[token("pow")]
    Pow,

    #[token("true")]
    #[token("false")]
    BooleanLiteral,

    // Literals
    #[regex(r"[0-9][0-9_]*(\.[0-9_]*)?([eE][+-]?[0-9]+)?im")]
    ImaginaryLiteral,

    #[regex(r"[0-9][0-9_]*\.[0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatLiteral,

    #[regex(r"0[xX][0-9a-fA-F_]+")]
    HexIntegerLiteral,

    #[regex(r"0[bB][01_]+")]
    BinaryIntegerLiteral,

    #[regex(r"0o[0-7_]+")]
    OctalIntegerLiteral,

    #[regex(r"[0-9][0-9_]*")]
    DecimalIntegerLiteral,

    #[regex(r#""[^"]*""#)]
    StringLiteral,

    #[regex(r"\$[0-9]+")]
    HardwareQubit,

    // Identifiers
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Identifier,

    // Operators and punctuation
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("**")]
    Power,

    #[token("~")]
    Tilde,

    #[token("!")]
    Not,

    #[token("=")]
    Eq,

    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    CompoundAssign,

    #[token("->")]
    Arrow,

    #[token("@")]
    At,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token(",")]
    Comma,

    /// Operators the dialect does not model structurally (comparisons,
    /// bitwise, logical). They only appear inside statements kept as text.
    #[regex(r"==|!=|<=|>=|<<|>>|&&|\|\||[<>&|^.]")]
    OtherOperator,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Token::OpenQasm => "OPENQASM",
            Token::Include => "include",
            Token::Qreg => "qreg",
            Token::Creg => "creg",
            Token::Measure => "measure",
            Token::Ctrl => "ctrl",
            Token::NegCtrl => "negctrl",
            Token::Inv => "inv",
            Token::Pow => "pow",
            Token::BooleanLiteral => "boolean literal",
            Token::ImaginaryLiteral => "imaginary literal",
            Token::FloatLiteral => "float literal",
            Token::HexIntegerLiteral
            | Token::BinaryIntegerLiteral
            | Token::OctalIntegerLiteral
            | Token::DecimalIntegerLiteral => "integer literal",
            Token::StringLiteral => "string literal",
            Token::HardwareQubit => "hardware qubit",
            Token::Identifier => "identifier",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Power => "**",
            Token::Tilde => "~",
            Token::Not => "!",
            Token::Eq => "=",
            Token::CompoundAssign => "compound assignment",
            Token::Arrow => "->",
            Token::At => "@",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::Semicolon => ";",
            Token::Colon => ":",
            Token::Comma => ",",
            Token::OtherOperator => "operator",
        };
        f.write_str(text)
    }
}

/// A token with its span information.
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: std::ops::Range<usize>,
}

/// Tokenize a source string.
pub fn tokenize(source: &str) -> Vec<Result<SpannedToken, (std::ops::Range<usize>, String)>> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if let Ok(token) = result {
            tokens.push(Ok(SpannedToken { token, span }));
        } else {
            let slice = &source[span.clone()];
            tokens.push(Err((span, format!("Invalid token: '{slice}'"))));
        }
    }

    tokens
}
