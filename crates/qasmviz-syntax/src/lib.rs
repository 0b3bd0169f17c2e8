//! `OpenQASM` syntax tree and reference front-end for qasmviz
//!
//! The [`syntax`] module defines the tree the lowering pass consumes: one
//! enum variant per grammar-rule shape, with terminals that keep their exact
//! source text. [`parse`] is a small reference front-end that builds such a
//! tree from source; any other producer of the same tree works equally well.
//!
//! # Example
//!
//! ```rust
//! use qasmviz_syntax::parse;
//! use qasmviz_syntax::syntax::TopLevel;
//!
//! let program = parse(r#"
//!     OPENQASM 2.0;
//!     include "qelib1.inc";
//!     qreg q[2];
//!     rz(pi/2) q[0];
//!     cx q[0], q[1];
//! "#).unwrap();
//!
//! // Version, four statements, end of input.
//! assert_eq!(program.children.len(), 6);
//! assert_eq!(program.children.last(), Some(&TopLevel::Eof));
//! ```
//!
//! # Recognised Shapes
//!
//! | Shape | Example | Tree node |
//! |-------|---------|-----------|
//! | Version | `OPENQASM 2.0;` | `TopLevel::Version` |
//! | Include | `include "qelib1.inc";` | `Statement::Include` |
//! | Old-style declaration | `qreg q[2];`, `creg c;` | `Statement::OldStyleDeclaration` |
//! | Gate call | `rz(pi/2) q[0];` | `Statement::GateCall` |
//! | Assignment | `c = measure q[0];` | `Statement::Assignment` |
//! | Scope | `{ ... }` | `StatementOrScope::Scope` |
//! | Anything else | `reset q;`, `gate ... { }` | `Statement::Other` |

mod error;
mod lexer;
mod parser;
mod tree;

pub use error::{ParseError, ParseResult};
pub use parser::{MAX_NESTING, parse};

pub mod syntax {
    pub use crate::tree::*;
}
