//! # Loxide - A tree-walking interpreter for Lox
//!
//! Loxide implements the core of the Lox programming language: a lexer
//! that turns source text into tokens, a recursive descent parser that
//! builds an abstract syntax tree, and an evaluator that executes that
//! tree against a chained lexical environment.
//!
//! The three stages run as pure transformations over each other's
//! output and share a single [`Diagnostics`] sink. Every stage keeps
//! going after an error, so one run reports as many problems as it
//! can find:
//!
//! ```text
//! source -> Lexer -> tokens -> Parser -> statements -> Interpreter -> output
//!             |                  |                          |
//!             +-----------> Diagnostics <-------------------+
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use loxide::eval::Interpreter;
//! use loxide::{parse_source, Diagnostics};
//!
//! let source = r#"
//! var total = 0;
//! for (var i = 1; i <= 4; i = i + 1) total = total + i;
//! print total;
//! "#;
//!
//! let mut diagnostics = Diagnostics::new();
//! let statements = parse_source(source, &mut diagnostics);
//! assert!(diagnostics.is_empty());
//!
//! let mut interpreter = Interpreter::with_output(Vec::new());
//! interpreter.interpret(&statements, &mut diagnostics);
//! assert_eq!(interpreter.into_output(), b"10\n");
//! ```
//!
//! ## Language Surface
//!
//! The core covers variable declarations, blocks with lexical scoping,
//! `if`/`else`, `while`, `for` (lowered to `while` at parse time),
//! `print`, and expression statements over the primitive values `nil`,
//! booleans, numbers, and strings. Functions, classes, and closures are
//! outside this crate's scope.
//!
//! ## Modules
//!
//! - [`ast`]: Span, expression, and statement tree definitions
//! - [`lexer`]: Tokenization of Lox source text
//! - [`parser`]: Recursive descent parser producing statement trees
//! - [`precedence`]: Binding-power tables for expression parsing
//! - [`eval`]: Runtime values, environments, and the interpreter
//! - [`error`]: Error types with source location information
//! - [`diagnostics`]: The shared diagnostic sink and its rendering

#![doc(html_root_url = "https://docs.rs/loxide/0.1.0")]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod ast;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod precedence;

// Re-exports for convenience
pub use ast::{Expr, Literal, Span, Stmt};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use error::{LexError, ParseError, RuntimeError};
pub use eval::{Environment, Interpreter, Value};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::Parser;

/// Scans and parses a Lox source string into a list of statements.
///
/// This is the primary entry point for turning source text into an
/// executable tree. Problems found along the way are reported to
/// `diagnostics`; malformed statements are dropped from the output, so
/// the returned list is always safe to hand to the interpreter.
///
/// # Example
///
/// ```rust
/// use loxide::{parse_source, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// let statements = parse_source("var x = 1; print x;", &mut diagnostics);
///
/// assert_eq!(statements.len(), 2);
/// assert!(diagnostics.is_empty());
/// ```
pub fn parse_source(source: &str, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
    let tokens = Lexer::new(source).scan_tokens(diagnostics);
    let mut parser = Parser::new(tokens);
    parser.parse(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_source_pipeline() {
        let mut diagnostics = Diagnostics::new();
        let statements = parse_source("print 1 + 2;", &mut diagnostics);
        assert_eq!(statements.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_source_collects_errors_from_both_stages() {
        let mut diagnostics = Diagnostics::new();
        let statements = parse_source("var x = @;", &mut diagnostics);
        assert!(statements.is_empty());
        assert!(diagnostics.has_syntax_errors());
    }
}
