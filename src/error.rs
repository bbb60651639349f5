//! Error types for the Lox interpreter.
//!
//! Each pipeline stage has its own error enum: [`LexError`] for
//! scanning, [`ParseError`] for parsing, and [`RuntimeError`] for
//! evaluation. All three carry a [`Span`] pointing at the offending
//! source location and render the exact user-facing message as their
//! `Display` form; the surrounding `[line N]` framing is added by
//! [`Diagnostic`](crate::diagnostics::Diagnostic) when errors are
//! reported.

use crate::ast::Span;
use thiserror::Error;

/// Errors that can occur during lexical analysis.
///
/// These errors are produced by the [`Lexer`](crate::lexer::Lexer) when
/// it encounters input outside the Lox lexical grammar. Scanning
/// continues after reporting, so a single pass surfaces every lexical
/// problem in the source.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character with no place in the Lox grammar was encountered.
    #[error("Unexpected character.")]
    UnexpectedChar {
        /// The unexpected character
        ch: char,
        /// Location in the source
        span: Span,
    },

    /// A string literal was still open when the source ended.
    #[error("Unterminated string")]
    UnterminatedString {
        /// Location of the opening quote
        span: Span,
    },
}

impl LexError {
    /// Returns the source span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedChar { span, .. } => *span,
            LexError::UnterminatedString { span } => *span,
        }
    }
}

/// Errors that can occur during parsing.
///
/// These errors are produced by the [`Parser`](crate::parser::Parser)
/// when the token stream does not match the grammar. They trigger
/// panic-mode synchronisation: the statement being parsed is dropped
/// and parsing resumes at the next statement boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The parser expected one construct but found another token.
    #[error("{message}")]
    UnexpectedToken {
        /// The user-facing message, e.g. "Expected ')' after expression."
        message: String,
        /// Lexeme of the offending token
        found: String,
        /// True when the offending token is the end-of-file sentinel
        at_eof: bool,
        /// Location of the offending token
        span: Span,
    },

    /// The left side of an `=` was not something assignable.
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget {
        /// Location of the `=` token
        span: Span,
    },
}

impl ParseError {
    /// Returns the source span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
            ParseError::InvalidAssignmentTarget { span } => *span,
        }
    }
}

/// Errors that can occur during evaluation.
///
/// A runtime error aborts the statement being executed, unwinding any
/// block scopes entered along the way; execution then continues with
/// the next top-level statement.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// A unary `-` was applied to a non-number.
    #[error("Operand must be a number.")]
    OperandMustBeNumber {
        /// Location of the operator
        span: Span,
    },

    /// A numeric binary operator was applied to non-numbers.
    #[error("Operands must be numbers.")]
    OperandsMustBeNumbers {
        /// Location of the operator
        span: Span,
    },

    /// `+` was applied to operands that are neither both numbers nor
    /// both strings.
    #[error("Operands must be two numbers or two strings.")]
    OperandsMustBeNumbersOrStrings {
        /// Location of the operator
        span: Span,
    },

    /// A variable was read or assigned before being defined.
    #[error("Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The variable name
        name: String,
        /// Location of the identifier
        span: Span,
    },
}

impl RuntimeError {
    /// Returns the source span where this error occurred.
    pub fn span(&self) -> Span {
        match self {
            RuntimeError::OperandMustBeNumber { span } => *span,
            RuntimeError::OperandsMustBeNumbers { span } => *span,
            RuntimeError::OperandsMustBeNumbersOrStrings { span } => *span,
            RuntimeError::UndefinedVariable { span, .. } => *span,
        }
    }
}
