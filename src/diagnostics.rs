//! Diagnostic collection shared across interpreter stages.
//!
//! The lexer, parser, and interpreter all report problems into a single
//! [`Diagnostics`] sink instead of aborting. Each stage keeps going
//! after a report, so one run surfaces as many problems as possible.
//! The driver consults the sink between stages and drains it when a
//! run (or a REPL line) finishes.
//!
//! Rendering follows the classic Lox formats:
//!
//! ```text
//! [line 4] Error at ')': Expected expression.
//! Undefined variable 'a'.
//! [line 2]
//! ```
//!
//! # Example
//!
//! ```rust
//! use loxide::{parse_source, Diagnostics};
//!
//! let mut diagnostics = Diagnostics::new();
//! parse_source("print (1;", &mut diagnostics);
//!
//! assert!(diagnostics.has_syntax_errors());
//! for diagnostic in diagnostics.drain() {
//!     eprintln!("{diagnostic}");
//! }
//! ```

use std::fmt;

use crate::error::{LexError, ParseError, RuntimeError};

/// A single reported problem, tagged by the stage that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A problem found while scanning
    Lex(LexError),
    /// A problem found while parsing
    Parse(ParseError),
    /// A problem found while evaluating
    Runtime(RuntimeError),
}

impl Diagnostic {
    /// Returns true for lexical and parse diagnostics.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Diagnostic::Lex(_) | Diagnostic::Parse(_))
    }

    /// Returns true for runtime diagnostics.
    pub fn is_runtime(&self) -> bool {
        matches!(self, Diagnostic::Runtime(_))
    }
}

impl From<LexError> for Diagnostic {
    fn from(error: LexError) -> Self {
        Diagnostic::Lex(error)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(error: ParseError) -> Self {
        Diagnostic::Parse(error)
    }
}

impl From<RuntimeError> for Diagnostic {
    fn from(error: RuntimeError) -> Self {
        Diagnostic::Runtime(error)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Lex(error) => {
                write!(f, "[line {}] Error: {error}", error.span().line)
            }
            Diagnostic::Parse(error) => {
                let line = error.span().line;
                match error {
                    ParseError::UnexpectedToken { at_eof: true, .. } => {
                        write!(f, "[line {line}] Error at end: {error}")
                    }
                    ParseError::UnexpectedToken { found, .. } => {
                        write!(f, "[line {line}] Error at '{found}': {error}")
                    }
                    ParseError::InvalidAssignmentTarget { .. } => {
                        write!(f, "[line {line}] Error at '=': {error}")
                    }
                }
            }
            Diagnostic::Runtime(error) => {
                write!(f, "{error}\n[line {}]", error.span().line)
            }
        }
    }
}

/// A FIFO collection of diagnostics from every stage.
///
/// Reports preserve their order, so draining prints problems exactly as
/// they were encountered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn report(&mut self, diagnostic: impl Into<Diagnostic>) {
        self.entries.push(diagnostic.into());
    }

    /// Returns true if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if any lexical or parse diagnostics were recorded.
    pub fn has_syntax_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_syntax)
    }

    /// Returns true if any runtime diagnostics were recorded.
    pub fn has_runtime_errors(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_runtime)
    }

    /// Iterates over the recorded diagnostics in report order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    /// Removes and returns all recorded diagnostics in report order.
    pub fn drain(&mut self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.entries.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;

    #[test]
    fn test_report_preserves_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(LexError::UnexpectedChar {
            ch: '$',
            span: Span::new(0, 1, 1, 1),
        });
        diagnostics.report(RuntimeError::UndefinedVariable {
            name: "a".into(),
            span: Span::new(2, 3, 2, 1),
        });

        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.has_syntax_errors());
        assert!(diagnostics.has_runtime_errors());
        assert_eq!(diagnostics.iter().filter(|d| d.is_syntax()).count(), 1);

        let drained: Vec<_> = diagnostics.drain().collect();
        assert!(matches!(drained[0], Diagnostic::Lex(_)));
        assert!(matches!(drained[1], Diagnostic::Runtime(_)));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lex_rendering() {
        let diagnostic = Diagnostic::Lex(LexError::UnexpectedChar {
            ch: '$',
            span: Span::new(0, 1, 3, 1),
        });
        assert_eq!(diagnostic.to_string(), "[line 3] Error: Unexpected character.");
    }

    #[test]
    fn test_parse_rendering() {
        let at_token = Diagnostic::Parse(ParseError::UnexpectedToken {
            message: "Expected expression.".into(),
            found: ")".into(),
            at_eof: false,
            span: Span::new(4, 5, 1, 5),
        });
        assert_eq!(
            at_token.to_string(),
            "[line 1] Error at ')': Expected expression."
        );

        let at_end = Diagnostic::Parse(ParseError::UnexpectedToken {
            message: "Expected expression.".into(),
            found: String::new(),
            at_eof: true,
            span: Span::new(9, 9, 2, 1),
        });
        assert_eq!(at_end.to_string(), "[line 2] Error at end: Expected expression.");
    }

    #[test]
    fn test_runtime_rendering() {
        let diagnostic = Diagnostic::Runtime(RuntimeError::UndefinedVariable {
            name: "a".into(),
            span: Span::new(6, 7, 4, 7),
        });
        assert_eq!(diagnostic.to_string(), "Undefined variable 'a'.\n[line 4]");
    }
}
