//! Lexical analysis for Lox.
//!
//! This module provides tokenization of Lox source text into the token
//! sequence consumed by the parser. The lexer handles single- and
//! two-character operators, line comments, string and number literals,
//! identifiers, and reserved keywords.
//!
//! Lexical errors go to the shared [`Diagnostics`] sink and scanning
//! continues with the next character, so one pass reports every
//! problem. The returned sequence always ends with a single
//! [`TokenKind::Eof`] token.
//!
//! # Example
//!
//! ```rust
//! use loxide::lexer::{Lexer, TokenKind};
//! use loxide::Diagnostics;
//!
//! let mut diagnostics = Diagnostics::new();
//! let tokens = Lexer::new("var answer = 42;").scan_tokens(&mut diagnostics);
//!
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Var,
//!         TokenKind::Identifier,
//!         TokenKind::Equal,
//!         TokenKind::Number,
//!         TokenKind::Semicolon,
//!         TokenKind::Eof,
//!     ]
//! );
//! assert!(diagnostics.is_empty());
//! ```

use crate::ast::{Literal, Span};
use crate::diagnostics::Diagnostics;
use crate::error::LexError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A lexical token produced by the lexer.
///
/// Tokens carry their kind, the exact source slice that produced them,
/// the decoded literal for number and string tokens, and source
/// location information for error reporting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token {
    /// The category of this token
    pub kind: TokenKind,

    /// The exact source text that produced this token
    pub lexeme: String,

    /// The decoded value for number and string tokens
    pub literal: Option<Literal>,

    /// Source location for error reporting
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            literal,
            span,
        }
    }
}

/// The category of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    // === Single-character tokens ===
    /// Left parenthesis `(`
    LeftParen,
    /// Right parenthesis `)`
    RightParen,
    /// Left brace `{`
    LeftBrace,
    /// Right brace `}`
    RightBrace,
    /// Comma `,`
    Comma,
    /// Dot `.`
    Dot,
    /// Minus `-`
    Minus,
    /// Plus `+`
    Plus,
    /// Semicolon `;`
    Semicolon,
    /// Slash `/`
    Slash,
    /// Star `*`
    Star,

    // === One- or two-character tokens ===
    /// Bang `!`
    Bang,
    /// Not-equal `!=`
    BangEqual,
    /// Assignment `=`
    Equal,
    /// Equality `==`
    EqualEqual,
    /// Greater-than `>`
    Greater,
    /// Greater-than-or-equal `>=`
    GreaterEqual,
    /// Less-than `<`
    Less,
    /// Less-than-or-equal `<=`
    LessEqual,

    // === Literals ===
    /// An identifier
    Identifier,
    /// A string literal
    String,
    /// A number literal
    Number,

    // === Keywords ===
    /// The `and` keyword
    And,
    /// The `class` keyword
    Class,
    /// The `else` keyword
    Else,
    /// The `false` keyword
    False,
    /// The `fun` keyword
    Fun,
    /// The `for` keyword
    For,
    /// The `if` keyword
    If,
    /// The `nil` keyword
    Nil,
    /// The `or` keyword
    Or,
    /// The `print` keyword
    Print,
    /// The `return` keyword
    Return,
    /// The `super` keyword
    Super,
    /// The `this` keyword
    This,
    /// The `true` keyword
    True,
    /// The `var` keyword
    Var,
    /// The `while` keyword
    While,

    // === Special ===
    /// End of file
    Eof,
}

impl TokenKind {
    /// Returns true for keywords that begin a new statement.
    ///
    /// The parser synchronises on these after a syntax error.
    pub fn starts_statement(&self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

/// The lexer for Lox source text.
///
/// The lexer scans through the source in a single forward pass,
/// tracking byte position and line/column for span construction.
///
/// # Example
///
/// ```rust
/// use loxide::lexer::{Lexer, TokenKind};
/// use loxide::Diagnostics;
///
/// let mut diagnostics = Diagnostics::new();
/// let tokens = Lexer::new("").scan_tokens(&mut diagnostics);
///
/// // Even empty source yields the end-of-file sentinel.
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].kind, TokenKind::Eof);
/// ```
pub struct Lexer<'a> {
    /// The source text being tokenized
    source: &'a str,

    /// Remaining source to process
    remaining: &'a str,

    /// Current byte position in source
    position: usize,

    /// Current line number (1-indexed)
    line: usize,

    /// Current column number (1-indexed)
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source text.
    pub fn new(source: &'a str) -> Self {
        Lexer {
            source,
            remaining: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scans the entire source into a token sequence.
    ///
    /// Lexical errors are reported to `diagnostics` and scanning
    /// continues from the next character. The returned vector always
    /// ends with exactly one [`TokenKind::Eof`] token.
    pub fn scan_tokens(mut self, diagnostics: &mut Diagnostics) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.remaining.is_empty() {
                tokens.push(Token::new(
                    TokenKind::Eof,
                    "",
                    None,
                    Span::new(self.position, self.position, self.line, self.column),
                ));
                break;
            }

            if let Some(token) = self.next_token(diagnostics) {
                tokens.push(token);
            }
        }

        tokens
    }

    /// Produces the next token, or reports a diagnostic and skips.
    fn next_token(&mut self, diagnostics: &mut Diagnostics) -> Option<Token> {
        let first = self.remaining.chars().next()?;

        if first == '"' {
            return self.scan_string(diagnostics);
        }

        if first.is_ascii_digit() {
            return Some(self.scan_number());
        }

        if first.is_ascii_alphabetic() || first == '_' {
            return Some(self.scan_identifier());
        }

        if let Some(token) = self.try_operator() {
            return Some(token);
        }

        let span = Span::new(
            self.position,
            self.position + first.len_utf8(),
            self.line,
            self.column,
        );
        self.advance(first.len_utf8());
        diagnostics.report(LexError::UnexpectedChar { ch: first, span });
        None
    }

    /// Skips whitespace and `//` line comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            let before = self.remaining.len();

            while let Some(ch) = self.remaining.chars().next() {
                if matches!(ch, ' ' | '\r' | '\t' | '\n') {
                    self.advance(ch.len_utf8());
                } else {
                    break;
                }
            }

            if self.remaining.starts_with("//") {
                self.skip_line_comment();
            }

            if self.remaining.len() == before {
                break;
            }
        }
    }

    /// Skips the rest of the current line.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.remaining.chars().next() {
            self.advance(ch.len_utf8());
            if ch == '\n' {
                break;
            }
        }
    }

    /// Scans a string literal.
    ///
    /// Strings run to the next `"` and may span lines. No escape
    /// processing is performed. Reaching end of source first reports an
    /// unterminated-string diagnostic and emits no token.
    fn scan_string(&mut self, diagnostics: &mut Diagnostics) -> Option<Token> {
        let start = self.position;
        let (line, column) = (self.line, self.column);

        self.advance(1); // opening quote

        while let Some(ch) = self.remaining.chars().next() {
            if ch == '"' {
                self.advance(1);
                let lexeme = &self.source[start..self.position];
                let content = lexeme[1..lexeme.len() - 1].to_string();
                return Some(Token::new(
                    TokenKind::String,
                    lexeme,
                    Some(Literal::String(content)),
                    Span::new(start, self.position, line, column),
                ));
            }
            self.advance(ch.len_utf8());
        }

        diagnostics.report(LexError::UnterminatedString {
            span: Span::new(start, self.position, line, column),
        });
        None
    }

    /// Scans a number literal: digits with an optional fractional part.
    ///
    /// A trailing `.` with no digit after it is left for the next token.
    fn scan_number(&mut self) -> Token {
        let start = self.position;
        let (line, column) = (self.line, self.column);

        self.consume_digits();

        if self.remaining.starts_with('.') {
            let mut lookahead = self.remaining.chars();
            lookahead.next();
            if lookahead.next().is_some_and(|ch| ch.is_ascii_digit()) {
                self.advance(1);
                self.consume_digits();
            }
        }

        let lexeme = &self.source[start..self.position];
        // Digits with at most one interior dot always parse.
        let value: f64 = lexeme.parse().unwrap();

        Token::new(
            TokenKind::Number,
            lexeme,
            Some(Literal::Number(value)),
            Span::new(start, self.position, line, column),
        )
    }

    /// Consumes a run of ASCII digits.
    fn consume_digits(&mut self) {
        while let Some(ch) = self.remaining.chars().next() {
            if ch.is_ascii_digit() {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        let start = self.position;
        let (line, column) = (self.line, self.column);

        while let Some(ch) = self.remaining.chars().next() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.advance(1);
            } else {
                break;
            }
        }

        let lexeme = &self.source[start..self.position];
        let kind = keyword_kind(lexeme).unwrap_or(TokenKind::Identifier);

        Token::new(
            kind,
            lexeme,
            None,
            Span::new(start, self.position, line, column),
        )
    }

    /// Tries to scan an operator or punctuation token.
    fn try_operator(&mut self) -> Option<Token> {
        let start = self.position;
        let (line, column) = (self.line, self.column);

        // Two-character operators win over their one-character prefixes.
        let (kind, len) = if self.remaining.starts_with("!=") {
            (TokenKind::BangEqual, 2)
        } else if self.remaining.starts_with("==") {
            (TokenKind::EqualEqual, 2)
        } else if self.remaining.starts_with("<=") {
            (TokenKind::LessEqual, 2)
        } else if self.remaining.starts_with(">=") {
            (TokenKind::GreaterEqual, 2)
        } else if self.remaining.starts_with('!') {
            (TokenKind::Bang, 1)
        } else if self.remaining.starts_with('=') {
            (TokenKind::Equal, 1)
        } else if self.remaining.starts_with('<') {
            (TokenKind::Less, 1)
        } else if self.remaining.starts_with('>') {
            (TokenKind::Greater, 1)
        } else if self.remaining.starts_with('(') {
            (TokenKind::LeftParen, 1)
        } else if self.remaining.starts_with(')') {
            (TokenKind::RightParen, 1)
        } else if self.remaining.starts_with('{') {
            (TokenKind::LeftBrace, 1)
        } else if self.remaining.starts_with('}') {
            (TokenKind::RightBrace, 1)
        } else if self.remaining.starts_with(',') {
            (TokenKind::Comma, 1)
        } else if self.remaining.starts_with('.') {
            (TokenKind::Dot, 1)
        } else if self.remaining.starts_with('-') {
            (TokenKind::Minus, 1)
        } else if self.remaining.starts_with('+') {
            (TokenKind::Plus, 1)
        } else if self.remaining.starts_with(';') {
            (TokenKind::Semicolon, 1)
        } else if self.remaining.starts_with('/') {
            (TokenKind::Slash, 1)
        } else if self.remaining.starts_with('*') {
            (TokenKind::Star, 1)
        } else {
            return None;
        };

        self.advance(len);
        let lexeme = &self.source[start..self.position];

        Some(Token::new(
            kind,
            lexeme,
            None,
            Span::new(start, self.position, line, column),
        ))
    }

    /// Advances the lexer by the given number of bytes, updating
    /// line and column counters.
    fn advance(&mut self, bytes: usize) {
        let consumed = &self.remaining[..bytes];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.position += bytes;
        self.remaining = &self.source[self.position..];
    }
}

/// Returns the keyword kind for a lexeme, if it is a reserved word.
fn keyword_kind(lexeme: &str) -> Option<TokenKind> {
    match lexeme {
        "and" => Some(TokenKind::And),
        "class" => Some(TokenKind::Class),
        "else" => Some(TokenKind::Else),
        "false" => Some(TokenKind::False),
        "for" => Some(TokenKind::For),
        "fun" => Some(TokenKind::Fun),
        "if" => Some(TokenKind::If),
        "nil" => Some(TokenKind::Nil),
        "or" => Some(TokenKind::Or),
        "print" => Some(TokenKind::Print),
        "return" => Some(TokenKind::Return),
        "super" => Some(TokenKind::Super),
        "this" => Some(TokenKind::This),
        "true" => Some(TokenKind::True),
        "var" => Some(TokenKind::Var),
        "while" => Some(TokenKind::While),
        _ => None,
    }
}
