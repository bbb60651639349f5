//! Parser for Lox.
//!
//! This module provides a recursive descent parser that transforms the
//! token sequence into a list of statement trees. Statements follow
//! the grammar by straightforward descent; expressions use a Pratt
//! loop driven by the binding powers in [`crate::precedence`].
//!
//! The parser recovers from syntax errors with panic-mode
//! synchronisation: the offending statement is dropped, the error goes
//! to the shared [`Diagnostics`] sink, and parsing resumes at the next
//! statement boundary. The parser itself never fails fatally; the
//! end-of-file token terminates the top-level loop.
//!
//! # Example
//!
//! ```rust
//! use loxide::lexer::Lexer;
//! use loxide::parser::Parser;
//! use loxide::Diagnostics;
//!
//! let mut diagnostics = Diagnostics::new();
//! let tokens = Lexer::new("var x = 1; print x;").scan_tokens(&mut diagnostics);
//!
//! let mut parser = Parser::new(tokens);
//! let statements = parser.parse(&mut diagnostics);
//!
//! assert_eq!(statements.len(), 2);
//! assert!(diagnostics.is_empty());
//! ```

use crate::ast::{Expr, Literal, Span, Stmt};
use crate::diagnostics::Diagnostics;
use crate::error::ParseError;
use crate::lexer::{Token, TokenKind};
use crate::precedence::{infix_binding_power, prefix_binding_power};

/// The parser for Lox token sequences.
///
/// The parser walks the token vector with a cursor; it never mutates
/// the tokens themselves.
pub struct Parser {
    /// The token sequence, terminated by an end-of-file token
    tokens: Vec<Token>,

    /// Cursor into `tokens`
    current: usize,
}

impl Parser {
    /// Creates a new parser for the given token sequence.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        // The cursor helpers rely on a terminating EOF token.
        if !matches!(tokens.last(), Some(token) if token.kind == TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, "", None, Span::default()));
        }

        Parser { tokens, current: 0 }
    }

    /// Parses the token sequence into a list of statements.
    ///
    /// Malformed statements are dropped from the output; their errors
    /// are reported to `diagnostics` and parsing continues after
    /// synchronisation.
    pub fn parse(&mut self, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.declaration(diagnostics) {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    diagnostics.report(error);
                    self.synchronize();
                }
            }
        }

        statements
    }

    // === Statement Grammar ===

    /// declaration → varDecl | statement
    fn declaration(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        if self.matches(&[TokenKind::Var]) {
            self.var_declaration(diagnostics)
        } else {
            self.statement(diagnostics)
        }
    }

    /// varDecl → "var" IDENTIFIER ( "=" expression )? ";"
    fn var_declaration(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        let name = self.expect(TokenKind::Identifier, "Expected variable name.")?;

        let initializer = if self.matches(&[TokenKind::Equal]) {
            Some(self.expression(diagnostics)?)
        } else {
            None
        };

        self.expect(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    /// statement → exprStmt | printStmt | block | ifStmt | whileStmt | forStmt
    fn statement(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        if self.matches(&[TokenKind::Print]) {
            self.print_statement(diagnostics)
        } else if self.matches(&[TokenKind::If]) {
            self.if_statement(diagnostics)
        } else if self.matches(&[TokenKind::While]) {
            self.while_statement(diagnostics)
        } else if self.matches(&[TokenKind::For]) {
            self.for_statement(diagnostics)
        } else if self.matches(&[TokenKind::LeftBrace]) {
            Ok(Stmt::Block(self.block(diagnostics)))
        } else {
            self.expression_statement(diagnostics)
        }
    }

    /// printStmt → "print" expression ";"
    fn print_statement(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        let expr = self.expression(diagnostics)?;
        self.expect(TokenKind::Semicolon, "Expected ';' after value.")?;
        Ok(Stmt::Print(expr))
    }

    /// exprStmt → expression ";"
    fn expression_statement(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        let expr = self.expression(diagnostics)?;
        self.expect(TokenKind::Semicolon, "Expected ';' after expression.")?;
        Ok(Stmt::Expression(expr))
    }

    /// block → "{" declaration* "}"
    ///
    /// Recovery happens per contained declaration, so one bad statement
    /// does not take the rest of the block with it.
    fn block(&mut self, diagnostics: &mut Diagnostics) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            match self.declaration(diagnostics) {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    diagnostics.report(error);
                    self.synchronize();
                }
            }
        }

        if let Err(error) = self.expect(TokenKind::RightBrace, "Expected '}' after block.") {
            diagnostics.report(error);
        }

        statements
    }

    /// ifStmt → "if" "(" expression ")" statement ( "else" statement )?
    fn if_statement(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LeftParen, "Expected '(' after 'if'.")?;
        let condition = self.expression(diagnostics)?;
        self.expect(TokenKind::RightParen, "Expected ')' after condition.")?;

        let then_branch = Box::new(self.statement(diagnostics)?);
        let else_branch = if self.matches(&[TokenKind::Else]) {
            Some(Box::new(self.statement(diagnostics)?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// whileStmt → "while" "(" expression ")" statement
    fn while_statement(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LeftParen, "Expected '(' after 'while'.")?;
        let condition = self.expression(diagnostics)?;
        self.expect(TokenKind::RightParen, "Expected ')' after condition.")?;
        let body = Box::new(self.statement(diagnostics)?);

        Ok(Stmt::While { condition, body })
    }

    /// forStmt → "for" "(" (varDecl | exprStmt | ";") expression? ";" expression? ")" statement
    ///
    /// Lowered at parse time to the equivalent while loop:
    /// `{ init; while (cond) { body; incr; } }`. An omitted condition
    /// becomes `true`; omitted clauses skip their wrapping step.
    fn for_statement(&mut self, diagnostics: &mut Diagnostics) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::LeftParen, "Expected '(' after 'for'.")?;

        let initializer = if self.matches(&[TokenKind::Semicolon]) {
            None
        } else if self.matches(&[TokenKind::Var]) {
            Some(self.var_declaration(diagnostics)?)
        } else {
            Some(self.expression_statement(diagnostics)?)
        };

        let condition = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression(diagnostics)?)
        };
        self.expect(TokenKind::Semicolon, "Expected ';' after loop condition.")?;

        let increment = if self.check(TokenKind::RightParen) {
            None
        } else {
            Some(self.expression(diagnostics)?)
        };
        self.expect(TokenKind::RightParen, "Expected ')' after for clauses.")?;

        let mut body = self.statement(diagnostics)?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        let condition = condition.unwrap_or(Expr::Literal(Literal::Bool(true)));
        body = Stmt::While {
            condition,
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    // === Expression Grammar ===

    /// expression → assignment
    fn expression(&mut self, diagnostics: &mut Diagnostics) -> Result<Expr, ParseError> {
        self.parse_expr(0, diagnostics)
    }

    /// Parses an expression with the Pratt loop.
    ///
    /// `min_bp` is the minimum binding power for this context: the loop
    /// stops folding when the next operator binds looser than it.
    fn parse_expr(&mut self, min_bp: u8, diagnostics: &mut Diagnostics) -> Result<Expr, ParseError> {
        let mut lhs = self.unary(diagnostics)?;

        loop {
            let Some((left_bp, right_bp)) = infix_binding_power(self.peek().kind) else {
                break;
            };
            if left_bp < min_bp {
                break;
            }

            let op = self.advance().clone();
            let rhs = self.parse_expr(right_bp, diagnostics)?;

            lhs = match op.kind {
                TokenKind::Equal => match lhs {
                    Expr::Variable { name } => Expr::Assign {
                        name,
                        value: Box::new(rhs),
                    },
                    // The right-hand side is already consumed, so
                    // recovery continues from a clean position.
                    other => {
                        diagnostics
                            .report(ParseError::InvalidAssignmentTarget { span: op.span });
                        other
                    }
                },
                TokenKind::Or | TokenKind::And => Expr::Logical {
                    left: Box::new(lhs),
                    op,
                    right: Box::new(rhs),
                },
                _ => Expr::Binary {
                    left: Box::new(lhs),
                    op,
                    right: Box::new(rhs),
                },
            };
        }

        Ok(lhs)
    }

    /// unary → ( "!" | "-" ) unary | primary
    fn unary(&mut self, diagnostics: &mut Diagnostics) -> Result<Expr, ParseError> {
        if let Some(bp) = prefix_binding_power(self.peek().kind) {
            let op = self.advance().clone();
            let right = self.parse_expr(bp, diagnostics)?;
            return Ok(Expr::Unary {
                op,
                right: Box::new(right),
            });
        }

        self.primary(diagnostics)
    }

    /// primary → NUMBER | STRING | "true" | "false" | "nil"
    ///         | "(" expression ")" | IDENTIFIER
    fn primary(&mut self, diagnostics: &mut Diagnostics) -> Result<Expr, ParseError> {
        if self.matches(&[TokenKind::False]) {
            return Ok(Expr::Literal(Literal::Bool(false)));
        }
        if self.matches(&[TokenKind::True]) {
            return Ok(Expr::Literal(Literal::Bool(true)));
        }
        if self.matches(&[TokenKind::Nil]) {
            return Ok(Expr::Literal(Literal::Nil));
        }

        if self.matches(&[TokenKind::Number, TokenKind::String]) {
            let literal = self.previous().literal.clone().unwrap_or(Literal::Nil);
            return Ok(Expr::Literal(literal));
        }

        if self.matches(&[TokenKind::Identifier]) {
            return Ok(Expr::Variable {
                name: self.previous().clone(),
            });
        }

        if self.matches(&[TokenKind::LeftParen]) {
            let expr = self.expression(diagnostics)?;
            self.expect(TokenKind::RightParen, "Expected ')' after expression.")?;
            return Ok(Expr::Grouping(Box::new(expr)));
        }

        Err(self.error_at_current("Expected expression."))
    }

    // === Helper Methods ===

    /// Returns the token under the cursor.
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// Returns the most recently consumed token.
    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Returns true once the cursor reaches the end-of-file token.
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Consumes and returns the current token.
    ///
    /// At the end of input the cursor stays put, so the end-of-file
    /// token is returned from then on.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// Returns true if the current token has the given kind.
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consumes the current token if it has one of the given kinds.
    fn matches(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it has the given kind, or returns
    /// an error describing what was expected.
    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at_current(message))
        }
    }

    /// Builds a parse error pointing at the current token.
    fn error_at_current(&self, message: &str) -> ParseError {
        let token = self.peek();
        ParseError::UnexpectedToken {
            message: message.to_string(),
            found: token.lexeme.clone(),
            at_eof: token.kind == TokenKind::Eof,
            span: token.span,
        }
    }

    /// Discards tokens until a likely statement boundary.
    ///
    /// After a syntax error the parser skips forward until it has just
    /// passed a `;` or sits before a keyword that begins a statement,
    /// then resumes parsing declarations.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }
}
