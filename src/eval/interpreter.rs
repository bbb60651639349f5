//! Statement and expression evaluation for Lox.
//!
//! This module implements the tree-walking evaluator: it executes the
//! statement list produced by the parser against a chained lexical
//! environment, writing `print` output to a configurable sink.
//!
//! A runtime error aborts the statement being executed (unwinding any
//! block scopes entered along the way), is reported to the shared
//! [`Diagnostics`] sink, and execution continues with the next
//! top-level statement.

use std::io::{self, Write};

use crate::ast::{Expr, Stmt};
use crate::diagnostics::Diagnostics;
use crate::error::RuntimeError;
use crate::eval::value::{Environment, Value};
use crate::lexer::{Token, TokenKind};

/// The tree-walking interpreter.
///
/// Holds the environment chain and the output sink that `print`
/// statements write to. The environment persists across calls to
/// [`interpret`](Interpreter::interpret), which is what lets a REPL
/// accumulate state line by line.
///
/// # Example
///
/// ```rust
/// use loxide::eval::Interpreter;
/// use loxide::{parse_source, Diagnostics};
///
/// let mut diagnostics = Diagnostics::new();
/// let statements = parse_source("print 1 + 2;", &mut diagnostics);
///
/// let mut interpreter = Interpreter::with_output(Vec::new());
/// interpreter.interpret(&statements, &mut diagnostics);
///
/// assert_eq!(interpreter.into_output(), b"3\n");
/// ```
#[derive(Debug)]
pub struct Interpreter<W = io::Stdout> {
    /// The environment chain; the first frame is the global scope
    env: Environment,

    /// Where `print` output goes
    out: W,
}

impl Interpreter {
    /// Creates an interpreter that prints to standard output.
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter that prints to the given sink.
    pub fn with_output(out: W) -> Self {
        Self {
            env: Environment::new(),
            out,
        }
    }

    /// Consumes the interpreter and returns its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Executes the statements in order.
    ///
    /// Each statement either completes or fails with a runtime error;
    /// failures are reported to `diagnostics` and execution continues
    /// with the next statement.
    pub fn interpret(&mut self, statements: &[Stmt], diagnostics: &mut Diagnostics) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                diagnostics.report(error);
            }
        }
    }

    /// Executes a single statement.
    fn execute(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(())
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                // print has no error channel; write failures are dropped.
                let _ = writeln!(self.out, "{value}");
                Ok(())
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                self.env.define(name.lexeme.clone(), value);
                Ok(())
            }
            Stmt::Block(statements) => self.execute_block(statements),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(())
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    self.execute(body)?;
                }
                Ok(())
            }
        }
    }

    /// Executes a block in a fresh child scope.
    ///
    /// The scope is released on every exit path, including when a
    /// contained statement fails.
    fn execute_block(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        self.env.push();
        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));
        self.env.pop();
        result
    }

    /// Evaluates an expression to a value.
    fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(literal) => Ok(Value::from(literal)),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { op, right } => self.eval_unary(op, right),
            Expr::Binary { left, op, right } => self.eval_binary(left, op, right),
            Expr::Logical { left, op, right } => self.eval_logical(left, op, right),
            Expr::Variable { name } => {
                self.env
                    .get(&name.lexeme)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.lexeme.clone(),
                        span: name.span,
                    })
            }
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                if self.env.assign(&name.lexeme, value.clone()) {
                    Ok(value)
                } else {
                    Err(RuntimeError::UndefinedVariable {
                        name: name.lexeme.clone(),
                        span: name.span,
                    })
                }
            }
        }
    }

    /// Evaluates a unary operation.
    fn eval_unary(&mut self, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let right = self.evaluate(right)?;

        match op.kind {
            TokenKind::Minus => match right {
                Value::Number(value) => Ok(Value::Number(-value)),
                _ => Err(RuntimeError::OperandMustBeNumber { span: op.span }),
            },
            TokenKind::Bang => Ok(Value::Bool(!right.is_truthy())),
            _ => unreachable!("parser produced unary operator {:?}", op.kind),
        }
    }

    /// Evaluates a binary operation. Both operands are evaluated, left
    /// first, before the operator is applied.
    fn eval_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;

        match op.kind {
            TokenKind::Plus => match (&left, &right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
                _ => Err(RuntimeError::OperandsMustBeNumbersOrStrings { span: op.span }),
            },
            TokenKind::Minus => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Number(a - b))
            }
            TokenKind::Star => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Number(a * b))
            }
            TokenKind::Slash => {
                let (a, b) = number_operands(op, &left, &right)?;
                // IEEE-754 semantics: a zero divisor yields an infinity
                // with the sign of the numerator, and 0/0 yields NaN.
                Ok(Value::Number(a / b))
            }
            TokenKind::Greater => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Bool(a > b))
            }
            TokenKind::GreaterEqual => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Bool(a >= b))
            }
            TokenKind::Less => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Bool(a < b))
            }
            TokenKind::LessEqual => {
                let (a, b) = number_operands(op, &left, &right)?;
                Ok(Value::Bool(a <= b))
            }
            TokenKind::EqualEqual => Ok(Value::Bool(left == right)),
            TokenKind::BangEqual => Ok(Value::Bool(left != right)),
            _ => unreachable!("parser produced binary operator {:?}", op.kind),
        }
    }

    /// Evaluates a short-circuiting `and`/`or`.
    ///
    /// The deciding operand is returned unchanged, not coerced to a
    /// boolean, and the right operand is only evaluated when needed.
    fn eval_logical(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;

        let short_circuits = match op.kind {
            TokenKind::Or => left.is_truthy(),
            _ => !left.is_truthy(),
        };

        if short_circuits {
            Ok(left)
        } else {
            self.evaluate(right)
        }
    }
}

/// Requires both operands to be numbers, or fails at the operator.
fn number_operands(op: &Token, left: &Value, right: &Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::OperandsMustBeNumbers { span: op.span }),
    }
}
