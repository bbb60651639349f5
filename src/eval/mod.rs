//! Expression and statement evaluation for Lox.
//!
//! This module provides the runtime half of the interpreter: the
//! [`Value`] representation, the chained [`Environment`], and the
//! tree-walking [`Interpreter`] itself.
//!
//! # Example
//!
//! ```rust
//! use loxide::eval::Interpreter;
//! use loxide::{parse_source, Diagnostics};
//!
//! let mut diagnostics = Diagnostics::new();
//! let statements = parse_source("var x = 2; print x * 21;", &mut diagnostics);
//!
//! let mut interpreter = Interpreter::with_output(Vec::new());
//! interpreter.interpret(&statements, &mut diagnostics);
//!
//! assert_eq!(interpreter.into_output(), b"42\n");
//! ```

pub mod interpreter;
pub mod value;

pub use interpreter::Interpreter;
pub use value::{Environment, Value};
