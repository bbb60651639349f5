//! Binding powers for Lox expression precedence.
//!
//! This module implements the Pratt-parsing precedence tables used by
//! the parser's expression loop. Operators are assigned binding powers
//! that determine precedence and associativity:
//! - Higher binding power = tighter binding
//! - For infix operators: (left_bp, right_bp)
//!   - left < right = left associative
//!   - left > right = right associative
//!
//! The expression loop stops folding when an operator's left binding
//! power drops below the current minimum, and recurses into the right
//! operand with the operator's right binding power.
//!
//! # Precedence Table
//!
//! From lowest to highest:
//! 1. Assignment `=` (2, 1) - right associative
//! 2. Logical or `or` (3, 4) - left associative
//! 3. Logical and `and` (5, 6) - left associative
//! 4. Equality `==`, `!=` (7, 8) - left associative
//! 5. Comparison `<`, `<=`, `>`, `>=` (9, 10) - left associative
//! 6. Additive `+`, `-` (11, 12) - left associative
//! 7. Multiplicative `*`, `/` (13, 14) - left associative
//! 8. Prefix `!`, `-` (15) - right associative

use crate::lexer::TokenKind;

/// Returns the binding power (left, right) for infix operators.
///
/// Returns `None` when the token is not an infix operator, which is
/// how the expression loop detects the end of an expression.
pub fn infix_binding_power(op: TokenKind) -> Option<(u8, u8)> {
    Some(match op {
        // Assignment (loosest, right-assoc)
        TokenKind::Equal => (2, 1),

        // Logical or (left-assoc)
        TokenKind::Or => (3, 4),

        // Logical and (left-assoc)
        TokenKind::And => (5, 6),

        // Equality (left-assoc)
        TokenKind::BangEqual | TokenKind::EqualEqual => (7, 8),

        // Comparison (left-assoc)
        TokenKind::Greater | TokenKind::GreaterEqual | TokenKind::Less | TokenKind::LessEqual => {
            (9, 10)
        }

        // Additive (left-assoc)
        TokenKind::Minus | TokenKind::Plus => (11, 12),

        // Multiplicative (left-assoc, tightest infix)
        TokenKind::Slash | TokenKind::Star => (13, 14),

        _ => return None,
    })
}

/// Returns the binding power for prefix operators.
///
/// Prefix operators bind tighter than every infix operator, and the
/// shared power makes them right associative: `--x` is `-(-x)`.
pub fn prefix_binding_power(op: TokenKind) -> Option<u8> {
    match op {
        TokenKind::Bang | TokenKind::Minus => Some(15),
        _ => None,
    }
}
