//! Serialization round trips for tokens and trees.
//!
//! Only compiled with the `serde` feature:
//! `cargo test --features serde`

#![cfg(feature = "serde")]

use loxide::lexer::Lexer;
use loxide::{parse_source, Diagnostics, Stmt, Token};

#[test]
fn test_tokens_round_trip_through_json() {
    let mut diagnostics = Diagnostics::new();
    let tokens = Lexer::new("var x = 1.5;").scan_tokens(&mut diagnostics);

    let json = serde_json::to_string(&tokens).unwrap();
    let decoded: Vec<Token> = serde_json::from_str(&json).unwrap();

    assert_eq!(tokens, decoded);
}

#[test]
fn test_statements_round_trip_through_json() {
    let mut diagnostics = Diagnostics::new();
    let statements = parse_source(
        "var a = \"s\"; if (a) { print a and nil; } for (;;) print 1;",
        &mut diagnostics,
    );
    assert!(diagnostics.is_empty());

    let json = serde_json::to_string(&statements).unwrap();
    let decoded: Vec<Stmt> = serde_json::from_str(&json).unwrap();

    assert_eq!(statements, decoded);
}
