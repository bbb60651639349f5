//! End-to-end interpreter scenarios.
//!
//! Each scenario runs a complete program through all three stages and
//! checks the produced output, the diagnostics, and the exit-status
//! classification a driver would derive from the sink.

use loxide::eval::Interpreter;
use loxide::{parse_source, Diagnostics};
use pretty_assertions::assert_eq;

/// Outcome of running a program end to end.
struct Run {
    stdout: String,
    stderr: Vec<String>,
    had_syntax_errors: bool,
    had_runtime_errors: bool,
}

impl Run {
    /// The exit code a file-mode driver reports for this run.
    fn exit_code(&self) -> u8 {
        if self.had_syntax_errors {
            65
        } else if self.had_runtime_errors {
            70
        } else {
            0
        }
    }
}

fn run(source: &str) -> Run {
    let mut diagnostics = Diagnostics::new();
    let statements = parse_source(source, &mut diagnostics);

    let mut interpreter = Interpreter::with_output(Vec::new());
    interpreter.interpret(&statements, &mut diagnostics);

    let had_syntax_errors = diagnostics.has_syntax_errors();
    let had_runtime_errors = diagnostics.has_runtime_errors();
    Run {
        stdout: String::from_utf8(interpreter.into_output()).unwrap(),
        stderr: diagnostics.drain().map(|d| d.to_string()).collect(),
        had_syntax_errors,
        had_runtime_errors,
    }
}

// ============================================
// 1. Golden Scenarios
// ============================================

#[test]
fn scenario_arithmetic_precedence() {
    let run = run("print 1 + 2 * 3;");
    assert_eq!(run.stdout, "7\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_variables_add() {
    let run = run("var a = 1; var b = 2; print a + b;");
    assert_eq!(run.stdout, "3\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_block_shadowing() {
    let run = run("var a = \"outer\"; { var a = \"inner\"; print a; } print a;");
    assert_eq!(run.stdout, "inner\nouter\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_while_loop() {
    let run = run("var i = 0; while (i < 3) { print i; i = i + 1; }");
    assert_eq!(run.stdout, "0\n1\n2\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_if_else() {
    let run = run("if (1 < 2) print \"yes\"; else print \"no\";");
    assert_eq!(run.stdout, "yes\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_undefined_variable() {
    let run = run("print a;");
    assert_eq!(run.stdout, "");
    assert_eq!(run.stderr, vec!["Undefined variable 'a'.\n[line 1]"]);
    assert_eq!(run.exit_code(), 70);
}

#[test]
fn scenario_mixed_plus_operands() {
    let run = run("print \"a\" + 1;");
    assert_eq!(run.stdout, "");
    assert_eq!(
        run.stderr,
        vec!["Operands must be two numbers or two strings.\n[line 1]"]
    );
    assert_eq!(run.exit_code(), 70);
}

#[test]
fn scenario_or_returns_operand() {
    let run = run("print nil or \"default\";");
    assert_eq!(run.stdout, "default\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_equality_is_type_strict() {
    let run = run("print 1 == \"1\";");
    assert_eq!(run.stdout, "false\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn scenario_for_loop() {
    let run = run("for (var i = 0; i < 2; i = i + 1) print i;");
    assert_eq!(run.stdout, "0\n1\n");
    assert_eq!(run.exit_code(), 0);
}

// ============================================
// 2. Boundary Cases
// ============================================

#[test]
fn test_empty_source_runs_silently() {
    let run = run("");
    assert_eq!(run.stdout, "");
    assert!(run.stderr.is_empty());
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn test_deeply_nested_blocks() {
    // Sixteen nested scopes, with the innermost one reading through
    // the whole chain.
    let mut source = String::from("var x = 1;");
    for _ in 0..16 {
        source.push('{');
    }
    source.push_str("print x;");
    for _ in 0..16 {
        source.push('}');
    }

    let run = run(&source);
    assert_eq!(run.stdout, "1\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn test_uninitialized_variable_prints_nil() {
    let run = run("var x; print x;");
    assert_eq!(run.stdout, "nil\n");
    assert_eq!(run.exit_code(), 0);
}

#[test]
fn test_string_concatenation_and_mixed_failure() {
    assert_eq!(run("print \"ab\" + \"cd\";").stdout, "abcd\n");

    let failed = run("print 1 + \"a\";");
    assert_eq!(
        failed.stderr,
        vec!["Operands must be two numbers or two strings.\n[line 1]"]
    );
}

#[test]
fn test_syntax_errors_win_exit_code_over_runtime() {
    // The malformed line is dropped, the valid line still runs and
    // fails at runtime; a driver reports the syntax exit code.
    let run = run("print ;\nprint ghost;");
    assert_eq!(run.exit_code(), 65);
    assert!(run.had_runtime_errors);
    assert_eq!(run.stderr.len(), 2);
}

#[test]
fn test_diagnostics_preserve_stage_order() {
    let run = run("@\nprint ghost;");
    assert_eq!(
        run.stderr,
        vec![
            "[line 1] Error: Unexpected character.",
            "Undefined variable 'ghost'.\n[line 2]",
        ]
    );
}

#[test]
fn test_lexical_error_does_not_stop_later_stages() {
    // The stray character is dropped during scanning; the rest of the
    // program still parses and runs.
    let run = run("var a = 1 @ + 2; print a;");
    assert_eq!(run.stdout, "3\n");
    assert_eq!(run.exit_code(), 65);
}

// ============================================
// 3. Round Trips
// ============================================

#[test]
fn test_ast_round_trip_through_printer() {
    let sources = [
        "print 1 + 2 * 3;",
        "print (1 + 2) * 3;",
        "var a = \"outer\"; { var a = \"inner\"; print a; }",
        "if (a and b or c) print !d; else e = -f;",
        "while (i < 3) { i = i + 1; }",
        "for (var i = 0; i < 2; i = i + 1) print i;",
        "print 2.5 + 0.125;",
    ];

    for source in sources {
        let mut diagnostics = Diagnostics::new();
        let first = parse_source(source, &mut diagnostics);
        assert!(diagnostics.is_empty(), "source: {source:?}");

        let printed: Vec<String> = first.iter().map(|s| s.to_string()).collect();
        let second = parse_source(&printed.join(" "), &mut diagnostics);
        assert!(diagnostics.is_empty(), "printed: {printed:?}");

        let reprinted: Vec<String> = second.iter().map(|s| s.to_string()).collect();
        assert_eq!(printed, reprinted, "source: {source:?}");
    }
}

#[test]
fn test_number_literals_survive_print_and_reparse() {
    for source in ["print 7;", "print 2.5;", "print 1234567.25;", "print 0.1;"] {
        let first = run(source).stdout;
        let second = run(&format!("print {};", first.trim())).stdout;
        assert_eq!(first, second, "source: {source:?}");
    }
}

#[test]
fn test_same_program_runs_identically_twice() {
    let source = "var total = 0; for (var i = 1; i <= 4; i = i + 1) total = total + i; print total;";
    assert_eq!(run(source).stdout, run(source).stdout);
    assert_eq!(run(source).stdout, "10\n");
}
