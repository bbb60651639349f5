//! loxide - Run Lox scripts or start an interactive prompt
//!
//! # Usage
//!
//! ```bash
//! # Execute a script
//! loxide program.lox
//!
//! # Start the REPL
//! loxide
//! ```
//!
//! In file mode the whole script runs and the process exits non-zero
//! when problems were found: 65 for lexical or syntax errors, 70 for
//! runtime errors. The REPL reads one line at a time, prints any
//! diagnostics between lines, and keeps variable bindings alive
//! across lines.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use loxide::eval::Interpreter;
use loxide::{parse_source, Diagnostics};

/// Run Lox scripts or start an interactive prompt
#[derive(Parser, Debug)]
#[command(name = "loxide")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Lox script to execute; omit to start the REPL
    script: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match &args.script {
        Some(path) => run_file(path),
        None => run_prompt(),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

/// Executes a script file from start to finish.
///
/// All stages run even when earlier ones reported problems, so the
/// diagnostics printed at the end cover as much of the script as
/// possible.
fn run_file(path: &Path) -> anyhow::Result<ExitCode> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;

    let mut diagnostics = Diagnostics::new();
    let statements = parse_source(&source, &mut diagnostics);

    let mut interpreter = Interpreter::new();
    interpreter.interpret(&statements, &mut diagnostics);

    let had_syntax_errors = diagnostics.has_syntax_errors();
    let had_runtime_errors = diagnostics.has_runtime_errors();
    for diagnostic in diagnostics.drain() {
        eprintln!("{diagnostic}");
    }

    if had_syntax_errors {
        Ok(ExitCode::from(65))
    } else if had_runtime_errors {
        Ok(ExitCode::from(70))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Reads and runs statements one line at a time.
///
/// Bindings live in a single interpreter for the whole session, and
/// diagnostics are drained between lines so an error never stops the
/// session.
fn run_prompt() -> anyhow::Result<ExitCode> {
    println!("loxide {} interactive prompt", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut interpreter = Interpreter::new();
    let mut diagnostics = Diagnostics::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // end of input
        }

        let statements = parse_source(&line, &mut diagnostics);
        interpreter.interpret(&statements, &mut diagnostics);

        for diagnostic in diagnostics.drain() {
            eprintln!("{diagnostic}");
        }
    }

    Ok(ExitCode::SUCCESS)
}
