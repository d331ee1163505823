//! `rulelang` — a minimal REPL driver over the front-end (spec §4.7).
//!
//! Reads one line at a time, tokenizes it, parses it as a statement
//! stream, applies the literal reducer, and prints the resulting AST.
//! Lex/parse failures are caught at the loop boundary and printed; the
//! loop continues with the next line. `--file` batch-parses a whole
//! file instead of reading stdin interactively.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rulelang_lex::Lexer;
use rulelang_syntax::{accept_stmt, parse_program, LiteralReducer};

/// A line-oriented REPL for the rulelang front-end.
#[derive(Parser, Debug)]
#[command(name = "rulelang")]
#[command(author, version, about = "REPL driver for the rulelang front-end")]
struct Cli {
    /// Parse this file as a single batch instead of reading stdin.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the token stream before the parsed AST.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.file {
        Some(path) => run_batch(path, cli.verbose),
        None => run_interactive(cli.verbose),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}

/// Batch mode: parse a whole file as one statement stream (spec §6.5's
/// "batch driver ... would abort on first error" — no per-line recovery
/// here, unlike [`run_interactive`]).
fn run_batch(path: &PathBuf, verbose: bool) -> anyhow::Result<()> {
    let source = fs::read_to_string(path)?;
    if verbose {
        print_tokens(&source);
    }
    let statements = parse_program(&source)
        .map_err(|e| anyhow::anyhow!("{} in {}: {e}", error_category(&e), path.display()))?;
    for stmt in statements {
        let reduced = accept_stmt(stmt, &mut LiteralReducer);
        println!("{reduced}");
    }
    Ok(())
}

/// Interactive mode: one `Result`-producing parse per line, caught at
/// the loop boundary and printed so a bad line doesn't end the session
/// (spec §4.7, §7's "line-level driver ... catches at the statement-
/// stream boundary and resumes with the next line").
fn run_interactive(verbose: bool) -> anyhow::Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                editor.add_history_entry(line.as_str()).ok();
                run_line(&line, verbose);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_line(line: &str, verbose: bool) {
    tracing::debug!(line, "parsing one REPL line");
    if verbose {
        print_tokens(line);
    }
    match parse_program(line) {
        Ok(statements) => {
            tracing::debug!(count = statements.len(), "parsed statements");
            for stmt in statements {
                let reduced = accept_stmt(stmt, &mut LiteralReducer);
                println!("{reduced}");
            }
        }
        Err(err) => eprintln!("{}: {err}", error_category(&err)),
    }
}

fn print_tokens(source: &str) {
    let mut lexer = Lexer::new(source);
    loop {
        match lexer.head() {
            Ok(tok) => {
                let text = tok.to_string();
                let is_eof = matches!(tok, rulelang_lex::Token::Eof);
                println!("  {text}");
                if is_eof || lexer.advance().is_err() {
                    break;
                }
            }
            Err(err) => {
                eprintln!("  lexical error: {err}");
                break;
            }
        }
    }
}

/// Map an error to the short category name spec §7 asks user-visible
/// messages to indicate.
fn error_category(err: &rulelang_util::Error) -> &'static str {
    match err {
        rulelang_util::Error::Lexical { .. } => "lexical error",
        rulelang_util::Error::Syntax { .. } => "syntax error",
        rulelang_util::Error::Indentation { .. } => "indentation error",
        rulelang_util::Error::Internal { .. } => "internal error",
    }
}
