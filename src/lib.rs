#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Once};

use crate::{
    config::Config,
    errors::errors::ParseError,
    evaluator::{environment::Env, value::Value},
    parser::parser::parse,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod evaluator;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod repl;

extern crate regex;

/// A 1-based row/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn start() -> Self {
        Position { row: 1, col: 1 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}, col {}", self.row, self.col)
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=interpreter=debug`
/// or `RUST_LOG=interpreter=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Parses `source` and, if it parsed cleanly, evaluates it in `env`.
pub fn interpret(source: &str, config: &Config, env: &Env) -> Result<Value, Vec<ParseError>> {
    let (program, errors) = parse(config.tokens(source));
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(config.evaluator().eval_program(&program, env))
}

/// Returns the text of the given 1-based row, or `None` past the end of the source.
pub fn get_line_at_row(source: &str, row: usize) -> Option<&str> {
    if row == 0 {
        return None;
    }

    source.split('\n').nth(row - 1).map(|line| line.trim_end_matches('\r'))
}


/// Renders a parse error with the offending source line and a caret under its column.
pub fn render_error(error: &ParseError, source: &str, file: &str) -> String {
    /*
        Error: UnexpectedToken (expected `=`, got `;`)
        -> final.mk
          |
        1 | let x;
          | ----^
    */

    let position = error.get_position();
    let line_string = position.row.to_string();
    let padding = line_string.len() + 2;

    let mut out = String::new();
    out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.kind()));
    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));

    let line_text = get_line_at_row(source, position.row).unwrap_or("");
    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = position.col.saturating_sub(removed_whitespace).max(1);
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}
