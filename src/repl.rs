//! Interactive prompt.
//!
//! Every line is parsed and evaluated on its own against one root scope,
//! so bindings persist from line to line.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::{config::Config, evaluator::environment::Environment, parser::parser::parse};

pub const PROMPT: &str = ">> ";

pub fn start<R: BufRead, W: Write>(mut reader: R, mut writer: W, config: &Config) -> io::Result<()> {
    let env = Environment::new();
    let evaluator = config.evaluator();

    loop {
        write!(writer, "{}", PROMPT)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            writeln!(writer)?;
            return Ok(());
        }

        let (program, errors) = parse(config.tokens(&line));
        if !errors.is_empty() {
            for error in &errors {
                writeln!(writer, "{}", error)?;
            }
            continue;
        }

        if program.is_empty() {
            continue;
        }

        if config.echo_ast {
            writeln!(writer, "{}", program)?;
        }

        let value = evaluator.eval_program(&program, &env);
        debug!(%value, "evaluated line");
        writeln!(writer, "{}", value)?;
    }
}
