//! Interpreter configuration.
//!
//! Settings come from command-line flags first, then the environment,
//! then defaults.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    evaluator::evaluator::{ConditionalEvaluation, Evaluator},
    lexer::{lexer::Lexer, stream::spawn_lexer, tokens::Token},
};

/// Environment variable that turns on strict `if` when no flag decides it.
pub const STRICT_IF_VAR: &str = "INTERPRETER_STRICT_IF";

pub const USAGE: &str = "\
Usage: interpreter [options] [file]

Without a file an interactive prompt is started.

Options:
  --strict-if        Evaluate only the selected branch of `if`
  --eager-if         Evaluate both branches of `if` before selecting (default)
  --threaded-lexer   Produce tokens on a separate thread
  --echo-ast         Print the parsed program before its value (prompt only)
  -h, --help         Show this help message

Environment:
  INTERPRETER_STRICT_IF=1   Same as --strict-if
  RUST_LOG=interpreter=debug  Enable debug logging on stderr";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("unexpected argument `{0}`, a file was already given")]
    ExtraArgument(String),
    #[error("help requested")]
    HelpRequested,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    /// Source file to run; `None` starts the prompt.
    pub file: Option<PathBuf>,
    pub conditional: ConditionalEvaluation,
    pub threaded_lexer: bool,
    pub echo_ast: bool,
}

impl Config {
    /// Builds a configuration from arguments (without the program name) and
    /// an environment lookup.
    pub fn load<I, F>(args: I, env: F) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        let mut conditional = None;

        for arg in args {
            match arg.as_str() {
                "--strict-if" => conditional = Some(ConditionalEvaluation::Strict),
                "--eager-if" => conditional = Some(ConditionalEvaluation::Eager),
                "--threaded-lexer" => config.threaded_lexer = true,
                "--echo-ast" => config.echo_ast = true,
                "-h" | "--help" => return Err(ConfigError::HelpRequested),
                _ if arg.starts_with('-') => return Err(ConfigError::UnknownOption(arg)),
                _ if config.file.is_some() => return Err(ConfigError::ExtraArgument(arg)),
                _ => config.file = Some(PathBuf::from(arg)),
            }
        }

        config.conditional = conditional.unwrap_or_else(|| {
            match env(STRICT_IF_VAR).as_deref().map(str::trim) {
                Some("1") | Some("true") => ConditionalEvaluation::Strict,
                _ => ConditionalEvaluation::Eager,
            }
        });

        Ok(config)
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.conditional)
    }

    /// The token source for `source`, threaded or not.
    pub fn tokens(&self, source: &str) -> Box<dyn Iterator<Item = Token>> {
        if self.threaded_lexer {
            Box::new(spawn_lexer(source))
        } else {
            Box::new(Lexer::new(source))
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = Config::load(args(&[]), no_env).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.conditional, ConditionalEvaluation::Eager);
    }

    #[test]
    fn test_flags_and_file() {
        let config = Config::load(
            args(&["--strict-if", "--threaded-lexer", "--echo-ast", "main.mk"]),
            no_env,
        )
        .unwrap();

        assert_eq!(config.conditional, ConditionalEvaluation::Strict);
        assert!(config.threaded_lexer);
        assert!(config.echo_ast);
        assert_eq!(config.file, Some(PathBuf::from("main.mk")));
    }

    #[test]
    fn test_environment_enables_strict_if() {
        let env = |key: &str| (key == STRICT_IF_VAR).then(|| String::from("1"));

        let config = Config::load(args(&[]), env).unwrap();
        assert_eq!(config.conditional, ConditionalEvaluation::Strict);

        let overridden = Config::load(args(&["--eager-if"]), env).unwrap();
        assert_eq!(overridden.conditional, ConditionalEvaluation::Eager);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert_eq!(
            Config::load(args(&["--fast"]), no_env),
            Err(ConfigError::UnknownOption(String::from("--fast")))
        );
        assert_eq!(
            Config::load(args(&["a.mk", "b.mk"]), no_env),
            Err(ConfigError::ExtraArgument(String::from("b.mk")))
        );
        assert_eq!(
            Config::load(args(&["--help"]), no_env),
            Err(ConfigError::HelpRequested)
        );
    }

    #[test]
    fn test_threaded_token_source_matches_lexer() {
        let source = "let a = fn(x) { x + 1; };";
        let direct = Config::default().tokens(source).collect::<Vec<_>>();

        let threaded = Config {
            threaded_lexer: true,
            ..Config::default()
        }
        .tokens(source)
        .collect::<Vec<_>>();

        assert_eq!(direct, threaded);
    }
}
