use std::{
    env,
    fs::read_to_string,
    io::{self, BufReader},
    path::Path,
    process::ExitCode,
};

use interpreter::{
    config::{Config, ConfigError, USAGE},
    evaluator::environment::Environment,
    init_tracing, interpret, render_error,
    repl,
};
use tracing::debug;

fn main() -> ExitCode {
    init_tracing();

    let config = match Config::load(env::args().skip(1), |key| env::var(key).ok()) {
        Ok(config) => config,
        Err(ConfigError::HelpRequested) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(error) => {
            eprintln!("Error: {}", error);
            eprintln!();
            eprintln!("{}", USAGE);
            return ExitCode::from(2);
        }
    };
    debug!(?config, "starting");

    match &config.file {
        Some(path) => run_file(path, &config),
        None => run_prompt(&config),
    }
}

fn run_file(path: &Path, config: &Config) -> ExitCode {
    let source = match read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: could not read {}: {}", path.display(), error);
            return ExitCode::FAILURE;
        }
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    match interpret(&source, config, &Environment::new()) {
        Ok(value) => {
            println!("{}", value);
            if value.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(errors) => {
            for error in &errors {
                eprint!("{}", render_error(error, &source, &file_name));
            }
            ExitCode::FAILURE
        }
    }
}

fn run_prompt(config: &Config) -> ExitCode {
    let stdin = io::stdin();
    let reader = BufReader::new(stdin.lock());

    match repl::start(reader, io::stdout(), config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
