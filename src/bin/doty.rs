// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use doty::{
    cli::{self, CliError, ExitStatus},
    log::{LevelControl, Logger},
};

use anyhow::{Context, Result};
use clap::error::ErrorKind as ClapErrorKind;
use colored::Colorize;
use std::{env, io, path::Path, process::exit};

fn main() {
    let logger = match setup() {
        Ok(logger) => logger,
        Err(error) => {
            eprintln!("{}", format!("{error:#}").red());
            exit(ExitStatus::Failure.code());
        }
    };

    let argv = env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    let program = argv
        .first()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "doty".into());

    let result = cli::run(argv, &logger);
    if let Err(error) = &result {
        report(&program, error, &logger);
    }

    exit(ExitStatus::of(&result).code())
}

fn setup() -> Result<Logger> {
    let logger = Logger::init().context("cannot set up logging")?;
    ctrlc::set_handler(|| {
        eprintln!("{}", "Aborted by user...".red());
        exit(ExitStatus::Aborted.code());
    })
    .context("cannot install interrupt handler")?;

    Ok(logger)
}

fn report(program: &str, error: &CliError, logger: &Logger) {
    match error {
        CliError::Usage(error) if error.kind() == ClapErrorKind::DisplayVersion => {
            println!("{}: {}", program.green(), format!("v{}", env!("CARGO_PKG_VERSION")).blue());
        }
        CliError::Usage(error) => {
            if let Some(message) = unprinted_usage(error, error.print()) {
                eprintln!("{}", message.red());
            }
        }
        error if logger.is_debug() => eprintln!("{}", format!("{error:?}").red()),
        error => eprintln!("{}", error.to_string().red()),
    }
}

/// Fallback message for usage output clap failed to print.
fn unprinted_usage(error: &clap::Error, printed: io::Result<()>) -> Option<String> {
    printed
        .err()
        .map(|reason| format!("{}cannot print usage: {reason}", error.render()))
}
