// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Command line interface.
//!
//! The command tree is made of __command groups__ that only hold other
//! commands, and __leaf commands__ that call into a domain operation. Every
//! node of the tree parses its own copy of the global flags, and merges them
//! into the [`GlobalOptions`] threaded through dispatch.
//!
//! # Default Commands
//!
//! Invoking a command group without naming one of its children falls back to
//! a default child. The node hands back [`Flow::Default`] naming that child,
//! and [`run`] rewrites the argument vector to include it before parsing the
//! whole thing again from scratch. Nothing carries over between passes except
//! the argument vector itself.
//!
//! | group         | default    |
//! |---------------|------------|
//! | `doty`        | `build`    |
//! | `crypto`      | `--help`   |
//! | `crypto file` | `--help`   |
//! | `crypto key`  | `genkey`   |
//! | `config`      | `show`     |
//! | `pkg`         | `status`   |
//! | `internal`    | `--help`   |

mod config;
mod crypto;
mod internal;
mod pkg;

use crate::{
    args::{add_cmd_to_args, move_global_args},
    core::{build, health, populate, BuildParams, HealthParams},
    error::{DotyError, ErrorKind, Payload},
    log::LevelControl,
    options::{GlobalOptions, LogLevel, OptionUpdate},
};

use clap::{ArgAction, Args, Parser, Subcommand};
use std::{io, path::PathBuf};
use tracing::debug;

/// Default child of the top-level command.
const DEFAULT_COMMAND: &str = "build";

/// Default child of groups that are only useful with a child.
const HELP: &str = "--help";

/// Redirects allowed before giving up on finding a leaf command.
const MAX_REDIRECTS: usize = 8;

/// Parse and execute command line.
///
/// Global flags typed before a subcommand are moved after it first. Command
/// groups invoked without a child are redirected to their default child.
///
/// # Errors
///
/// - Return [`CliError::Usage`] if the command line cannot be parsed, or help
///   or version information was requested.
/// - Return [`CliError::Doty`] if the selected operation fails.
/// - Return [`CliError::Io`] if output cannot be written.
pub fn run(argv: impl IntoIterator<Item = impl Into<String>>, logger: &impl LevelControl) -> Result<()> {
    let argv = argv.into_iter().map(Into::into).collect::<Vec<_>>();
    let mut argv = move_global_args(&argv);

    for _ in 0..MAX_REDIRECTS {
        let app = App::try_parse_from(&argv)?;
        let mut ctx = Context::new(logger);
        match app.dispatch(&mut ctx)? {
            Flow::Done => return Ok(()),
            Flow::Default(cmd) => {
                argv = move_global_args(&add_cmd_to_args(&argv, cmd));
                debug!("redirect to {argv:?}");
            }
        }
    }

    Err(DotyError::cli("no command to run", Payload::new().with("argv", argv)).into())
}

/// Outcome of dispatching one command node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    /// Leaf command ran.
    Done,

    /// Group was invoked without a child. Run it again with the named child.
    Default(&'static str),
}

/// State threaded through one dispatch pass.
#[derive(Debug)]
pub struct Context<'a, L>
where
    L: LevelControl,
{
    options: GlobalOptions,
    logger: &'a L,
}

impl<'a, L> Context<'a, L>
where
    L: LevelControl,
{
    /// Construct new context starting from default options.
    pub fn new(logger: &'a L) -> Self {
        Self {
            options: GlobalOptions::default(),
            logger,
        }
    }

    /// Merge flags parsed at current command node.
    pub fn merge(&mut self, update: OptionUpdate) {
        self.options.update(update, self.logger);
    }

    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }
}

/// A node of the command tree.
pub(crate) trait Dispatch {
    /// Merge this node's flags, then run it or pick a child.
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow>;
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "doty",
    about,
    version,
    disable_version_flag = true,
    override_usage = "doty [options] [<command>]",
    subcommand_help_heading = "Commands"
)]
pub struct App {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<AppCommand>,
}

impl Dispatch for App {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());

        match self.command {
            None => Ok(Flow::Default(DEFAULT_COMMAND)),
            Some(AppCommand::Health(opts)) => opts.dispatch(ctx),
            Some(AppCommand::Build(opts)) => {
                build(&opts.resolve(ctx))?;
                Ok(Flow::Done)
            }
            Some(AppCommand::Populate(opts)) => {
                populate(&opts.resolve(ctx))?;
                Ok(Flow::Done)
            }
            Some(AppCommand::Crypto(group)) => group.dispatch(ctx),
            Some(AppCommand::Config(group)) => group.dispatch(ctx),
            Some(AppCommand::Pkg(group)) => group.dispatch(ctx),
            Some(AppCommand::Internal(group)) => group.dispatch(ctx),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum AppCommand {
    /// Check that every required program is available.
    #[command(override_usage = "doty health [options]")]
    Health(HealthOptions),

    /// Build dotfiles without populating them.
    #[command(override_usage = "doty build [options]")]
    Build(BuildOptions),

    /// Build dotfiles and populate them into the home directory.
    #[command(override_usage = "doty populate [options]")]
    Populate(BuildOptions),

    /// Encrypt and decrypt secrets.
    #[command(override_usage = "doty crypto [options] <command>")]
    Crypto(crypto::CryptoGroup),

    /// Inspect configuration.
    #[command(override_usage = "doty config [options] [<command>]")]
    Config(config::ConfigGroup),

    /// Manage installed packages.
    #[command(name = "pkg", override_usage = "doty pkg [options] [<command>]")]
    Pkg(pkg::PkgGroup),

    /// Commands used by doty itself.
    #[command(override_usage = "doty internal [options] <command>")]
    Internal(internal::InternalGroup),
}

/// Flags every command node accepts.
///
/// Nodes that have no use for a flag still accept and merge it, so global
/// flags moved onto any node parse.
#[derive(Args, Clone, Debug, Default)]
pub struct CommonFlags {
    /// Print the version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// Only print the changes, don't do anything.
    #[arg(
        short = 'n',
        long,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub dry_run: Option<bool>,

    /// Overwrite the search path for the configuration.
    #[arg(short, long, value_name = "path")]
    pub config_file: Option<PathBuf>,

    /// Set the log level.
    #[arg(short, long, value_enum, value_name = "level")]
    pub log_level: Option<LogLevel>,

    /// Print debug output.
    #[arg(
        short = 'V',
        long,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub verbose: Option<bool>,

    /// Overwrite the key file path.
    #[arg(short = 'K', long, value_name = "path")]
    pub key_file: Option<PathBuf>,

    /// Preserve the tmp dir, combine with --dry-run to check generated files
    /// without populating them.
    #[arg(
        short,
        long,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub preserve_tmp: Option<bool>,
}

impl From<CommonFlags> for OptionUpdate {
    fn from(flags: CommonFlags) -> Self {
        OptionUpdate {
            verbose: flags.verbose,
            dry_run: flags.dry_run,
            log_level: flags.log_level,
            key_file: flags.key_file,
            config_file: flags.config_file,
            preserve_tmp: flags.preserve_tmp,
        }
    }
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct HealthOptions {
    #[command(flatten)]
    pub flags: CommonFlags,

    /// Report problems only through the exit code.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Dispatch for HealthOptions {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        let params = HealthParams {
            config_file: ctx.options().config_file.clone(),
            quiet: self.quiet,
        };
        health(&params)?;

        Ok(Flow::Done)
    }
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct BuildOptions {
    #[command(flatten)]
    pub flags: CommonFlags,
}

// INVARIANT: Build and populate share options, so the operation to run is
//   picked by the parent command instead.
impl BuildOptions {
    fn resolve<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> BuildParams {
        ctx.merge(self.flags.into());
        let options = ctx.options();
        BuildParams {
            dry_run: options.dry_run,
            config_file: options.config_file.clone(),
            preserve_tmp: options.preserve_tmp.unwrap_or(false),
            key_file: options.key_file.clone(),
        }
    }
}

/// Command line failure.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Command line could not be parsed, or help/version was requested.
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Selected operation failed.
    #[error(transparent)]
    Doty(#[from] DotyError),

    /// Output could not be written.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Process exit status picked by the top-level handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Clean completion, including help and version output.
    Success,

    /// User aborted or interrupted.
    Aborted,

    /// Bad option or argument.
    Usage,

    /// Anything else.
    Failure,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Aborted => 1,
            Self::Usage => 2,
            Self::Failure => 3,
        }
    }

    /// Pick exit status of a finished run.
    pub fn of(result: &Result<()>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(error) => error.into(),
        }
    }
}

impl From<&CliError> for ExitStatus {
    fn from(error: &CliError) -> Self {
        match error {
            CliError::Usage(error) if !error.use_stderr() => Self::Success,
            CliError::Usage(_) => Self::Usage,
            CliError::Doty(error) if error.kind() == ErrorKind::Cli => Self::Usage,
            CliError::Io(error) if error.kind() == io::ErrorKind::Interrupted => Self::Aborted,
            CliError::Doty(_) | CliError::Io(_) => Self::Failure,
        }
    }
}

/// Friendly result alias :3
pub type Result<T, E = CliError> = std::result::Result<T, E>;
