// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use super::{CommonFlags, Context, Dispatch, Flow, Result, HELP};
use crate::{
    internal::{self, ConfigureParams},
    log::LevelControl,
};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct InternalGroup {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<InternalCommand>,
}

impl Dispatch for InternalGroup {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        match self.command {
            None => Ok(Flow::Default(HELP)),
            Some(InternalCommand::RunConfigure(opts)) => opts.dispatch(ctx),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum InternalCommand {
    /// Run hooks of a configure script.
    #[command(
        name = "run-configure",
        override_usage = "doty internal run-configure [options] <file> <command>..."
    )]
    RunConfigure(RunConfigureOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct RunConfigureOptions {
    #[command(flatten)]
    pub flags: CommonFlags,

    /// Configure script to run.
    #[arg(value_name = "file")]
    pub file: PathBuf,

    /// Hooks of the script to run, in order.
    #[arg(required = true, num_args = 1.., value_name = "command")]
    pub commands: Vec<String>,
}

impl Dispatch for RunConfigureOptions {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        let options = ctx.options();
        let params = ConfigureParams {
            dry_run: options.dry_run,
            config_file: options.config_file.clone(),
        };
        internal::run_configure(&self.file, &self.commands, &params)?;

        Ok(Flow::Done)
    }
}
