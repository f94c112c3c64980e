// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use super::{CommonFlags, Context, Dispatch, Flow, Result};
use crate::{core::show_config, log::LevelControl};

use clap::{Parser, Subcommand};
use std::io::{self, Write};

const CONFIG_DEFAULT: &str = "show";

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct ConfigGroup {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

impl Dispatch for ConfigGroup {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        match self.command {
            None => Ok(Flow::Default(CONFIG_DEFAULT)),
            Some(ConfigCommand::Show(opts)) => opts.dispatch(ctx),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigCommand {
    /// Print the loaded configuration.
    #[command(override_usage = "doty config show [options]")]
    Show(ShowOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct ShowOptions {
    #[command(flatten)]
    pub flags: CommonFlags,
}

impl Dispatch for ShowOptions {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        let rendered = show_config(ctx.options().config_file.as_deref())?;
        io::stdout().write_all(rendered.as_bytes())?;

        Ok(Flow::Done)
    }
}
