// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use super::{CommonFlags, Context, Dispatch, Flow, Result};
use crate::{
    log::LevelControl,
    pkg::{self, UpgradeParams},
};

use clap::{Parser, Subcommand};

const PKG_DEFAULT: &str = "status";

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct PkgGroup {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<PkgCommand>,
}

impl Dispatch for PkgGroup {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        match self.command {
            None => Ok(Flow::Default(PKG_DEFAULT)),
            Some(PkgCommand::Status(opts)) => {
                ctx.merge(opts.flags.into());
                pkg::status(ctx.options().config_file.as_deref())?;
                Ok(Flow::Done)
            }
            Some(PkgCommand::Upgrade(opts)) => {
                ctx.merge(opts.flags.into());
                let options = ctx.options();
                pkg::upgrade(&UpgradeParams {
                    dry_run: options.dry_run,
                    config_file: options.config_file.clone(),
                })?;
                Ok(Flow::Done)
            }
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum PkgCommand {
    /// Show information about installed packages.
    #[command(override_usage = "doty pkg status [options]")]
    Status(PkgOptions),

    /// Upgrade installed packages.
    #[command(override_usage = "doty pkg upgrade [options]")]
    Upgrade(PkgOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct PkgOptions {
    #[command(flatten)]
    pub flags: CommonFlags,
}
