// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use super::{CommonFlags, Context, Dispatch, Flow, Result, HELP};
use crate::{
    crypto::{self, CryptoParams},
    log::LevelControl,
    options::GlobalOptions,
};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const KEY_DEFAULT: &str = "genkey";

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct CryptoGroup {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<CryptoCommand>,
}

impl Dispatch for CryptoGroup {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        match self.command {
            None => Ok(Flow::Default(HELP)),
            Some(CryptoCommand::File(group)) => group.dispatch(ctx),
            Some(CryptoCommand::Key(group)) => group.dispatch(ctx),
            Some(CryptoCommand::Modify(opts)) => opts.dispatch(ctx),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum CryptoCommand {
    /// Encrypt or decrypt individual files.
    #[command(override_usage = "doty crypto file [options] <command>")]
    File(FileGroup),

    /// Manage the encryption key.
    #[command(override_usage = "doty crypto key [options] [<command>]")]
    Key(KeyGroup),

    /// Decrypt secrets into a working copy for editing, then encrypt them back.
    #[command(override_usage = "doty crypto modify [options] [<directory>]")]
    Modify(ModifyOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct FileGroup {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<FileCommand>,
}

impl Dispatch for FileGroup {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        match self.command {
            None => Ok(Flow::Default(HELP)),
            Some(FileCommand::Encrypt(opts)) => {
                let params = opts.resolve(ctx);
                crypto::encrypt_files(&opts.files, &params)?;
                Ok(Flow::Done)
            }
            Some(FileCommand::Decrypt(opts)) => {
                let params = opts.resolve(ctx);
                crypto::decrypt_files(&opts.files, &params)?;
                Ok(Flow::Done)
            }
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum FileCommand {
    /// Encrypt target files.
    #[command(override_usage = "doty crypto file encrypt [options] <file>...")]
    Encrypt(FileOptions),

    /// Decrypt target files.
    #[command(override_usage = "doty crypto file decrypt [options] <file>...")]
    Decrypt(FileOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct FileOptions {
    #[command(flatten)]
    pub flags: CommonFlags,

    /// Files to operate on.
    #[arg(required = true, num_args = 1.., value_name = "file")]
    pub files: Vec<PathBuf>,
}

impl FileOptions {
    fn resolve<L: LevelControl>(&self, ctx: &mut Context<'_, L>) -> CryptoParams {
        ctx.merge(self.flags.clone().into());
        crypto_params(ctx.options())
    }
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct KeyGroup {
    #[command(flatten)]
    pub flags: CommonFlags,

    #[command(subcommand)]
    pub command: Option<KeyCommand>,
}

impl Dispatch for KeyGroup {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        match self.command {
            None => Ok(Flow::Default(KEY_DEFAULT)),
            Some(KeyCommand::Genkey(opts)) => opts.dispatch(ctx),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum KeyCommand {
    /// Generate a new encryption key.
    #[command(override_usage = "doty crypto key genkey [options]")]
    Genkey(GenkeyOptions),
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct GenkeyOptions {
    #[command(flatten)]
    pub flags: CommonFlags,

    /// Write the key to this file instead of the configured key file.
    #[arg(short, long, value_name = "path")]
    pub output: Option<PathBuf>,
}

impl Dispatch for GenkeyOptions {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        crypto::genkey(self.output.as_deref(), &crypto_params(ctx.options()))?;

        Ok(Flow::Done)
    }
}

#[derive(Parser, Clone, Debug)]
#[command(version, disable_version_flag = true)]
pub struct ModifyOptions {
    #[command(flatten)]
    pub flags: CommonFlags,

    /// Directory holding the secrets to modify.
    #[arg(default_value = ".", value_name = "directory")]
    pub directory: PathBuf,
}

impl Dispatch for ModifyOptions {
    fn dispatch<L: LevelControl>(self, ctx: &mut Context<'_, L>) -> Result<Flow> {
        ctx.merge(self.flags.into());
        crypto::modify(&self.directory, &crypto_params(ctx.options()))?;

        Ok(Flow::Done)
    }
}

fn crypto_params(options: &GlobalOptions) -> CryptoParams {
    CryptoParams {
        dry_run: options.dry_run,
        config_file: options.config_file.clone(),
        key_file: options.key_file.clone(),
    }
}
