// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Internal operations.
//!
//! Commands meant to be called by doty itself, e.g., from generated scripts,
//! rather than by the user.

use crate::{
    error::{Payload, Result},
    log::not_implemented,
};

use std::path::{Path, PathBuf};

/// Parameters of a configure script run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigureParams {
    pub dry_run: bool,
    pub config_file: Option<PathBuf>,
}

/// Run configure script hooks of a dotfile.
pub fn run_configure(script: &Path, commands: &[String], params: &ConfigureParams) -> Result<()> {
    not_implemented(
        "run-configure",
        Payload::new()
            .with_path("file", Some(script))
            .with("commands", commands.to_vec())
            .with("dry_run", params.dry_run)
            .with_path("config_file", params.config_file.as_deref()),
    )
}
