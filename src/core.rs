// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Core dotfile operations.
//!
//! Building and populating dotfiles are not implemented yet. The health-check
//! and configuration display are.

use crate::{
    config::DotyConfig,
    error::{DotyError, Payload, Result},
    log::not_implemented,
    path::default_config_file,
};

use std::{
    env,
    fs::read_to_string,
    path::{Path, PathBuf, MAIN_SEPARATOR},
};
use tracing::{debug, error, info};

/// Listing of external programs doty needs, one per line.
const REQUIRED_PROGRAMS: &str = include_str!("required-programs.txt");

/// Parameters shared by build and populate.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildParams {
    pub dry_run: bool,
    pub config_file: Option<PathBuf>,
    pub preserve_tmp: bool,
    pub key_file: Option<PathBuf>,
}

impl From<&BuildParams> for Payload {
    fn from(params: &BuildParams) -> Self {
        Payload::new()
            .with("dry_run", params.dry_run)
            .with_path("config_file", params.config_file.as_deref())
            .with("preserve_tmp", params.preserve_tmp)
            .with_path("key_file", params.key_file.as_deref())
    }
}

/// Build dotfiles into temporary directory.
pub fn build(params: &BuildParams) -> Result<()> {
    not_implemented("build", params.into())
}

/// Build dotfiles and populate them into target directory.
pub fn populate(params: &BuildParams) -> Result<()> {
    not_implemented("populate", params.into())
}

/// Parameters of the health-check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HealthParams {
    pub config_file: Option<PathBuf>,
    pub quiet: bool,
}

/// Check that every required program is installed.
///
/// Reads bundled listing of required programs, and looks each one up through
/// the `PATH` environment variable.
///
/// # Errors
///
/// - Return [`ErrorKind::Library`](crate::error::ErrorKind::Library) error if
///   any required program is missing.
pub fn health(params: &HealthParams) -> Result<()> {
    let programs = required_programs(REQUIRED_PROGRAMS);
    health_with(&programs, &ProgramLocator::from_env(), params)
}

/// Check that every listed program can be found by target locator.
///
/// Records parameters at debug level, then logs one line per program unless
/// quiet.
///
/// # Errors
///
/// - Return [`ErrorKind::Library`](crate::error::ErrorKind::Library) error if
///   any listed program is missing. Missing programs are listed in the error
///   payload under `missing`.
pub fn health_with(
    programs: &[String],
    locator: &ProgramLocator,
    params: &HealthParams,
) -> Result<()> {
    debug!("health: {params:?}, programs: {programs:?}");
    if !params.quiet {
        info!("doty health:");
    }

    let mut missing = Vec::new();
    for program in programs {
        if locator.is_installed(program) {
            if !params.quiet {
                info!("  - {program} available");
            }
        } else {
            if !params.quiet {
                error!("  - {program} is not installed");
            }
            missing.push(program.clone());
        }
    }

    if !missing.is_empty() {
        return Err(DotyError::library(
            "health-check failed",
            Payload::new().with("missing", missing),
        ));
    }

    if !params.quiet {
        info!("everything fine");
    }

    Ok(())
}

/// Parse listing of required programs.
///
/// One program per line. Blank lines and lines starting with `#` are skipped.
pub fn required_programs(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

/// Look up programs in a set of search directories.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProgramLocator {
    search_path: Vec<PathBuf>,
}

impl ProgramLocator {
    /// Construct new locator over target directories.
    pub fn new(search_path: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            search_path: search_path.into_iter().map(Into::into).collect(),
        }
    }

    /// Construct new locator over the `PATH` environment variable.
    pub fn from_env() -> Self {
        env::var_os("PATH")
            .map(|path| Self::new(env::split_paths(&path)))
            .unwrap_or_default()
    }

    /// Check if program is installed.
    ///
    /// A program name containing a path separator is checked as is, instead of
    /// being searched for.
    pub fn is_installed(&self, program: &str) -> bool {
        if program.contains(MAIN_SEPARATOR) {
            return is_executable(Path::new(program));
        }

        self.search_path
            .iter()
            .any(|dir| is_executable(&dir.join(program)))
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Load configuration file and render it back out.
///
/// Uses the default configuration file path if none was given.
///
/// # Errors
///
/// - Return [`ErrorKind::Config`](crate::error::ErrorKind::Config) error if
///   the configuration file cannot be located, read, or parsed.
pub fn show_config(config_file: Option<&Path>) -> Result<String> {
    let path = match config_file {
        Some(path) => path.to_path_buf(),
        None => default_config_file()?,
    };
    debug!("show configuration {:?}", path.display());

    let data = read_to_string(&path).map_err(|error| {
        DotyError::config(
            "cannot read configuration file",
            Payload::new()
                .with_path("config_file", Some(path.as_path()))
                .with("reason", error.to_string()),
        )
    })?;
    let config: DotyConfig = data.parse()?;

    Ok(config.to_string())
}
