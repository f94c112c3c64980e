// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Path resolution utilities.
//!
//! Determine relevent path information for external files that doty needs to
//! read when the user did not point at them explicitly.

use crate::error::{DotyError, Payload};

use std::path::PathBuf;

/// Determine default absolute path to configuration file.
///
/// Uses XDG Base Directory path `$XDG_CONFIG_HOME/doty/config.toml` as the
/// default absolute path for doty's configuration. Does not check if the path
/// returned actually exists.
///
/// # Errors
///
/// - Return [`NoWayHome`] if configuration directory cannot be determined.
///
/// # See Also
///
/// - [XDG Base Directory](https://wiki.archlinux.org/title/XDG_Base_Directory)
pub fn default_config_file() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|path| path.join("doty").join("config.toml"))
        .ok_or(NoWayHome)
}

/// No way to determine user's configuration directory.
///
/// # See Also
///
/// - [`dirs::config_dir`](https://docs.rs/dirs/latest/dirs/fn.config_dir.html)
#[derive(Clone, Debug, thiserror::Error)]
#[error("cannot determine absolute path to user's configuration directory")]
pub struct NoWayHome;

impl From<NoWayHome> for DotyError {
    fn from(error: NoWayHome) -> Self {
        DotyError::config(error.to_string(), Payload::new())
    }
}

/// Friendly result alias :3
pub type Result<T, E = NoWayHome> = std::result::Result<T, E>;
