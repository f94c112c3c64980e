// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Configuration layout.
//!
//! Specify the layout of doty's configuration file to simplify the process of
//! serialization and deserialization. File I/O is left to the caller to
//! figure out.

use crate::error::{DotyError, Payload};

use serde::{Deserialize, Serialize};
use std::{
    fmt::{Display, Error as FmtError, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Doty configuration layout.
///
/// # General Layout
///
/// The configuration file currently has one section: settings. The settings
/// section tells doty where the user keeps their managed dotfiles, where they
/// should be populated to, and which key protects their secrets.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct DotyConfig {
    /// General settings.
    pub settings: Settings,
}

impl FromStr for DotyConfig {
    type Err = ConfigError;

    fn from_str(data: &str) -> Result<Self, Self::Err> {
        let mut config: DotyConfig = toml::de::from_str(data).map_err(ConfigError::Deserialize)?;

        // INVARIANT: Perform shell expansion on every path field.
        let settings = &mut config.settings;
        settings.dotfiles_dir = expand(&settings.dotfiles_dir)?;
        settings.target_dir = expand(&settings.target_dir)?;
        settings.key_file = settings.key_file.as_deref().map(expand).transpose()?;
        settings.tmp_dir = settings.tmp_dir.as_deref().map(expand).transpose()?;

        Ok(config)
    }
}

impl Display for DotyConfig {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(
            toml::ser::to_string_pretty(self)
                .map_err(ConfigError::Serialize)?
                .as_str(),
        )
    }
}

/// Configuration settings.
#[derive(Default, Debug, PartialEq, Eq, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Directory holding the managed dotfiles.
    pub dotfiles_dir: PathBuf,

    /// Directory to populate built dotfiles into.
    pub target_dir: PathBuf,

    /// Key used to encrypt and decrypt secrets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,

    /// Directory to build dotfiles in before populating them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmp_dir: Option<PathBuf>,
}

fn expand(path: &Path) -> Result<PathBuf, ConfigError> {
    Ok(PathBuf::from(
        shellexpand::full(path.to_string_lossy().as_ref())
            .map_err(ConfigError::ShellExpansion)?
            .into_owned(),
    ))
}

/// Configuration error types.
#[derive(Clone, Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error(transparent)]
    Deserialize(#[from] toml::de::Error),

    /// Failed to serialize configuration.
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    /// Failed to perform shell expansion on configuration.
    #[error(transparent)]
    ShellExpansion(#[from] shellexpand::LookupError<std::env::VarError>),
}

impl From<ConfigError> for FmtError {
    fn from(_: ConfigError) -> Self {
        FmtError
    }
}

impl From<ConfigError> for DotyError {
    fn from(error: ConfigError) -> Self {
        DotyError::config(
            "invalid configuration",
            Payload::new().with("reason", error.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use sealed_test::prelude::*;

    #[sealed_test(env = [("BLAH", "/home/blah")])]
    fn deserialize_config() -> anyhow::Result<()> {
        let result: DotyConfig = r#"
            [settings]
            dotfiles_dir = "$BLAH/.dotfiles"
            target_dir = "$BLAH"
            key_file = "${BLAH}/.config/doty/doty.key"
        "#
        .parse()?;

        let expect = DotyConfig {
            settings: Settings {
                dotfiles_dir: "/home/blah/.dotfiles".into(),
                target_dir: "/home/blah".into(),
                key_file: Some("/home/blah/.config/doty/doty.key".into()),
                tmp_dir: None,
            },
        };

        assert_eq!(result, expect);

        Ok(())
    }

    #[test]
    fn serialize_config() {
        let result = DotyConfig {
            settings: Settings {
                dotfiles_dir: "/home/blah/.dotfiles".into(),
                target_dir: "/home/blah".into(),
                key_file: None,
                tmp_dir: Some("/tmp/doty".into()),
            },
        }
        .to_string();

        let expect = indoc! {r#"
            [settings]
            dotfiles_dir = "/home/blah/.dotfiles"
            target_dir = "/home/blah"
            tmp_dir = "/tmp/doty"
        "#};

        assert_eq!(result, expect);
    }

    #[sealed_test]
    fn unset_variable_is_config_error() {
        let result = r#"
            [settings]
            dotfiles_dir = "$DOTY_SURELY_UNSET/.dotfiles"
            target_dir = "/home/blah"
        "#
        .parse::<DotyConfig>();

        assert!(matches!(result, Err(ConfigError::ShellExpansion(_))));
        let error = DotyError::from(result.unwrap_err());
        assert_eq!(error.kind(), ErrorKind::Config);
    }

    #[test]
    fn missing_settings_is_deserialize_error() {
        let result = "title = \"nope\"".parse::<DotyConfig>();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }
}
