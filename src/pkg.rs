// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Installed package management.

use crate::{
    error::{Payload, Result},
    log::not_implemented,
};

use std::path::{Path, PathBuf};

/// Show information about installed packages.
pub fn status(config_file: Option<&Path>) -> Result<()> {
    not_implemented(
        "status",
        Payload::new().with_path("config_file", config_file),
    )
}

/// Parameters of a package upgrade.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UpgradeParams {
    pub dry_run: bool,
    pub config_file: Option<PathBuf>,
}

/// Upgrade installed packages.
pub fn upgrade(params: &UpgradeParams) -> Result<()> {
    not_implemented(
        "upgrade",
        Payload::new()
            .with("dry_run", params.dry_run)
            .with_path("config_file", params.config_file.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use toml::Value;

    #[test]
    fn status_is_not_implemented() {
        let error = status(Some(Path::new("doty.toml"))).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::NotImplemented);
        assert_eq!(
            error.payload().get("config_file"),
            Some(&Value::from("doty.toml"))
        );
    }

    #[test]
    fn upgrade_is_not_implemented() {
        let params = UpgradeParams {
            dry_run: true,
            ..Default::default()
        };
        let error = upgrade(&params).unwrap_err();

        assert_eq!(error.kind(), ErrorKind::NotImplemented);
        assert_eq!(error.payload().get("dry_run"), Some(&Value::from(true)));
    }
}
