// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Error taxonomy.
//!
//! Every failure that crosses a domain boundary in doty is a [`DotyError`].
//! A doty error is tagged with an [`ErrorKind`], carries a human readable
//! message, and may carry a [`Payload`] of diagnostic values describing what
//! the caller asked for when the failure happened.
//!
//! Doty errors are created at the point of failure, and are passed up the call
//! stack unmodified until the top-level handler consumes them to pick an exit
//! code.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
};
use toml::Value;

/// Kind of failure a [`DotyError`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operation exists only as a stub.
    NotImplemented,

    /// Bad invocation or usage.
    Cli,

    /// Domain level failure, e.g., failed health-check.
    Library,

    /// Configuration could not be resolved.
    Config,
}

impl Display for ErrorKind {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::NotImplemented => "not implemented",
            Self::Cli => "cli",
            Self::Library => "library",
            Self::Config => "config",
        })
    }
}

/// Diagnostic values attached to a [`DotyError`].
///
/// Keys are kept in sorted order so rendering is stable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Payload(BTreeMap<String, Value>);

impl Payload {
    /// Construct new empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach diagnostic value under target key.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Attach path under target key, or nothing if there is no path.
    pub fn with_path(self, key: impl Into<String>, path: Option<&Path>) -> Self {
        match path {
            Some(path) => self.with(key, path.display().to_string()),
            None => self,
        }
    }

    /// Attach listing of paths under target key.
    pub fn with_paths(self, key: impl Into<String>, paths: &[PathBuf]) -> Self {
        let paths = paths
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>();
        self.with(key, paths)
    }

    /// Get diagnostic value of target key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for Payload {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str("{")?;
        for (index, (key, value)) in self.0.iter().enumerate() {
            if index > 0 {
                fmt.write_str(", ")?;
            }
            write!(fmt, "{key}={value}")?;
        }
        fmt.write_str("}")
    }
}

/// Failure of a doty operation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{kind}: {message}{}", payload_suffix(.payload))]
pub struct DotyError {
    kind: ErrorKind,
    message: String,
    payload: Payload,
}

impl DotyError {
    /// Construct new doty error.
    pub fn new(kind: ErrorKind, message: impl Into<String>, payload: Payload) -> Self {
        Self {
            kind,
            message: message.into(),
            payload,
        }
    }

    pub fn not_implemented(message: impl Into<String>, payload: Payload) -> Self {
        Self::new(ErrorKind::NotImplemented, message, payload)
    }

    pub fn cli(message: impl Into<String>, payload: Payload) -> Self {
        Self::new(ErrorKind::Cli, message, payload)
    }

    pub fn library(message: impl Into<String>, payload: Payload) -> Self {
        Self::new(ErrorKind::Library, message, payload)
    }

    pub fn config(message: impl Into<String>, payload: Payload) -> Self {
        Self::new(ErrorKind::Config, message, payload)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }
}

fn payload_suffix(payload: &Payload) -> String {
    if payload.is_empty() {
        String::new()
    } else {
        format!(", {payload}")
    }
}

/// Friendly result alias :3
pub type Result<T, E = DotyError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_without_payload() {
        let error = DotyError::cli("missing command", Payload::new());
        assert_eq!(error.to_string(), "cli: missing command");
    }

    #[test]
    fn display_with_payload() {
        let payload = Payload::new()
            .with("dry_run", true)
            .with_paths("files", &[PathBuf::from("a.txt")])
            .with_path("key_file", None);
        let error = DotyError::not_implemented("encrypt not implemented yet", payload);

        assert_eq!(
            error.to_string(),
            r#"not implemented: encrypt not implemented yet, {dry_run=true, files=["a.txt"]}"#
        );
        assert_eq!(error.kind(), ErrorKind::NotImplemented);
        assert_eq!(error.payload().get("key_file"), None);
    }

    #[test]
    fn payload_keeps_path_as_string() {
        let payload = Payload::new().with_path("config_file", Some(Path::new("/tmp/doty.toml")));
        assert_eq!(
            payload.get("config_file"),
            Some(&Value::String("/tmp/doty.toml".into()))
        );
    }
}
