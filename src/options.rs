// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Global option state.
//!
//! Some flags mean the same thing at every level of the command tree, e.g.,
//! `--dry-run` or `--config-file`. Each command node parses its own copy of
//! these flags, and merges whatever the user actually passed into one
//! [`GlobalOptions`] instance that is threaded through dispatch. Leaf commands
//! then resolve their parameters from that merged state.

use crate::log::LevelControl;

use clap::ValueEnum;
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    path::PathBuf,
};
use tracing::debug;

/// Log threshold selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    Debug,

    #[default]
    Info,

    Warning,

    Error,

    Critical,
}

impl Display for LogLevel {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        fmt.write_str(match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        })
    }
}

/// Resolved values of cross-cutting flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    pub verbose: bool,
    pub dry_run: bool,
    pub log_level: LogLevel,
    pub key_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub preserve_tmp: Option<bool>,
}

impl GlobalOptions {
    /// Merge flags parsed at one command node.
    ///
    /// Every present field overwrites the current value, explicit `false`
    /// included. A true `verbose` forces the debug log level no matter what
    /// log level came along with it. Any log level that ends up being set is
    /// handed to the logger.
    pub fn update(&mut self, update: OptionUpdate, logger: &impl LevelControl) {
        let OptionUpdate {
            verbose,
            dry_run,
            mut log_level,
            key_file,
            config_file,
            preserve_tmp,
        } = update;

        if verbose == Some(true) {
            log_level = Some(LogLevel::Debug);
        }

        if let Some(level) = log_level {
            self.log_level = level;
            logger.set_level(level);
        }

        if let Some(verbose) = verbose {
            self.verbose = verbose;
        }

        if let Some(dry_run) = dry_run {
            self.dry_run = dry_run;
        }

        if let Some(key_file) = key_file {
            self.key_file = Some(key_file);
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(preserve_tmp) = preserve_tmp {
            self.preserve_tmp = Some(preserve_tmp);
        }

        debug!("global options: {self:?}");
    }
}

/// Flags parsed at one command node.
///
/// A `None` field means the flag was absent, and leaves the current value of
/// [`GlobalOptions`] alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionUpdate {
    pub verbose: Option<bool>,
    pub dry_run: Option<bool>,
    pub log_level: Option<LogLevel>,
    pub key_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub preserve_tmp: Option<bool>,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    /// Records every level handed to it.
    #[derive(Debug, Default)]
    pub(crate) struct LevelRecorder {
        pub(crate) levels: RefCell<Vec<LogLevel>>,
    }

    impl LevelControl for LevelRecorder {
        fn set_level(&self, level: LogLevel) {
            self.levels.borrow_mut().push(level);
        }

        fn level(&self) -> LogLevel {
            self.levels.borrow().last().copied().unwrap_or_default()
        }
    }

    #[test]
    fn verbose_forces_debug_level() {
        let logger = LevelRecorder::default();
        let mut options = GlobalOptions::default();
        options.update(
            OptionUpdate {
                verbose: Some(true),
                log_level: Some(LogLevel::Error),
                ..Default::default()
            },
            &logger,
        );

        assert_eq!(options.log_level, LogLevel::Debug);
        assert!(options.verbose);
        assert_eq!(logger.levels.into_inner(), vec![LogLevel::Debug]);
    }

    #[test]
    fn explicit_false_overwrites() {
        let logger = LevelRecorder::default();
        let mut options = GlobalOptions {
            dry_run: true,
            preserve_tmp: Some(true),
            ..Default::default()
        };
        options.update(
            OptionUpdate {
                dry_run: Some(false),
                preserve_tmp: Some(false),
                ..Default::default()
            },
            &logger,
        );

        assert!(!options.dry_run);
        assert_eq!(options.preserve_tmp, Some(false));
    }

    #[test]
    fn absent_fields_keep_current_values() {
        let logger = LevelRecorder::default();
        let mut options = GlobalOptions {
            dry_run: true,
            log_level: LogLevel::Warning,
            config_file: Some("doty.toml".into()),
            ..Default::default()
        };
        let expect = options.clone();
        options.update(OptionUpdate::default(), &logger);

        assert_eq!(options, expect);
        assert!(logger.levels.into_inner().is_empty());
    }

    #[test]
    fn log_level_reaches_logger() {
        let logger = LevelRecorder::default();
        let mut options = GlobalOptions::default();
        options.update(
            OptionUpdate {
                verbose: Some(false),
                log_level: Some(LogLevel::Critical),
                ..Default::default()
            },
            &logger,
        );

        assert_eq!(options.log_level, LogLevel::Critical);
        assert_eq!(logger.level(), LogLevel::Critical);
    }

    #[test]
    fn later_merge_wins() {
        let logger = LevelRecorder::default();
        let mut options = GlobalOptions::default();
        options.update(
            OptionUpdate {
                key_file: Some("outer.key".into()),
                ..Default::default()
            },
            &logger,
        );
        options.update(
            OptionUpdate {
                key_file: Some("inner.key".into()),
                ..Default::default()
            },
            &logger,
        );

        assert_eq!(options.key_file, Some(PathBuf::from("inner.key")));
    }
}
