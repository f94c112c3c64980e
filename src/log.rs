// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Process logger.
//!
//! Doty logs through [`tracing`]. The subscriber installed by [`Logger::init`]
//! writes compact, colorized lines where warnings and errors go to stderr, and
//! everything else goes to stdout. The active threshold sits behind a reload
//! layer, so merging a new log level into the global options takes effect
//! immediately.

use crate::{
    error::{DotyError, Payload, Result},
    options::LogLevel,
};

use std::{cell::Cell, io};
use tracing::{debug, level_filters::LevelFilter, warn, Level};
use tracing_subscriber::{
    filter::ParseError,
    fmt::{self, writer::MakeWriterExt},
    prelude::*,
    reload,
    util::TryInitError,
    EnvFilter, Registry,
};

/// Change the active log threshold.
///
/// Lets option merging propagate a log level without knowing what actually
/// renders the logs.
pub trait LevelControl {
    /// Set new threshold.
    fn set_level(&self, level: LogLevel);

    /// Current threshold.
    fn level(&self) -> LogLevel;

    /// Check if full error traces should be shown.
    fn is_debug(&self) -> bool {
        self.level() == LogLevel::Debug
    }
}

/// Handle to the installed tracing subscriber.
#[derive(Debug)]
pub struct Logger {
    handle: reload::Handle<EnvFilter, Registry>,
    level: Cell<LogLevel>,
}

impl Logger {
    /// Install global tracing subscriber.
    ///
    /// Starting threshold comes from `RUST_LOG` if set, or defaults to info.
    ///
    /// # Errors
    ///
    /// - Return [`LogError::Filter`] if starting filter cannot be parsed.
    /// - Return [`LogError::Init`] if a global subscriber was already set.
    pub fn init() -> Result<Self, LogError> {
        let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
        let (filter, handle) = reload::Layer::new(filter);
        let layer = fmt::layer()
            .compact()
            .with_target(false)
            .without_time()
            .with_writer(io::stderr.with_max_level(Level::WARN).or_else(io::stdout));
        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()?;

        Ok(Self {
            handle,
            level: Cell::new(LogLevel::Info),
        })
    }
}

impl LevelControl for Logger {
    fn set_level(&self, level: LogLevel) {
        self.level.set(level);

        // INVARIANT: Explicit level replaces whatever RUST_LOG asked for.
        let filter = EnvFilter::default().add_directive(LevelFilter::from(level).into());
        if let Err(error) = self.handle.reload(filter) {
            warn!("cannot change log level to {level}: {error}");
        }
    }

    fn level(&self) -> LogLevel {
        self.level.get()
    }
}

/// Fail with target error after recording it.
///
/// Never returns `Ok`. Meant to be the last expression of an operation that
/// cannot continue.
pub fn fatal<T>(error: DotyError) -> Result<T> {
    debug!("fatal: {error}");
    Err(error)
}

/// Fail an operation that only exists as a stub.
///
/// Records the operation and its resolved parameters at debug level, then
/// fails with a not-implemented error carrying both as payload.
pub fn not_implemented<T>(operation: &str, payload: Payload) -> Result<T> {
    debug!("{operation}: {payload}");
    fatal(DotyError::not_implemented(
        format!("{operation} not implemented yet"),
        payload.with("operation", operation),
    ))
}

/// Logger setup error types.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Starting filter directive is invalid.
    #[error(transparent)]
    Filter(#[from] ParseError),

    /// Global subscriber could not be installed.
    #[error(transparent)]
    Init(#[from] TryInitError),
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warning => LevelFilter::WARN,
            LogLevel::Error | LogLevel::Critical => LevelFilter::ERROR,
        }
    }
}
