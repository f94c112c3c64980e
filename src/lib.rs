// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Doty dotfiles manager.
//!
//! Doty builds dotfiles from a source directory, keeps secrets among them
//! encrypted, and populates the result into the user's home directory. This
//! crate holds the command line front end shared by the `doty` binary, and
//! the operations it dispatches to.

pub mod args;
pub mod cli;
pub mod config;
pub mod core;
pub mod crypto;
pub mod error;
pub mod internal;
pub mod log;
pub mod options;
pub mod path;
pub mod pkg;
