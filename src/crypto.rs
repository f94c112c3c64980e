// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Secret encryption.
//!
//! Encrypting, decrypting, and key management are not implemented yet. Every
//! operation fails as not implemented, with the parameters it was given as
//! payload.

use crate::{
    error::{Payload, Result},
    log::not_implemented,
};

use std::path::{Path, PathBuf};

/// Parameters shared by every crypto operation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CryptoParams {
    pub dry_run: bool,
    pub config_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,
}

impl From<&CryptoParams> for Payload {
    fn from(params: &CryptoParams) -> Self {
        Payload::new()
            .with("dry_run", params.dry_run)
            .with_path("config_file", params.config_file.as_deref())
            .with_path("key_file", params.key_file.as_deref())
    }
}

/// Encrypt target files.
pub fn encrypt_files(files: &[PathBuf], params: &CryptoParams) -> Result<()> {
    not_implemented(
        "encryptfiles",
        Payload::from(params).with_paths("files", files),
    )
}

/// Decrypt target files.
pub fn decrypt_files(files: &[PathBuf], params: &CryptoParams) -> Result<()> {
    not_implemented(
        "decryptfiles",
        Payload::from(params).with_paths("files", files),
    )
}

/// Re-encrypt secrets under target directory.
pub fn modify(directory: &Path, params: &CryptoParams) -> Result<()> {
    not_implemented(
        "modify",
        Payload::from(params).with_path("directory", Some(directory)),
    )
}

/// Generate new key.
pub fn genkey(output_file: Option<&Path>, params: &CryptoParams) -> Result<()> {
    not_implemented(
        "genkey",
        Payload::from(params).with_path("output_file", output_file),
    )
}
