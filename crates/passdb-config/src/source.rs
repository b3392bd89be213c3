// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`ConfigSource`] backed by the settings file.

use std::path::{Path, PathBuf};

use passdb_core::{CipherConfig, CipherMode, ConfigSource, PassdbError};
use tracing::debug;

use crate::diagnostic::summarize;

/// Reads the settings file on every call.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn cipher_config(&self) -> Result<CipherConfig, PassdbError> {
        let config = crate::load_and_validate_path(&self.path)
            .map_err(|errors| PassdbError::Config(summarize(&errors)))?;
        let cipher = config.cipher_config();
        debug!(path = %self.path.display(), mode = %cipher.mode, "cipher configuration read");
        Ok(cipher)
    }

    fn commit_mode(&self, mode: CipherMode) -> Result<(), PassdbError> {
        crate::writer::commit_mode(&self.path, mode)
            .map_err(|e| PassdbError::Config(e.to_string()))
    }
}
