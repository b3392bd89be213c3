// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cipher mode selection.
//!
//! The controller never stores configuration. Callers read a fresh
//! [`CipherConfig`] for each call and pass it in.

use passdb_core::{CipherConfig, CipherEngine, CipherInput, CipherMode, PassdbError};
use secrecy::SecretString;
use tracing::{debug, warn};

/// Chooses the encryption mode for each call and delegates to an engine.
#[derive(Debug, Clone)]
pub struct CipherController<E> {
    engine: E,
}

impl<E: CipherEngine> CipherController<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The mode an encrypt call runs in: the configured mode, inverted when
    /// transcoding. `config` itself is left untouched.
    pub fn effective_mode(config: &CipherConfig, transcode: bool) -> CipherMode {
        if transcode {
            config.mode.inverted()
        } else {
            config.mode
        }
    }

    /// Encrypt `plaintext` and return the armored envelope.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        config: &CipherConfig,
        transcode: bool,
    ) -> Result<String, PassdbError> {
        let mode = Self::effective_mode(config, transcode);
        debug!(engine = self.engine.name(), %mode, transcode, "encrypt");
        self.engine
            .encrypt(plaintext, mode, config)
            .inspect_err(|e| warn!(%mode, error = %e, "encryption failed"))
    }

    /// Decrypt any envelope the engine understands. The mode is detected
    /// from the envelope, not from `config`.
    pub fn decrypt(
        &self,
        input: CipherInput<'_>,
        config: &CipherConfig,
    ) -> Result<SecretString, PassdbError> {
        debug!(engine = self.engine.name(), "decrypt");
        self.engine
            .decrypt(input, config)
            .inspect_err(|e| warn!(error = %e, "decryption failed"))
    }
}
