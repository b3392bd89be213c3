// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cipher engine trait for the external encryption provider.

use std::path::Path;

use secrecy::SecretString;

use crate::error::PassdbError;
use crate::types::{CipherConfig, CipherMode};

/// Ciphertext handed to [`CipherEngine::decrypt`].
#[derive(Debug, Clone, Copy)]
pub enum CipherInput<'a> {
    /// Armored ciphertext held in memory.
    Armored(&'a str),
    /// A file containing ciphertext.
    File(&'a Path),
}

/// An engine able to encrypt in either mode and to decrypt any envelope it
/// produced without being told the mode.
///
/// Implementations report a non-ok engine status as
/// [`PassdbError::Cipher`]; they never terminate the process.
pub trait CipherEngine {
    /// Encrypt `plaintext` under `mode`, using `config` for key material,
    /// recipients and the engine home.
    ///
    /// `mode` may differ from `config.mode` when transcoding.
    fn encrypt(
        &self,
        plaintext: &[u8],
        mode: CipherMode,
        config: &CipherConfig,
    ) -> Result<String, PassdbError>;

    /// Decrypt `input`, offering `config.key` as passphrase when the
    /// envelope asks for one.
    fn decrypt(
        &self,
        input: CipherInput<'_>,
        config: &CipherConfig,
    ) -> Result<SecretString, PassdbError>;

    /// Short engine name for logs.
    fn name(&self) -> &'static str;
}
