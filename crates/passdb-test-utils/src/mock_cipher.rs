// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock cipher engine for deterministic testing.
//!
//! `MockCipher` implements `CipherEngine` with a readable envelope format:
//!
//! ```text
//! MOCK-SYM:<nonce>:<hex plaintext>
//! MOCK-PUB:<recipients>:<nonce>:<hex plaintext>
//! ```
//!
//! The nonce grows with every encrypt call, so encrypting the same
//! plaintext twice yields different ciphertext, like a real engine.

use std::cell::{Cell, RefCell};
use std::path::Path;

use passdb_core::{CipherConfig, CipherEngine, CipherInput, CipherMode, CipherOp, PassdbError};
use secrecy::SecretString;

const SYM_PREFIX: &str = "MOCK-SYM:";
const PUB_PREFIX: &str = "MOCK-PUB:";

/// A deterministic cipher engine with failure injection.
#[derive(Default)]
pub struct MockCipher {
    encrypt_calls: Cell<usize>,
    decrypt_calls: Cell<usize>,
    fail_encrypt_at: Cell<Option<usize>>,
    fail_decrypt_at: Cell<Option<usize>>,
    fail_on_plaintext: RefCell<Option<String>>,
    modes: RefCell<Vec<CipherMode>>,
}

impl MockCipher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`th encrypt call (1-based) with a cipher error.
    pub fn fail_encrypt_on_call(self, n: usize) -> Self {
        self.fail_encrypt_at.set(Some(n));
        self
    }

    /// Fail the `n`th decrypt call (1-based) with a cipher error.
    pub fn fail_decrypt_on_call(self, n: usize) -> Self {
        self.fail_decrypt_at.set(Some(n));
        self
    }

    /// Fail any encrypt call whose plaintext equals `plaintext`.
    pub fn fail_encrypt_of(&self, plaintext: &str) {
        *self.fail_on_plaintext.borrow_mut() = Some(plaintext.to_string());
    }

    pub fn encrypt_calls(&self) -> usize {
        self.encrypt_calls.get()
    }

    pub fn decrypt_calls(&self) -> usize {
        self.decrypt_calls.get()
    }

    /// The mode of every encrypt call so far, in call order.
    pub fn modes(&self) -> Vec<CipherMode> {
        self.modes.borrow().clone()
    }

    /// Which mode produced `envelope`, if it is a mock envelope.
    pub fn mode_of(envelope: &str) -> Option<CipherMode> {
        if envelope.starts_with(SYM_PREFIX) {
            Some(CipherMode::SharedSecret)
        } else if envelope.starts_with(PUB_PREFIX) {
            Some(CipherMode::Identity)
        } else {
            None
        }
    }

    fn open(envelope: &str, config: &CipherConfig) -> Result<String, String> {
        let envelope = envelope.trim();
        let hex_body = if let Some(rest) = envelope.strip_prefix(SYM_PREFIX) {
            if config.key.is_none() {
                return Err("no passphrase offered".into());
            }
            rest.split(':').nth(1)
        } else if let Some(rest) = envelope.strip_prefix(PUB_PREFIX) {
            rest.split(':').nth(2)
        } else {
            return Err("no valid OpenPGP data found".into());
        };
        let hex_body = hex_body.ok_or_else(|| "truncated envelope".to_string())?;

        let bytes = hex::decode(hex_body).map_err(|e| e.to_string())?;
        String::from_utf8(bytes).map_err(|_| "plaintext is not valid UTF-8".to_string())
    }

    fn read_file(path: &Path) -> Result<String, String> {
        std::fs::read_to_string(path).map_err(|e| format!("can't open '{}': {e}", path.display()))
    }
}

impl CipherEngine for MockCipher {
    fn encrypt(
        &self,
        plaintext: &[u8],
        mode: CipherMode,
        config: &CipherConfig,
    ) -> Result<String, PassdbError> {
        let call = self.encrypt_calls.get() + 1;
        self.encrypt_calls.set(call);
        let fail = |status: &str| PassdbError::Cipher {
            op: CipherOp::Encrypt,
            status: status.to_string(),
        };

        if self.fail_encrypt_at.get() == Some(call) {
            return Err(fail("injected encrypt failure"));
        }
        if let Some(bad) = self.fail_on_plaintext.borrow().as_deref() {
            if plaintext == bad.as_bytes() {
                return Err(fail("injected encrypt failure"));
            }
        }

        self.modes.borrow_mut().push(mode);
        let body = hex::encode(plaintext);
        match mode {
            CipherMode::SharedSecret => {
                if config.key.is_none() {
                    return Err(fail("no passphrase given"));
                }
                Ok(format!("{SYM_PREFIX}{call}:{body}"))
            }
            CipherMode::Identity => {
                if config.recipients.is_empty() {
                    return Err(fail("no recipients"));
                }
                Ok(format!("{PUB_PREFIX}{}:{call}:{body}", config.recipients.join(",")))
            }
        }
    }

    fn decrypt(
        &self,
        input: CipherInput<'_>,
        config: &CipherConfig,
    ) -> Result<SecretString, PassdbError> {
        let call = self.decrypt_calls.get() + 1;
        self.decrypt_calls.set(call);
        let fail = |status: String| PassdbError::Cipher {
            op: CipherOp::Decrypt,
            status,
        };

        if self.fail_decrypt_at.get() == Some(call) {
            return Err(fail("injected decrypt failure".into()));
        }

        let envelope = match input {
            CipherInput::Armored(text) => text.to_string(),
            CipherInput::File(path) => Self::read_file(path).map_err(fail)?,
        };
        Self::open(&envelope, config)
            .map(SecretString::from)
            .map_err(fail)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
