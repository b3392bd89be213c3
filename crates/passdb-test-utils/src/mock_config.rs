// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory settings source.

use std::cell::{Cell, RefCell};

use passdb_core::{CipherConfig, CipherMode, ConfigSource, PassdbError};
use secrecy::SecretString;

/// Settings held in memory. Edits through the setters are seen by the next
/// read, like edits to a settings file.
pub struct MemoryConfigSource {
    config: RefCell<CipherConfig>,
    commits: RefCell<Vec<CipherMode>>,
    reads: Cell<usize>,
    missing: Cell<bool>,
    read_only: Cell<bool>,
}

impl MemoryConfigSource {
    /// Settings in `mode` with key material and one recipient.
    pub fn new(mode: CipherMode) -> Self {
        Self::from_config(CipherConfig {
            home: None,
            keyring: None,
            recipients: vec!["alice@example.com".to_string()],
            mode,
            key: Some(SecretString::from("test-passphrase".to_string())),
        })
    }

    pub fn from_config(config: CipherConfig) -> Self {
        Self {
            config: RefCell::new(config),
            commits: RefCell::new(Vec::new()),
            reads: Cell::new(0),
            missing: Cell::new(false),
            read_only: Cell::new(false),
        }
    }

    pub fn set_mode(&self, mode: CipherMode) {
        self.config.borrow_mut().mode = mode;
    }

    pub fn set_recipients(&self, recipients: Vec<String>) {
        self.config.borrow_mut().recipients = recipients;
    }

    pub fn set_key(&self, key: Option<&str>) {
        self.config.borrow_mut().key = key.map(|k| SecretString::from(k.to_string()));
    }

    /// Make every following read fail as if the settings file were gone.
    pub fn remove(&self) {
        self.missing.set(true);
    }

    /// Make every following commit fail; reads still succeed.
    pub fn make_read_only(&self) {
        self.read_only.set(true);
    }

    pub fn mode(&self) -> CipherMode {
        self.config.borrow().mode
    }

    /// Modes committed so far, in order.
    pub fn commits(&self) -> Vec<CipherMode> {
        self.commits.borrow().clone()
    }

    /// Number of `cipher_config` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl ConfigSource for MemoryConfigSource {
    fn cipher_config(&self) -> Result<CipherConfig, PassdbError> {
        self.reads.set(self.reads.get() + 1);
        if self.missing.get() {
            return Err(PassdbError::Config("settings file not found".into()));
        }
        Ok(self.config.borrow().clone())
    }

    fn commit_mode(&self, mode: CipherMode) -> Result<(), PassdbError> {
        if self.read_only.get() {
            return Err(PassdbError::Config("read-only settings".into()));
        }
        self.commits.borrow_mut().push(mode);
        self.set_mode(mode);
        Ok(())
    }
}
