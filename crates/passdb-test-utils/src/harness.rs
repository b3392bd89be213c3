// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end vault testing.
//!
//! `TestHarness` assembles a complete vault over a temp-dir SQLite
//! database, the mock cipher and in-memory settings. The temp dir doubles
//! as a scratch area for export, backup and import trees.

use std::path::{Path, PathBuf};

use passdb_core::{CipherMode, PassdbError};
use passdb_storage::Database;
use passdb_vault::{EntryDraft, PassVault};
use secrecy::SecretString;
use tempfile::TempDir;

use crate::mock_cipher::MockCipher;
use crate::mock_config::MemoryConfigSource;
use crate::mock_store::CountingStore;

/// The vault type every harness builds.
pub type TestVault = PassVault<CountingStore<Database>, MockCipher, MemoryConfigSource>;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    mode: CipherMode,
    cipher: MockCipher,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            mode: CipherMode::SharedSecret,
            cipher: MockCipher::new(),
        }
    }

    /// Configured cipher mode.
    pub fn with_mode(mut self, mode: CipherMode) -> Self {
        self.mode = mode;
        self
    }

    /// Use a pre-configured mock cipher, e.g. one with injected failures.
    pub fn with_cipher(mut self, cipher: MockCipher) -> Self {
        self.cipher = cipher;
        self
    }

    /// Build the harness, creating the database file.
    pub fn build(self) -> Result<TestHarness, PassdbError> {
        let temp_dir =
            TempDir::new().map_err(|e| PassdbError::io(std::env::temp_dir(), e))?;
        let db_path = temp_dir.path().join("test.db");
        let db = Database::open(&db_path)?;

        let vault = PassVault::new(
            CountingStore::new(db),
            self.cipher,
            MemoryConfigSource::new(self.mode),
        );
        vault.init()?;
        vault.store().reset();

        Ok(TestHarness {
            vault,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete vault over a temp-dir database.
pub struct TestHarness {
    pub vault: TestVault,
    db_path: PathBuf,
    // Held for cleanup on drop.
    _temp_dir: TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Shared-secret harness with a well-behaved cipher.
    pub fn new() -> Result<Self, PassdbError> {
        Self::builder().build()
    }

    /// The scratch directory.
    pub fn root(&self) -> &Path {
        self._temp_dir.path()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn cipher(&self) -> &MockCipher {
        self.vault.cipher().engine()
    }

    pub fn settings(&self) -> &MemoryConfigSource {
        self.vault.config()
    }

    pub fn store(&self) -> &CountingStore<Database> {
        self.vault.store()
    }

    /// Insert an entry through the vault with `password` in clear.
    pub fn add(
        &self,
        service: &str,
        username: &str,
        tag: Option<&str>,
        password: &str,
    ) -> Result<i64, PassdbError> {
        self.vault.insert_entry(EntryDraft {
            service: Some(service.to_string()),
            username: Some(username.to_string()),
            tag: tag.map(str::to_string),
            note: None,
            password: SecretString::from(password.to_string()),
        })
    }
}
