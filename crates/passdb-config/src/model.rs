// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for passdb.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::path::PathBuf;

use passdb_core::{CipherConfig, CipherMode};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Top-level passdb configuration.
///
/// Sections mirror the settings groups the vault consumes: the cipher
/// engine (`gpg`), the shared-secret key material (`encryption_key`),
/// generator preferences, editor settings, storage and logging.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PassdbConfig {
    /// Cipher engine settings.
    #[serde(default)]
    pub gpg: GpgConfig,

    /// Passphrase used in shared-secret mode.
    #[serde(default)]
    pub encryption_key: EncryptionKeyConfig,

    /// Password generator preferences.
    #[serde(default)]
    pub password_preference: PasswordPreference,

    /// Editor invocation settings.
    #[serde(default)]
    pub others: OthersConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PassdbConfig {
    /// The configured cipher mode.
    pub fn cipher_mode(&self) -> CipherMode {
        CipherMode::from_symmetric_flag(self.gpg.symmetric_encryption)
    }

    /// Build the value handed to every cipher call.
    pub fn cipher_config(&self) -> CipherConfig {
        CipherConfig {
            home: self
                .gpg
                .gnupg_home
                .as_deref()
                .filter(|h| !h.trim().is_empty())
                .map(expand_home),
            keyring: self
                .gpg
                .keyring
                .clone()
                .filter(|k| !k.trim().is_empty()),
            recipients: self.gpg.recipients.clone(),
            mode: self.cipher_mode(),
            key: self
                .encryption_key
                .key
                .clone()
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
        }
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Cipher engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GpgConfig {
    /// Engine home directory. `None` uses the engine's default.
    #[serde(default)]
    pub gnupg_home: Option<String>,

    /// Keyring file to use inside the home directory.
    #[serde(default)]
    pub keyring: Option<String>,

    /// Recipient identities for identity mode.
    #[serde(default)]
    pub recipients: Vec<String>,

    /// `true` selects shared-secret mode, `false` identity mode.
    #[serde(default = "default_symmetric_encryption")]
    pub symmetric_encryption: bool,
}

impl Default for GpgConfig {
    fn default() -> Self {
        Self {
            gnupg_home: None,
            keyring: None,
            recipients: Vec::new(),
            symmetric_encryption: default_symmetric_encryption(),
        }
    }
}

fn default_symmetric_encryption() -> bool {
    true
}

/// Shared-secret key material.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptionKeyConfig {
    /// Passphrase for shared-secret mode, also offered on decrypt.
    #[serde(default)]
    pub key: Option<String>,
}

/// Letter case applied to dictionary words in xkcd-style passwords.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Deserialize, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CaseSelection {
    #[default]
    Lower,
    /// Capitalize the first letter of each word.
    First,
    Upper,
}

/// Password generator preferences.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordPreference {
    /// Length of random-style passwords.
    #[serde(default = "default_length")]
    pub length: usize,

    /// Include ASCII punctuation in random-style passwords.
    #[serde(default = "default_punctuation")]
    pub punctuation: bool,

    /// Number of words in xkcd-style passwords.
    #[serde(default = "default_numberwords")]
    pub numberwords: usize,

    /// Separator between xkcd-style words.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    /// Case applied to xkcd-style words.
    #[serde(default)]
    pub caseselection: CaseSelection,

    /// Word list, one word per line.
    #[serde(default = "default_dictionary")]
    pub dictionary: String,
}

impl Default for PasswordPreference {
    fn default() -> Self {
        Self {
            length: default_length(),
            punctuation: default_punctuation(),
            numberwords: default_numberwords(),
            delimiter: default_delimiter(),
            caseselection: CaseSelection::default(),
            dictionary: default_dictionary(),
        }
    }
}

fn default_length() -> usize {
    16
}

fn default_punctuation() -> bool {
    true
}

fn default_numberwords() -> usize {
    4
}

fn default_delimiter() -> String {
    " ".to_string()
}

fn default_dictionary() -> String {
    "/usr/share/dict/words".to_string()
}

/// External editor settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OthersConfig {
    /// Editor command used for password entry and entry updates.
    #[serde(default = "default_editor")]
    pub editor: String,

    /// Seconds to wait before launching the editor.
    #[serde(default = "default_sleep")]
    pub sleep: u64,
}

impl Default for OthersConfig {
    fn default() -> Self {
        Self {
            editor: default_editor(),
            sleep: default_sleep(),
        }
    }
}

fn default_editor() -> String {
    "vi".to_string()
}

fn default_sleep() -> u64 {
    2
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    "database.db".to_string()
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
