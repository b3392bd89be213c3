// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks the constraints serde cannot express: key material present for
//! the configured cipher mode, usable generator settings, a database path.

use passdb_core::CipherMode;

use crate::diagnostic::ConfigError;
use crate::model::PassdbConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PassdbConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    match config.cipher_mode() {
        CipherMode::SharedSecret => {
            if config.encryption_key.key.as_deref().is_none_or(str::is_empty) {
                errors.push(ConfigError::MissingKey {
                    key: "encryption_key.key".to_string(),
                });
            }
        }
        CipherMode::Identity => {
            if config.gpg.recipients.iter().all(|r| r.trim().is_empty()) {
                errors.push(ConfigError::MissingKey {
                    key: "gpg.recipients".to_string(),
                });
            }
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.password_preference.length == 0 {
        errors.push(ConfigError::Validation {
            message: "password_preference.length must be at least 1".to_string(),
        });
    }

    if config.password_preference.numberwords == 0 {
        errors.push(ConfigError::Validation {
            message: "password_preference.numberwords must be at least 1".to_string(),
        });
    }

    if config.others.editor.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "others.editor must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` is not one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
