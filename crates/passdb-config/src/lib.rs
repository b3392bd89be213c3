// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for passdb.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), environment variable overrides, miette
//! diagnostics with typo suggestions, in-place rewriting of single keys,
//! and a [`FileConfigSource`] that re-reads the file for every cipher call.
//!
//! # Usage
//!
//! ```no_run
//! use passdb_config::load_and_validate_path;
//!
//! let config = load_and_validate_path("passdb.toml".as_ref()).expect("config errors");
//! println!("database: {}", config.storage.database_path);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod source;
pub mod validation;
pub mod writer;

use std::path::Path;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{default_config_path, load_config_from_path, load_config_from_str};
pub use model::PassdbConfig;
pub use source::FileConfigSource;
pub use writer::{commit_mode, set_value_str};

/// Load and validate the settings file at `path`.
///
/// A missing file is an error, unlike the bare Figment loader which skips
/// it.
pub fn load_and_validate_path(path: &Path) -> Result<PassdbConfig, Vec<ConfigError>> {
    if !path.is_file() {
        return Err(vec![ConfigError::MissingFile {
            path: path.to_path_buf(),
        }]);
    }

    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let content = std::fs::read_to_string(path).unwrap_or_default();
            let name = path.display().to_string();
            Err(diagnostic::figment_to_config_errors(
                err,
                Some((name.as_str(), content.as_str())),
            ))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PassdbConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            Some(("<inline>", toml_content)),
        )),
    }
}

/// Every section and key of `config` as display strings, sorted by name.
///
/// Unset optional keys are omitted.
pub fn listing(config: &PassdbConfig) -> Vec<(String, Vec<(String, String)>)> {
    let Ok(toml::Value::Table(root)) = toml::Value::try_from(config) else {
        return Vec::new();
    };

    root.into_iter()
        .filter_map(|(section, value)| match value {
            toml::Value::Table(keys) => Some((
                section,
                keys.into_iter()
                    .map(|(k, v)| {
                        let shown = match v {
                            toml::Value::String(s) => s,
                            other => other.to_string(),
                        };
                        (k, shown)
                    })
                    .collect(),
            )),
            _ => None,
        })
        .collect()
}
