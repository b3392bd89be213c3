// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Merge order (later overrides earlier): compiled defaults, the settings
//! file, then `PASSDB_<SECTION>_<KEY>` environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PassdbConfig;

/// File name looked up in the working directory and the user config dir.
pub const CONFIG_FILE_NAME: &str = "passdb.toml";

/// Sections that environment variables may address.
const SECTIONS: &[&str] = &[
    "gpg",
    "encryption_key",
    "password_preference",
    "others",
    "storage",
    "logging",
];

/// Default settings file: `./passdb.toml` if present, otherwise
/// `~/.config/passdb/passdb.toml`.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|d| d.join("passdb").join(CONFIG_FILE_NAME))
        .unwrap_or(local)
}

/// Load configuration from a specific file path with env var overrides.
///
/// Figment skips missing files silently; callers that require the file
/// check for it first (see [`crate::load_and_validate_path`]).
pub fn load_config_from_path(path: &Path) -> Result<PassdbConfig, figment::Error> {
    build_figment(path).extract()
}

/// Load configuration from a TOML string only (no file, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PassdbConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PassdbConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Build the Figment used for loading `path`, before extraction.
pub fn build_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PassdbConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
}

/// `PASSDB_ENCRYPTION_KEY_KEY` -> `encryption_key.key`.
///
/// Section names contain underscores, so the split is done by matching the
/// known section prefixes rather than `Env::split("_")`.
fn env_provider() -> Env {
    Env::prefixed("PASSDB_").map(|key| map_env_key(key.as_str()).into())
}

pub(crate) fn map_env_key(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("encryption_key_key"), "encryption_key.key");
        assert_eq!(map_env_key("gpg_gnupg_home"), "gpg.gnupg_home");
        assert_eq!(
            map_env_key("password_preference_numberwords"),
            "password_preference.numberwords"
        );
        assert_eq!(map_env_key("others_editor"), "others.editor");
    }

    #[test]
    fn unknown_env_keys_pass_through() {
        assert_eq!(map_env_key("something"), "something");
    }
}
