// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-place edits of the settings file.
//!
//! The file is parsed as a TOML document, one key is replaced and the
//! document is written back. Comments and formatting are not preserved.

use std::path::Path;

use passdb_core::CipherMode;
use tracing::info;

use crate::diagnostic::ConfigError;

/// Set `section.key` to `value`, creating the section if needed.
pub fn set_value(
    path: &Path,
    section: &str,
    key: &str,
    value: toml::Value,
) -> Result<(), ConfigError> {
    let io_err = |e: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    if !path.exists() {
        return Err(ConfigError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(io_err)?;
    let mut doc: toml::Table = content
        .parse()
        .map_err(|e: toml::de::Error| ConfigError::Other(e.to_string()))?;

    let table = doc
        .entry(section.to_string())
        .or_insert_with(|| toml::Value::Table(toml::Table::new()))
        .as_table_mut()
        .ok_or_else(|| ConfigError::Validation {
            message: format!("`{section}` is not a section"),
        })?;
    table.insert(key.to_string(), value);

    let rendered =
        toml::to_string_pretty(&doc).map_err(|e| ConfigError::Other(e.to_string()))?;
    std::fs::write(path, rendered).map_err(io_err)?;

    info!(path = %path.display(), section, key, "settings file updated");
    Ok(())
}

/// Set `section.key` from command-line text.
///
/// `raw` is read as a TOML value when it parses as one (`true`, `16`,
/// `["a", "b"]`), otherwise it is stored as a string.
pub fn set_value_str(path: &Path, section: &str, key: &str, raw: &str) -> Result<(), ConfigError> {
    set_value(path, section, key, parse_raw_value(raw))
}

fn parse_raw_value(raw: &str) -> toml::Value {
    format!("v = {raw}")
        .parse::<toml::Table>()
        .ok()
        .and_then(|mut t| t.remove("v"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

/// Durably record `mode` as the configured cipher mode.
pub fn commit_mode(path: &Path, mode: CipherMode) -> Result<(), ConfigError> {
    set_value(
        path,
        "gpg",
        "symmetric_encryption",
        toml::Value::Boolean(mode.symmetric_flag()),
    )?;
    info!(%mode, "cipher mode committed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_values_parse_as_toml_first() {
        assert_eq!(parse_raw_value("true"), toml::Value::Boolean(true));
        assert_eq!(parse_raw_value("16"), toml::Value::Integer(16));
        assert_eq!(
            parse_raw_value("vim"),
            toml::Value::String("vim".to_string())
        );
        assert_eq!(
            parse_raw_value("\"quoted\""),
            toml::Value::String("quoted".to_string())
        );
    }

    #[test]
    fn set_value_on_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = set_value_str(&path, "others", "editor", "vim").unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }

    #[test]
    fn commit_mode_rewrites_only_the_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passdb.toml");
        std::fs::write(
            &path,
            "[gpg]\nsymmetric_encryption = true\nrecipients = [\"alice\"]\n\n[encryption_key]\nkey = \"k\"\n",
        )
        .unwrap();

        commit_mode(&path, CipherMode::Identity).unwrap();

        let doc: toml::Table = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(doc["gpg"]["symmetric_encryption"].as_bool(), Some(false));
        assert_eq!(doc["gpg"]["recipients"][0].as_str(), Some("alice"));
        assert_eq!(doc["encryption_key"]["key"].as_str(), Some("k"));
    }

    #[test]
    fn set_value_creates_missing_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("passdb.toml");
        std::fs::write(&path, "[gpg]\nsymmetric_encryption = true\n").unwrap();

        set_value_str(&path, "others", "sleep", "0").unwrap();

        let doc: toml::Table = std::fs::read_to_string(&path).unwrap().parse().unwrap();
        assert_eq!(doc["others"]["sleep"].as_integer(), Some(0));
    }
}
