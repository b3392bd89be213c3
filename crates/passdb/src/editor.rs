// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Round trips through the operator's editor.
//!
//! Text is written to a private temporary file, the configured editor is
//! run on it after `others.sleep` seconds, and the file is read back. The
//! file is removed when the temp handle drops.

use std::io::Write;
use std::process::Command;
use std::time::Duration;

use passdb_config::model::OthersConfig;
use passdb_core::{EntryFields, PassdbError};
use secrecy::SecretString;
use tempfile::NamedTempFile;
use tracing::debug;
use zeroize::Zeroizing;

/// Open `initial` in the editor and return what was saved.
pub fn edit_text(initial: &str, others: &OthersConfig) -> Result<Zeroizing<String>, PassdbError> {
    let mut parts = others.editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| PassdbError::Config("others.editor is empty".to_string()))?;

    let mut file = NamedTempFile::new().map_err(|e| PassdbError::io(std::env::temp_dir(), e))?;
    if let Err(e) = file.write_all(initial.as_bytes()).and_then(|()| file.flush()) {
        return Err(PassdbError::io(file.path(), e));
    }

    if others.sleep > 0 {
        println!(
            "\n\n --- Will open '{}' in {} seconds ---\n\n",
            others.editor, others.sleep
        );
        std::thread::sleep(Duration::from_secs(others.sleep));
    }

    debug!(editor = %others.editor, "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .map_err(|e| PassdbError::io(program, e))?;
    if !status.success() {
        return Err(PassdbError::Internal(format!(
            "editor '{}' exited with {status}",
            others.editor
        )));
    }

    let text = std::fs::read_to_string(file.path()).map_err(|e| PassdbError::io(file.path(), e))?;
    Ok(Zeroizing::new(text))
}

/// Drop one trailing line ending, as most editors append one on save.
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

/// Type a new password in the editor.
pub fn compose_password(others: &OthersConfig) -> Result<SecretString, PassdbError> {
    let text = edit_text("", others)?;
    Ok(SecretString::from(strip_trailing_newline(&text).to_string()))
}

/// Edit an entry's fields as pretty JSON.
pub fn edit_fields(fields: &EntryFields, others: &OthersConfig) -> Result<EntryFields, PassdbError> {
    let json = Zeroizing::new(
        serde_json::to_string_pretty(fields).map_err(|e| PassdbError::Internal(e.to_string()))?,
    );
    let edited = edit_text(&json, others)?;
    serde_json::from_str(&edited)
        .map_err(|e| PassdbError::Internal(format!("edited entry is not valid JSON: {e}")))
}
