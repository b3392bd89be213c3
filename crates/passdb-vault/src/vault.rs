// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault: every passdb operation over a store, a cipher engine and a
//! settings source.
//!
//! Passwords are stored as armored ciphertext only. Plaintext exists in
//! memory for the duration of one call and is held in [`SecretString`] or
//! zeroized buffers.

use std::path::{Path, PathBuf};

use passdb_cipher::CipherController;
use passdb_core::{
    CipherEngine, CipherInput, CipherMode, ConfigSource, Entry, EntryFields, EntryStore, Filter,
    NewEntry, PassdbError,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zeroize::{Zeroize, Zeroizing};

use crate::confirm::Confirm;
use crate::paths::{self, export_path, tag_from_path};
use crate::report::{
    BatchFailure, ImportFailure, ImportOutcome, ImportReport, TranscodePersist, TranscodeReport,
};

/// Username given to imported entries when none is supplied.
pub const DEFAULT_IMPORT_USERNAME: &str = "Import";

/// An entry as listed to the operator, with its password when revealed.
#[derive(Debug)]
pub struct ShownEntry {
    pub entry: Entry,
    pub password: Option<SecretString>,
}

/// Optional overrides applied to every imported file.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub username: Option<String>,
    /// Prefixed to the tag derived from the file's location.
    pub tag: Option<String>,
    /// Appended to the `Imported on` stamp.
    pub note: Option<String>,
}

/// A new entry as typed by the operator, password still in clear.
#[derive(Debug)]
pub struct EntryDraft {
    pub service: Option<String>,
    pub username: Option<String>,
    pub tag: Option<String>,
    pub note: Option<String>,
    pub password: SecretString,
}

/// Vault operations over an [`EntryStore`], a [`CipherEngine`] and a
/// [`ConfigSource`].
pub struct PassVault<S, E, C> {
    store: S,
    cipher: CipherController<E>,
    config: C,
}

impl<S: EntryStore, E: CipherEngine, C: ConfigSource> PassVault<S, E, C> {
    pub fn new(store: S, engine: E, config: C) -> Self {
        Self {
            store,
            cipher: CipherController::new(engine),
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn cipher(&self) -> &CipherController<E> {
        &self.cipher
    }

    /// Create the record collection if it does not exist.
    pub fn init(&self) -> Result<(), PassdbError> {
        self.store.ensure_schema()
    }

    fn encrypt(&self, plaintext: &[u8], transcode: bool) -> Result<String, PassdbError> {
        let config = self.config.cipher_config()?;
        self.cipher.encrypt(plaintext, &config, transcode)
    }

    fn decrypt(&self, input: CipherInput<'_>) -> Result<SecretString, PassdbError> {
        let config = self.config.cipher_config()?;
        self.cipher.decrypt(input, &config)
    }

    /// Decrypt one entry's password.
    pub fn reveal(&self, entry: &Entry) -> Result<SecretString, PassdbError> {
        self.decrypt(CipherInput::Armored(&entry.password))
    }

    fn show(&self, entries: Vec<Entry>, reveal: bool) -> Result<Vec<ShownEntry>, PassdbError> {
        entries
            .into_iter()
            .map(|entry| {
                let password = if reveal {
                    Some(self.reveal(&entry)?)
                } else {
                    None
                };
                Ok(ShownEntry { entry, password })
            })
            .collect()
    }

    /// Every entry, ascending by id.
    pub fn show_all(&self, reveal: bool) -> Result<Vec<ShownEntry>, PassdbError> {
        let entries = self.store.list_all()?;
        self.show(entries, reveal)
    }

    /// Entries selected by `filter`.
    ///
    /// A filter with no supported combination is
    /// [`PassdbError::UnsupportedFilter`] and touches no storage.
    fn select(&self, filter: &Filter) -> Result<Vec<Entry>, PassdbError> {
        let predicate = filter.predicate().ok_or(PassdbError::UnsupportedFilter)?;
        debug!(shape = %predicate.shape, "selecting entries");
        self.store.find(&predicate)
    }

    /// Entries matching `filter`, passwords decrypted when `reveal` is set.
    pub fn search(&self, filter: &Filter, reveal: bool) -> Result<Vec<ShownEntry>, PassdbError> {
        let entries = self.select(filter)?;
        self.show(entries, reveal)
    }

    /// Delete entries matching `filter`, one confirmation per entry.
    ///
    /// With `backup_root`, each confirmed entry's ciphertext is exported
    /// there before the row is deleted. Returns the deleted entries.
    pub fn remove(
        &self,
        filter: &Filter,
        confirm: &mut dyn Confirm,
        backup_root: Option<&Path>,
    ) -> Result<Vec<Entry>, PassdbError> {
        let candidates = self.select(filter)?;
        let mut deleted = Vec::new();

        for entry in candidates {
            if !confirm.confirm(&entry)? {
                debug!(id = entry.id, "deletion declined");
                continue;
            }
            if let Some(root) = backup_root {
                self.write_ciphertext(&entry, root)?;
            }
            if self.store.delete(entry.id)? {
                info!(id = entry.id, "entry deleted");
                deleted.push(entry);
            }
        }
        Ok(deleted)
    }

    /// Write `entry`'s ciphertext under `root`. Entries with no stored
    /// password are skipped.
    fn write_ciphertext(&self, entry: &Entry, root: &Path) -> Result<Option<PathBuf>, PassdbError> {
        if entry.password.is_empty() {
            warn!(id = entry.id, "entry has no password, not exported");
            return Ok(None);
        }
        let path = export_path(entry, root);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| PassdbError::io(dir, e))?;
        }
        std::fs::write(&path, &entry.password).map_err(|e| PassdbError::io(&path, e))?;
        debug!(id = entry.id, path = %path.display(), "ciphertext exported");
        Ok(Some(path))
    }

    /// Export every entry's ciphertext under `root`.
    pub fn export_all(&self, root: &Path) -> Result<Vec<PathBuf>, PassdbError> {
        let mut written = Vec::new();
        for entry in self.store.list_all()? {
            written.extend(self.write_ciphertext(&entry, root)?);
        }
        info!(count = written.len(), root = %root.display(), "entries exported");
        Ok(written)
    }

    /// Export one entry by id.
    pub fn export_entry(&self, id: i64, root: &Path) -> Result<Option<PathBuf>, PassdbError> {
        let entry = self.store.get(id)?.ok_or(PassdbError::NotFound { id })?;
        self.write_ciphertext(&entry, root)
    }

    /// Import one file.
    ///
    /// `.gpg` files are decrypted; anything else is read as clear text.
    /// The password is re-encrypted under the configured mode. Dot-files
    /// are skipped.
    pub fn file_import(
        &self,
        file: &Path,
        import_root: Option<&Path>,
        options: &ImportOptions,
    ) -> Result<ImportOutcome, PassdbError> {
        if paths::is_hidden(file) {
            info!(path = %file.display(), "dot-file ignored");
            return Ok(ImportOutcome::Skipped);
        }

        let password = if paths::is_ciphertext(file) {
            let clear = self.decrypt(CipherInput::File(file))?;
            self.encrypt(clear.expose_secret().as_bytes(), false)?
        } else {
            debug!(path = %file.display(), "reading clear-text file");
            let clear =
                Zeroizing::new(std::fs::read(file).map_err(|e| PassdbError::io(file, e))?);
            self.encrypt(&clear, false)?
        };

        let entry = NewEntry {
            service: paths::service_from_path(file),
            username: Some(
                non_blank(options.username.as_deref())
                    .unwrap_or(DEFAULT_IMPORT_USERNAME)
                    .to_string(),
            ),
            password,
            tag: non_blank(Some(tag_from_path(file, import_root, options.tag.as_deref()).as_str()))
                .map(str::to_string),
            note: Some(match non_blank(options.note.as_deref()) {
                Some(note) => format!("Imported on {}, {note}", today()),
                None => format!("Imported on {}", today()),
            }),
        };

        let id = self.store.insert(&entry)?;
        info!(id, path = %file.display(), "file imported");
        Ok(ImportOutcome::Imported(id))
    }

    /// Import every file below `dir`, tagging each by its directories.
    ///
    /// Files are visited in sorted path order. The first failure stops the
    /// import; entries already stored stay.
    pub fn dir_import(&self, dir: &Path, options: &ImportOptions) -> Result<ImportReport, PassdbError> {
        if !dir.is_dir() {
            return Err(PassdbError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for item in WalkDir::new(dir).sort_by_file_name() {
            let item = item.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                PassdbError::io(path, source)
            })?;
            if item.file_type().is_file() {
                files.push(item.into_path());
            }
        }

        let mut report = ImportReport::default();
        for (i, file) in files.iter().enumerate() {
            match self.file_import(file, Some(dir), options) {
                Ok(ImportOutcome::Imported(id)) => report.imported.push((file.clone(), id)),
                Ok(ImportOutcome::Skipped) => report.skipped.push(file.clone()),
                Err(error) => {
                    warn!(path = %file.display(), %error, "import stopped");
                    report.remaining = files[i..].to_vec();
                    report.failure = Some(ImportFailure {
                        path: file.clone(),
                        error,
                    });
                    break;
                }
            }
        }
        info!(
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            remaining = report.remaining.len(),
            "directory import finished"
        );
        Ok(report)
    }

    fn transcode_entry(&self, entry: &Entry) -> Result<(), PassdbError> {
        let clear = self.reveal(entry)?;
        let armored = self.encrypt(clear.expose_secret().as_bytes(), true)?;
        if !self.store.update_password(entry.id, &armored)? {
            return Err(PassdbError::NotFound { id: entry.id });
        }
        Ok(())
    }

    /// Re-encrypt every entry under the mode opposite to the configured
    /// one, in ascending id order, stopping at the first failure.
    ///
    /// With [`TranscodePersist::OnSuccess`] the new mode is committed to the
    /// settings once every entry is converted. With
    /// [`TranscodePersist::Manual`] the settings are never written.
    pub fn transcode_all(&self, persist: TranscodePersist) -> Result<TranscodeReport, PassdbError> {
        let from = self.config.cipher_config()?.mode;
        let to = from.inverted();
        let entries = self.store.list_all()?;

        let mut report = TranscodeReport {
            from,
            to,
            converted: Vec::with_capacity(entries.len()),
            remaining: Vec::new(),
            failure: None,
            committed: false,
            commit_error: None,
        };

        for (i, entry) in entries.iter().enumerate() {
            if let Err(error) = self.transcode_entry(entry) {
                warn!(id = entry.id, %error, "transcode stopped");
                report.remaining = entries[i..].iter().map(|e| e.id).collect();
                report.failure = Some(BatchFailure { id: entry.id, error });
                break;
            }
            report.converted.push(entry.id);
        }

        if report.is_complete() && persist == TranscodePersist::OnSuccess {
            match self.config.commit_mode(to) {
                Ok(()) => report.committed = true,
                Err(error) => {
                    warn!(mode = %to, %error, "entries transcoded but mode not committed");
                    report.commit_error = Some(error);
                }
            }
        }
        info!(
            %from,
            %to,
            converted = report.converted.len(),
            remaining = report.remaining.len(),
            committed = report.committed,
            "transcode finished"
        );
        Ok(report)
    }

    /// Durably record `mode` in the settings.
    pub fn commit_mode(&self, mode: CipherMode) -> Result<(), PassdbError> {
        self.config.commit_mode(mode)
    }

    /// Encrypt and store a new entry. The note gets a `created on` stamp.
    pub fn insert_entry(&self, draft: EntryDraft) -> Result<i64, PassdbError> {
        let password = self.encrypt(draft.password.expose_secret().as_bytes(), false)?;
        let stamp = format!("created on {}", today());
        let entry = NewEntry {
            service: trimmed(draft.service),
            username: trimmed(draft.username),
            password,
            tag: trimmed(draft.tag),
            note: Some(match non_blank(draft.note.as_deref()) {
                Some(note) => format!("{note}, {stamp}"),
                None => stamp,
            }),
        };
        let id = self.store.insert(&entry)?;
        info!(id, "entry created");
        Ok(id)
    }

    /// Fetch an entry and its editable fields with the password decrypted.
    pub fn fetch_for_edit(&self, id: i64) -> Result<(Entry, EntryFields), PassdbError> {
        let entry = self.store.get(id)?.ok_or(PassdbError::NotFound { id })?;
        let clear = self.reveal(&entry)?;
        let fields = entry.fields_with_password(clear.expose_secret().to_string());
        Ok((entry, fields))
    }

    /// Re-encrypt edited fields and write them back over entry `id`.
    pub fn apply_edit(&self, id: i64, mut fields: EntryFields) -> Result<(), PassdbError> {
        let encrypted = self.encrypt(fields.password.as_bytes(), false);
        fields.password.zeroize();
        let entry = NewEntry {
            service: fields.service,
            username: fields.username,
            password: encrypted?,
            tag: fields.tag,
            note: fields.note,
        };
        if !self.store.update(id, &entry)? {
            return Err(PassdbError::NotFound { id });
        }
        info!(id, "entry updated");
        Ok(())
    }
}

/// Save `entry` as pretty JSON with sorted keys in `dir`, named
/// `{id}_{service}_{username}.json`.
pub fn write_edit_backup(entry: &Entry, dir: &Path) -> Result<PathBuf, PassdbError> {
    std::fs::create_dir_all(dir).map_err(|e| PassdbError::io(dir, e))?;
    let part = |v: &Option<String>| v.as_deref().unwrap_or("").trim().replace('/', "_");
    let path = dir.join(format!(
        "{}_{}_{}.json",
        entry.id,
        part(&entry.service),
        part(&entry.username)
    ));

    // serde_json's default map keeps keys sorted.
    let value = serde_json::to_value(entry).map_err(|e| PassdbError::Internal(e.to_string()))?;
    let json =
        serde_json::to_string_pretty(&value).map_err(|e| PassdbError::Internal(e.to_string()))?;
    std::fs::write(&path, json).map_err(|e| PassdbError::io(&path, e))?;
    debug!(id = entry.id, path = %path.display(), "edit backup written");
    Ok(path)
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}
