// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Results of batch operations.
//!
//! Batches stop at the first failure and are never rolled back. A report
//! says what was done, what was not, and why it stopped.

use std::path::PathBuf;

use passdb_core::{CipherMode, PassdbError};

/// Whether a successful transcode writes the new mode to the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TranscodePersist {
    /// Never touch the settings; the operator commits the mode separately.
    #[default]
    Manual,
    /// Commit the new mode once every entry has been converted.
    OnSuccess,
}

/// The entry a batch stopped at.
#[derive(Debug)]
pub struct BatchFailure {
    pub id: i64,
    pub error: PassdbError,
}

/// Outcome of re-encrypting every entry under the opposite mode.
#[derive(Debug)]
pub struct TranscodeReport {
    /// Mode the settings named when the batch started.
    pub from: CipherMode,
    /// Mode converted entries are now encrypted under.
    pub to: CipherMode,
    /// Converted ids, ascending.
    pub converted: Vec<i64>,
    /// Ids left in the old mode, ascending, starting at the failed one.
    pub remaining: Vec<i64>,
    pub failure: Option<BatchFailure>,
    /// Whether `to` was written to the settings.
    pub committed: bool,
    /// Why writing `to` to the settings failed. Every entry is then in
    /// `to` while the settings still name `from`.
    pub commit_error: Option<PassdbError>,
}

impl TranscodeReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// What happened to one imported file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Stored under the given id.
    Imported(i64),
    /// Dot-file, not read.
    Skipped,
}

/// The file a directory import stopped at.
#[derive(Debug)]
pub struct ImportFailure {
    pub path: PathBuf,
    pub error: PassdbError,
}

/// Outcome of importing a directory tree.
#[derive(Debug, Default)]
pub struct ImportReport {
    /// Imported files and their new ids, in walk order.
    pub imported: Vec<(PathBuf, i64)>,
    /// Dot-files that were not read.
    pub skipped: Vec<PathBuf>,
    /// Files not imported, starting at the failed one.
    pub remaining: Vec<PathBuf>,
    pub failure: Option<ImportFailure>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}
