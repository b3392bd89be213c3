// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password vault operations for passdb.
//!
//! [`PassVault`] ties an [`passdb_core::EntryStore`], a cipher engine and a
//! settings source together. Every operation that encrypts or decrypts
//! reads a fresh cipher configuration first, so settings edits apply to
//! the very next call. Batch operations stop at the first failure and
//! report how far they got.

pub mod confirm;
pub mod generator;
pub mod paths;
pub mod report;
pub mod vault;

pub use confirm::Confirm;
pub use generator::PasswordStyle;
pub use paths::{export_path, tag_from_path};
pub use report::{
    BatchFailure, ImportFailure, ImportOutcome, ImportReport, TranscodePersist, TranscodeReport,
};
pub use vault::{write_edit_backup, EntryDraft, ImportOptions, PassVault, ShownEntry};
