// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for passdb.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::CipherOp;

/// Exit status used when encryption fails.
pub const EXIT_ENCRYPT_FAILED: i32 = 96;
/// Exit status used when decryption fails.
pub const EXIT_DECRYPT_FAILED: i32 = 97;
/// Exit status used when an id lookup finds nothing.
pub const EXIT_NOT_FOUND: i32 = 89;
/// Exit status used when an import root is not a directory.
pub const EXIT_NOT_A_DIRECTORY: i32 = 99;

/// The primary error type shared by every passdb crate.
#[derive(Debug, Error)]
pub enum PassdbError {
    /// Settings file missing, unreadable, or lacking a required key.
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (connection, migration, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The cipher engine reported a non-ok status.
    #[error("{op} error with status: {status}")]
    Cipher { op: CipherOp, status: String },

    /// No supported filter combination was supplied to search or delete.
    #[error("unsupported filter: none of id, service, username or tag was supplied")]
    UnsupportedFilter,

    /// An id-based lookup found no entry.
    #[error("no entry with id {id}")]
    NotFound { id: i64 },

    /// An import root is not a directory.
    #[error("{} is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Filesystem errors while importing, exporting or editing.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PassdbError {
    /// Build a [`PassdbError::Storage`] from any error.
    pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage {
            source: Box::new(e),
        }
    }

    /// Build a [`PassdbError::Io`] tagged with the path being touched.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The process exit status the binary uses for this error.
    ///
    /// Libraries never terminate the process; only the outermost boundary
    /// maps errors to these codes.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Cipher {
                op: CipherOp::Encrypt,
                ..
            } => EXIT_ENCRYPT_FAILED,
            Self::Cipher {
                op: CipherOp::Decrypt,
                ..
            } => EXIT_DECRYPT_FAILED,
            Self::NotFound { .. } => EXIT_NOT_FOUND,
            Self::NotADirectory { .. } => EXIT_NOT_A_DIRECTORY,
            Self::UnsupportedFilter => 0,
            _ => 1,
        }
    }
}
