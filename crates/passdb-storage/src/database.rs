// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup and migrations.
//!
//! One [`Database`] owns one connection. passdb is single-threaded, so
//! there is no writer thread or pool.

use std::path::{Path, PathBuf};

use passdb_core::PassdbError;
use rusqlite::Connection;
use tracing::debug;

use crate::migrations;

/// An open passdb database.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Open (creating if needed) the database file at `path` and bring its
    /// schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PassdbError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PassdbError::io(parent, e))?;
        }

        let conn = Connection::open(path).map_err(PassdbError::storage)?;
        let db = Self::prepare(conn, Some(path.to_path_buf()))?;
        debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open a private in-memory database with the full schema.
    pub fn open_in_memory() -> Result<Self, PassdbError> {
        let conn = Connection::open_in_memory().map_err(PassdbError::storage)?;
        Self::prepare(conn, None)
    }

    fn prepare(mut conn: Connection, path: Option<PathBuf>) -> Result<Self, PassdbError> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(PassdbError::storage)?;
        migrations::run_migrations(&mut conn)?;
        Ok(Self { conn, path })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// The database file, or `None` for an in-memory database.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
