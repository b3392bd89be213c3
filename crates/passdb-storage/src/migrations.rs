// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.

use passdb_core::PassdbError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// The `ACCOUNT` table definition. Idempotent.
pub(crate) const ACCOUNT_SCHEMA: &str = include_str!("../migrations/V1__create_account.sql");

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history` table.
/// Databases created before that table existed keep their `ACCOUNT` rows
/// because the first migration only creates the table when it is missing.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), PassdbError> {
    embedded::migrations::runner()
        .run(conn)
        .map_err(PassdbError::storage)?;
    Ok(())
}
