// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `ACCOUNT` CRUD operations.

use passdb_core::{Entry, NewEntry, PassdbError, Predicate};
use rusqlite::{params, params_from_iter, OptionalExtension, Row};

use crate::database::Database;
use crate::predicate;

const COLUMNS: &str = "id, service, username, password, tag, note";

fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<Entry> {
    Ok(Entry {
        id: row.get(0)?,
        service: row.get(1)?,
        username: row.get(2)?,
        // Rows written by other tools may carry a NULL password.
        password: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        tag: row.get(4)?,
        note: row.get(5)?,
    })
}

/// Create the `ACCOUNT` table if missing.
pub fn ensure_table(db: &Database) -> Result<(), PassdbError> {
    db.connection()
        .execute_batch(crate::migrations::ACCOUNT_SCHEMA)
        .map_err(PassdbError::storage)
}

/// Insert an entry and return its new id.
pub fn insert_entry(db: &Database, entry: &NewEntry) -> Result<i64, PassdbError> {
    let conn = db.connection();
    conn.execute(
        "INSERT INTO ACCOUNT (service, username, password, tag, note)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            entry.service,
            entry.username,
            entry.password,
            entry.tag,
            entry.note,
        ],
    )
    .map_err(PassdbError::storage)?;
    Ok(conn.last_insert_rowid())
}

/// Get an entry by id.
pub fn get_entry(db: &Database, id: i64) -> Result<Option<Entry>, PassdbError> {
    db.connection()
        .query_row(
            &format!("SELECT {COLUMNS} FROM ACCOUNT WHERE id = ?1"),
            params![id],
            row_to_entry,
        )
        .optional()
        .map_err(PassdbError::storage)
}

/// Replace every column of an entry except its id.
pub fn update_entry(db: &Database, id: i64, entry: &NewEntry) -> Result<bool, PassdbError> {
    let changed = db
        .connection()
        .execute(
            "UPDATE ACCOUNT SET service = ?1, username = ?2, password = ?3, tag = ?4, note = ?5
             WHERE id = ?6",
            params![
                entry.service,
                entry.username,
                entry.password,
                entry.tag,
                entry.note,
                id,
            ],
        )
        .map_err(PassdbError::storage)?;
    Ok(changed > 0)
}

/// Replace only the password column.
pub fn update_password(db: &Database, id: i64, password: &str) -> Result<bool, PassdbError> {
    let changed = db
        .connection()
        .execute(
            "UPDATE ACCOUNT SET password = ?1 WHERE id = ?2",
            params![password, id],
        )
        .map_err(PassdbError::storage)?;
    Ok(changed > 0)
}

/// Delete an entry by id.
pub fn delete_entry(db: &Database, id: i64) -> Result<bool, PassdbError> {
    let changed = db
        .connection()
        .execute("DELETE FROM ACCOUNT WHERE id = ?1", params![id])
        .map_err(PassdbError::storage)?;
    Ok(changed > 0)
}

/// All entries, ascending by id.
pub fn list_entries(db: &Database) -> Result<Vec<Entry>, PassdbError> {
    let mut stmt = db
        .connection()
        .prepare(&format!("SELECT {COLUMNS} FROM ACCOUNT ORDER BY id ASC"))
        .map_err(PassdbError::storage)?;
    let rows = stmt
        .query_map([], row_to_entry)
        .map_err(PassdbError::storage)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(PassdbError::storage)
}

/// Entries matching `predicate`, ascending by id.
pub fn find_entries(db: &Database, predicate: &Predicate) -> Result<Vec<Entry>, PassdbError> {
    let clause = predicate::render(predicate);
    let sql = format!(
        "SELECT {COLUMNS} FROM ACCOUNT WHERE {} ORDER BY id ASC",
        clause.sql
    );
    tracing::trace!(shape = %predicate.shape, %sql, "find entries");

    let mut stmt = db
        .connection()
        .prepare(&sql)
        .map_err(PassdbError::storage)?;
    let rows = stmt
        .query_map(params_from_iter(clause.params), row_to_entry)
        .map_err(PassdbError::storage)?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(PassdbError::storage)
}
