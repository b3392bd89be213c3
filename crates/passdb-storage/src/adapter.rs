// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the [`EntryStore`] trait.

use passdb_core::{Entry, EntryStore, NewEntry, PassdbError, Predicate};
use tracing::debug;

use crate::database::Database;
use crate::queries::accounts;

impl EntryStore for Database {
    fn ensure_schema(&self) -> Result<(), PassdbError> {
        accounts::ensure_table(self)
    }

    fn insert(&self, entry: &NewEntry) -> Result<i64, PassdbError> {
        let id = accounts::insert_entry(self, entry)?;
        debug!(id, "entry inserted");
        Ok(id)
    }

    fn get(&self, id: i64) -> Result<Option<Entry>, PassdbError> {
        accounts::get_entry(self, id)
    }

    fn update(&self, id: i64, entry: &NewEntry) -> Result<bool, PassdbError> {
        accounts::update_entry(self, id, entry)
    }

    fn update_password(&self, id: i64, password: &str) -> Result<bool, PassdbError> {
        accounts::update_password(self, id, password)
    }

    fn delete(&self, id: i64) -> Result<bool, PassdbError> {
        let removed = accounts::delete_entry(self, id)?;
        debug!(id, removed, "entry delete");
        Ok(removed)
    }

    fn list_all(&self) -> Result<Vec<Entry>, PassdbError> {
        accounts::list_entries(self)
    }

    fn find(&self, predicate: &Predicate) -> Result<Vec<Entry>, PassdbError> {
        accounts::find_entries(self, predicate)
    }
}
