// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait over the single `ACCOUNT` record collection.

use crate::error::PassdbError;
use crate::filter::Predicate;
use crate::types::{Entry, NewEntry};

/// A persistent store of [`Entry`] rows keyed by integer id.
///
/// Every method that returns several rows returns them in ascending id
/// order.
pub trait EntryStore {
    /// Create the record collection if it does not exist yet.
    fn ensure_schema(&self) -> Result<(), PassdbError>;

    /// Insert a new row and return the id the store assigned.
    fn insert(&self, entry: &NewEntry) -> Result<i64, PassdbError>;

    /// Fetch one row by id.
    fn get(&self, id: i64) -> Result<Option<Entry>, PassdbError>;

    /// Replace every column except `id`. Returns whether a row was updated.
    fn update(&self, id: i64, entry: &NewEntry) -> Result<bool, PassdbError>;

    /// Replace only the password column. Returns whether a row was updated.
    fn update_password(&self, id: i64, password: &str) -> Result<bool, PassdbError>;

    /// Delete one row by id. Returns whether a row was removed.
    fn delete(&self, id: i64) -> Result<bool, PassdbError>;

    /// Every row.
    fn list_all(&self) -> Result<Vec<Entry>, PassdbError>;

    /// Rows matching `predicate`.
    fn find(&self, predicate: &Predicate) -> Result<Vec<Entry>, PassdbError>;
}
