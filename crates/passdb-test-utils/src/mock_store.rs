// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store and confirmation doubles.
//!
//! `CountingStore` wraps any `EntryStore` and counts the calls that reach
//! it. `ScriptedConfirm` answers delete confirmations from a queue and
//! captures which entries were asked about.

use std::cell::Cell;
use std::collections::VecDeque;

use passdb_core::{Entry, EntryStore, NewEntry, PassdbError, Predicate};
use passdb_vault::Confirm;

/// Forwards to an inner store, counting every call.
pub struct CountingStore<S> {
    inner: S,
    calls: Cell<usize>,
}

impl<S: EntryStore> CountingStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Calls forwarded since creation or the last reset.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn reset(&self) {
        self.calls.set(0);
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn count(&self) -> &S {
        self.calls.set(self.calls.get() + 1);
        &self.inner
    }
}

impl<S: EntryStore> EntryStore for CountingStore<S> {
    fn ensure_schema(&self) -> Result<(), PassdbError> {
        self.count().ensure_schema()
    }

    fn insert(&self, entry: &NewEntry) -> Result<i64, PassdbError> {
        self.count().insert(entry)
    }

    fn get(&self, id: i64) -> Result<Option<Entry>, PassdbError> {
        self.count().get(id)
    }

    fn update(&self, id: i64, entry: &NewEntry) -> Result<bool, PassdbError> {
        self.count().update(id, entry)
    }

    fn update_password(&self, id: i64, password: &str) -> Result<bool, PassdbError> {
        self.count().update_password(id, password)
    }

    fn delete(&self, id: i64) -> Result<bool, PassdbError> {
        self.count().delete(id)
    }

    fn list_all(&self) -> Result<Vec<Entry>, PassdbError> {
        self.count().list_all()
    }

    fn find(&self, predicate: &Predicate) -> Result<Vec<Entry>, PassdbError> {
        self.count().find(predicate)
    }
}

/// Answers confirmations from a fixed script.
///
/// When the script runs out every further answer is "no".
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
    answers: VecDeque<bool>,
    asked: Vec<i64>,
}

impl ScriptedConfirm {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Answer yes to everything.
    pub fn always_yes(count: usize) -> Self {
        Self::new(std::iter::repeat_n(true, count))
    }

    /// Ids asked about, in order.
    pub fn asked(&self) -> &[i64] {
        &self.asked
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, entry: &Entry) -> Result<bool, PassdbError> {
        self.asked.push(entry.id);
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
