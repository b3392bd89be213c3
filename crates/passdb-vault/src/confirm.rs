// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-row confirmation for destructive operations.

use passdb_core::{Entry, PassdbError};

/// Asks the operator whether one entry may be deleted.
pub trait Confirm {
    /// `Ok(true)` deletes the entry, `Ok(false)` keeps it.
    fn confirm(&mut self, entry: &Entry) -> Result<bool, PassdbError>;
}

/// Reads a yes/no answer: anything starting with `y` or `Y` is yes.
pub fn is_yes(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}
