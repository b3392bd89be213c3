// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Seam traits between the vault operations and their collaborators.
//!
//! Everything here is synchronous: each call blocks until the store,
//! the cipher engine or the settings file has answered.

pub mod cipher;
pub mod config;
pub mod storage;

pub use cipher::{CipherEngine, CipherInput};
pub use config::ConfigSource;
pub use storage::EntryStore;
