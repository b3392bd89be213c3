// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for passdb.
//!
//! Provides a single-file SQLite store with embedded migrations, typed
//! CRUD operations on the `ACCOUNT` table, and rendering of query
//! predicates into parameterized `WHERE` clauses.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod predicate;
pub mod queries;

pub use database::Database;
