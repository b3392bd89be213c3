// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for passdb integration tests.
//!
//! Provides mock collaborators and a test harness for fast, deterministic
//! tests that need neither a `gpg` installation nor a settings file.
//!
//! # Components
//!
//! - [`MockCipher`] - Deterministic cipher engine with failure injection
//! - [`MemoryConfigSource`] - In-memory settings that record mode commits
//! - [`CountingStore`] - Store wrapper that counts every call
//! - [`ScriptedConfirm`] - Pre-recorded answers to delete confirmations
//! - [`TestHarness`] - A vault over a temp-dir database with all of the above

pub mod harness;
pub mod mock_cipher;
pub mod mock_config;
pub mod mock_store;

pub use harness::{TestHarness, TestVault};
pub use mock_cipher::MockCipher;
pub use mock_config::MemoryConfigSource;
pub use mock_store::{CountingStore, ScriptedConfirm};
