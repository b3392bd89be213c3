// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings source consulted by every cryptographic call.

use crate::error::PassdbError;
use crate::types::{CipherConfig, CipherMode};

/// Supplies a fresh [`CipherConfig`] on each call.
///
/// Implementations must not cache: an edit to the underlying settings is
/// visible to the very next call.
pub trait ConfigSource {
    /// Read the current cipher configuration.
    fn cipher_config(&self) -> Result<CipherConfig, PassdbError>;

    /// Durably record `mode` as the configured cipher mode.
    fn commit_mode(&self, mode: CipherMode) -> Result<(), PassdbError>;
}
