// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password encryption for passdb.
//!
//! [`CipherController`] decides which mode a call runs in (the configured
//! one, or its inverse when transcoding) and hands the work to a
//! [`passdb_core::CipherEngine`]. [`GpgEngine`] is the production engine and
//! drives the `gpg` executable.

pub mod controller;
pub mod engine;
pub mod mask;

pub use controller::CipherController;
pub use engine::GpgEngine;
pub use mask::mask_secret;
