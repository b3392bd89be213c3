// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for passdb.
//!
//! This crate provides the error taxonomy, the domain types, the query
//! predicate builder and the seam traits (cipher engine, entry store,
//! settings source) used throughout the passdb workspace.

pub mod error;
pub mod filter;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PassdbError;
pub use filter::{Clause, ClauseValue, Field, Filter, MatchOp, Predicate, PredicateShape};
pub use traits::{CipherEngine, CipherInput, ConfigSource, EntryStore};
pub use types::{CipherConfig, CipherMode, CipherOp, Entry, EntryFields, NewEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_distinguish_encrypt_and_decrypt() {
        let enc = PassdbError::Cipher {
            op: CipherOp::Encrypt,
            status: "invalid recipient".into(),
        };
        let dec = PassdbError::Cipher {
            op: CipherOp::Decrypt,
            status: "bad passphrase".into(),
        };
        assert_eq!(enc.exit_code(), 96);
        assert_eq!(dec.exit_code(), 97);
    }

    #[test]
    fn exit_codes_for_lookup_and_import_failures() {
        assert_eq!(PassdbError::NotFound { id: 3 }.exit_code(), 89);
        assert_eq!(
            PassdbError::NotADirectory {
                path: "/tmp/x".into()
            }
            .exit_code(),
            99
        );
        assert_eq!(PassdbError::UnsupportedFilter.exit_code(), 0);
        assert_eq!(PassdbError::Config("missing".into()).exit_code(), 1);
    }

    #[test]
    fn cipher_error_message_names_the_operation() {
        let err = PassdbError::Cipher {
            op: CipherOp::Decrypt,
            status: "NO_SECKEY".into(),
        };
        assert_eq!(err.to_string(), "decrypt error with status: NO_SECKEY");
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_engine<T: CipherEngine>() {}
        fn _assert_store<T: EntryStore>() {}
        fn _assert_source<T: ConfigSource>() {}
    }
}
