// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by storage, cipher and vault operations.

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One stored account record.
///
/// `password` is always armored ciphertext produced by the cipher
/// controller; it is never held in clear inside an `Entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub service: Option<String>,
    pub username: Option<String>,
    pub password: String,
    pub tag: Option<String>,
    pub note: Option<String>,
}

impl Entry {
    /// The editable projection of this entry, with the given password text.
    pub fn fields_with_password(&self, password: String) -> EntryFields {
        EntryFields {
            note: self.note.clone(),
            password,
            service: self.service.clone(),
            tag: self.tag.clone(),
            username: self.username.clone(),
        }
    }
}

/// An entry that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewEntry {
    pub service: Option<String>,
    pub username: Option<String>,
    pub password: String,
    pub tag: Option<String>,
    pub note: Option<String>,
}

/// Every column except `id`, in the shape handed to an editor.
///
/// Fields are declared in alphabetical order so the JSON written for
/// editing has a stable key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    #[serde(default)]
    pub note: Option<String>,
    pub password: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// How passwords are encrypted at rest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CipherMode {
    /// One passphrase both encrypts and decrypts.
    SharedSecret,
    /// Encrypt to the public identities of the configured recipients.
    Identity,
}

impl CipherMode {
    /// The opposite mode.
    pub fn inverted(self) -> Self {
        match self {
            Self::SharedSecret => Self::Identity,
            Self::Identity => Self::SharedSecret,
        }
    }

    /// Build from the settings flag `gpg.symmetric_encryption`.
    pub fn from_symmetric_flag(symmetric: bool) -> Self {
        if symmetric {
            Self::SharedSecret
        } else {
            Self::Identity
        }
    }

    /// The value `gpg.symmetric_encryption` takes for this mode.
    pub fn symmetric_flag(self) -> bool {
        matches!(self, Self::SharedSecret)
    }
}

/// Which direction a cipher call was going.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum CipherOp {
    Encrypt,
    Decrypt,
}

/// Everything a cipher call needs to know, read fresh for every call.
#[derive(Debug)]
pub struct CipherConfig {
    /// Alternate engine home directory (`~` already expanded).
    pub home: Option<PathBuf>,
    /// Keyring file inside the home directory.
    pub keyring: Option<String>,
    /// Recipient identities for identity mode.
    pub recipients: Vec<String>,
    /// The durable, configured mode.
    pub mode: CipherMode,
    /// Passphrase used for shared-secret encryption and offered on decrypt.
    pub key: Option<SecretString>,
}

impl Clone for CipherConfig {
    fn clone(&self) -> Self {
        Self {
            home: self.home.clone(),
            keyring: self.keyring.clone(),
            recipients: self.recipients.clone(),
            mode: self.mode,
            key: self
                .key
                .as_ref()
                .map(|k| SecretString::from(k.expose_secret().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn cipher_mode_inverts_both_ways() {
        assert_eq!(CipherMode::SharedSecret.inverted(), CipherMode::Identity);
        assert_eq!(CipherMode::Identity.inverted(), CipherMode::SharedSecret);
        assert_eq!(CipherMode::Identity.inverted().inverted(), CipherMode::Identity);
    }

    #[test]
    fn cipher_mode_display_and_parse() {
        assert_eq!(CipherMode::SharedSecret.to_string(), "shared-secret");
        assert_eq!(
            CipherMode::from_str("identity").unwrap(),
            CipherMode::Identity
        );
        assert!(CipherMode::from_str("symmetric").is_err());
    }

    #[test]
    fn symmetric_flag_maps_to_mode() {
        assert_eq!(CipherMode::from_symmetric_flag(true), CipherMode::SharedSecret);
        assert_eq!(CipherMode::from_symmetric_flag(false), CipherMode::Identity);
        assert!(CipherMode::SharedSecret.symmetric_flag());
    }

    #[test]
    fn entry_fields_json_has_sorted_keys_and_no_id() {
        let entry = Entry {
            id: 7,
            service: Some("github".into()),
            username: Some("alice".into()),
            password: "-----BEGIN PGP MESSAGE-----".into(),
            tag: Some("work".into()),
            note: None,
        };
        let json = serde_json::to_string(&entry.fields_with_password("hunter2".into())).unwrap();
        assert!(!json.contains("\"id\""));
        let keys: Vec<usize> = ["note", "password", "service", "tag", "username"]
            .iter()
            .map(|k| json.find(&format!("\"{k}\"")).unwrap())
            .collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }
}
