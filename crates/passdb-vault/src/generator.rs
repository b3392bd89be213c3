// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password generation.
//!
//! Two styles: random characters, and xkcd-style words drawn from a
//! dictionary file. All randomness comes from the OS CSPRNG.

use std::path::Path;

use passdb_config::model::{expand_home, CaseSelection, PasswordPreference};
use passdb_core::PassdbError;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use secrecy::SecretString;

const LETTERS_AND_DIGITS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Which generator to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStyle {
    Random,
    Xkcd,
}

/// Generate a password in `style` using the configured preferences.
pub fn generate(style: PasswordStyle, prefs: &PasswordPreference) -> Result<SecretString, PassdbError> {
    match style {
        PasswordStyle::Random => Ok(random_style(prefs.length, prefs.punctuation)),
        PasswordStyle::Xkcd => {
            let words = load_words(&expand_home(&prefs.dictionary), prefs.caseselection)?;
            xkcd_style(&words, prefs.numberwords, &prefs.delimiter)
        }
    }
}

/// `length` characters drawn from ASCII letters and digits, plus ASCII
/// punctuation when `punctuation` is set.
pub fn random_style(length: usize, punctuation: bool) -> SecretString {
    let mut alphabet: Vec<char> = LETTERS_AND_DIGITS.chars().collect();
    if punctuation {
        alphabet.extend(PUNCTUATION.chars());
    }

    let password: String = (0..length)
        .filter_map(|_| alphabet.choose(&mut OsRng))
        .collect();
    SecretString::from(password)
}

/// Read a word list, one word per line, applying `case` to every word.
/// Blank lines are dropped.
pub fn load_words(path: &Path, case: CaseSelection) -> Result<Vec<String>, PassdbError> {
    let content = std::fs::read_to_string(path).map_err(|e| PassdbError::io(path, e))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(|w| apply_case(w, case))
        .collect())
}

fn apply_case(word: &str, case: CaseSelection) -> String {
    match case {
        CaseSelection::Lower => word.to_lowercase(),
        CaseSelection::Upper => word.to_uppercase(),
        CaseSelection::First => {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        }
    }
}

/// `count` words chosen independently from `words`, joined by `delimiter`.
pub fn xkcd_style(words: &[String], count: usize, delimiter: &str) -> Result<SecretString, PassdbError> {
    if words.is_empty() {
        return Err(PassdbError::Config("the password dictionary has no words".into()));
    }
    let chosen: Vec<&str> = (0..count)
        .filter_map(|_| words.choose(&mut OsRng).map(String::as_str))
        .collect();
    Ok(SecretString::from(chosen.join(delimiter)))
}
