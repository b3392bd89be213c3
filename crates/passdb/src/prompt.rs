// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operator input: line prompts, passwords and delete confirmations.

use std::io::{BufRead, IsTerminal};

use passdb_core::{Entry, PassdbError};
use passdb_vault::confirm::is_yes;
use passdb_vault::Confirm;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use secrecy::SecretString;
use zeroize::Zeroizing;

use crate::display;

/// Line-edited prompts on the terminal.
pub struct LinePrompt {
    rl: DefaultEditor,
}

impl LinePrompt {
    pub fn new() -> Result<Self, PassdbError> {
        let rl = DefaultEditor::new()
            .map_err(|e| PassdbError::Internal(format!("failed to initialize readline: {e}")))?;
        Ok(Self { rl })
    }

    /// Read one line. End of input reads as an empty line; Ctrl-C aborts.
    pub fn line(&mut self, prompt: &str) -> Result<String, PassdbError> {
        match self.rl.readline(prompt) {
            Ok(line) => Ok(line),
            Err(ReadlineError::Eof) => Ok(String::new()),
            Err(ReadlineError::Interrupted) => {
                Err(PassdbError::Internal("interrupted".to_string()))
            }
            Err(e) => Err(PassdbError::Internal(format!("failed to read input: {e}"))),
        }
    }
}

/// Read a password without echo.
pub fn hidden_password(prompt: &str) -> Result<SecretString, PassdbError> {
    if !std::io::stdin().is_terminal() {
        return Err(PassdbError::Internal(
            "no terminal to read the password from; use --multiline, --editor or a generator"
                .to_string(),
        ));
    }
    eprint!("{prompt}");
    let password = rpassword::read_password()
        .map_err(|e| PassdbError::Internal(format!("failed to read password: {e}")))?;
    if password.is_empty() {
        return Err(PassdbError::Internal("empty password not allowed".to_string()));
    }
    Ok(SecretString::from(password))
}

/// Read every line until end of input and join them with `\n`.
pub fn multiline_password(opening: &str) -> Result<SecretString, PassdbError> {
    println!("{opening}");
    println!("Enter/Paste your {opening}. Ctrl-D to save it.");
    read_lines(std::io::stdin().lock())
}

fn read_lines(reader: impl BufRead) -> Result<SecretString, PassdbError> {
    let mut joined = Zeroizing::new(String::new());
    for (i, line) in reader.lines().enumerate() {
        let line = Zeroizing::new(
            line.map_err(|e| PassdbError::Internal(format!("failed to read input: {e}")))?,
        );
        if i > 0 {
            joined.push('\n');
        }
        joined.push_str(&line);
    }
    Ok(SecretString::from(std::mem::take(&mut *joined)))
}

/// Asks on the terminal before each deletion.
pub struct TerminalConfirm {
    prompt: LinePrompt,
}

impl TerminalConfirm {
    pub fn new() -> Result<Self, PassdbError> {
        Ok(Self {
            prompt: LinePrompt::new()?,
        })
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, entry: &Entry) -> Result<bool, PassdbError> {
        println!("{}\n", display::delete_line(entry));
        let answer = self.prompt.line("Yes/No ? ")?;
        let service = entry.service.as_deref().unwrap_or(display::NULL_FIELD);
        if is_yes(&answer) {
            display::print_alert(&format!("!!! DELETING entry: {service} !!!"));
            println!();
            Ok(true)
        } else {
            println!(
                "Skipping entry id: {}, service: {service}, username: {}\n",
                entry.id,
                entry.username.as_deref().unwrap_or(display::NULL_FIELD)
            );
            Ok(false)
        }
    }
}
