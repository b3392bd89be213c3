// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`CipherEngine`] backed by the `gpg` executable.
//!
//! Data travels over stdin/stdout. Key material is written to a private
//! temporary file passed as `--passphrase-file`, so it never appears on a
//! command line. Every envelope is ASCII armored.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use passdb_core::{CipherConfig, CipherEngine, CipherInput, CipherMode, CipherOp, PassdbError};
use secrecy::{ExposeSecret, SecretString};
use tempfile::NamedTempFile;
use tracing::debug;
use zeroize::Zeroizing;

/// Drives `gpg --batch` for every cipher call.
#[derive(Debug, Clone)]
pub struct GpgEngine {
    program: PathBuf,
}

impl Default for GpgEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GpgEngine {
    /// Use `gpg` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("gpg")
    }

    /// Use a specific executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn run(
        &self,
        op: CipherOp,
        args: Vec<OsString>,
        stdin: Option<&[u8]>,
        passphrase: Option<&SecretString>,
    ) -> Result<Zeroizing<Vec<u8>>, PassdbError> {
        let cipher_err = |status: String| PassdbError::Cipher { op, status };

        // Lives until the child exits.
        let passfile = match passphrase {
            Some(key) => Some(write_passphrase(key).map_err(|e| {
                cipher_err(format!("cannot write passphrase file: {e}"))
            })?),
            None => None,
        };

        let mut cmd = Command::new(&self.program);
        if let Some(file) = &passfile {
            cmd.arg("--passphrase-file").arg(file.path());
        }
        cmd.args(&args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(program = %self.program.display(), %op, "running gpg");

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                cipher_err(format!("{} not found", self.program.display()))
            } else {
                cipher_err(format!("failed to execute {}: {e}", self.program.display()))
            }
        })?;

        // stdin is fed from a second thread so a large payload cannot
        // deadlock against a full stdout pipe.
        let output = std::thread::scope(|scope| {
            if let (Some(data), Some(mut pipe)) = (stdin, child.stdin.take()) {
                scope.spawn(move || {
                    // A write error means gpg exited early; its status says why.
                    let _ = pipe.write_all(data);
                });
            }
            child.wait_with_output()
        })
        .map_err(|e| cipher_err(format!("failed to wait for gpg: {e}")))?;

        let stdout = Zeroizing::new(output.stdout);
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let status = if stderr.is_empty() {
                format!("gpg exited with {}", output.status)
            } else {
                stderr
            };
            debug!(%op, %status, "gpg failed");
            return Err(cipher_err(status));
        }
        Ok(stdout)
    }
}

fn write_passphrase(key: &SecretString) -> std::io::Result<NamedTempFile> {
    // NamedTempFile is created with owner-only permissions.
    let mut file = NamedTempFile::new()?;
    file.write_all(key.expose_secret().as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// Options shared by every invocation.
fn common_args(config: &CipherConfig) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["--batch", "--yes", "--quiet", "--pinentry-mode", "loopback"]
        .into_iter()
        .map(OsString::from)
        .collect();
    if let Some(home) = &config.home {
        args.push("--homedir".into());
        args.push(home.into());
    }
    if let Some(keyring) = &config.keyring {
        args.push("--no-default-keyring".into());
        args.push("--keyring".into());
        args.push(keyring.into());
    }
    args
}

/// Arguments for encrypting stdin under `mode`.
pub(crate) fn encrypt_args(
    mode: CipherMode,
    config: &CipherConfig,
) -> Result<Vec<OsString>, PassdbError> {
    let mut args = common_args(config);
    args.push("--armor".into());
    match mode {
        CipherMode::SharedSecret => {
            if config.key.is_none() {
                return Err(PassdbError::Cipher {
                    op: CipherOp::Encrypt,
                    status: "no key material configured for shared-secret encryption".into(),
                });
            }
            args.push("--symmetric".into());
        }
        CipherMode::Identity => {
            if config.recipients.is_empty() {
                return Err(PassdbError::Cipher {
                    op: CipherOp::Encrypt,
                    status: "no recipients configured for identity encryption".into(),
                });
            }
            args.push("--trust-model".into());
            args.push("always".into());
            args.push("--encrypt".into());
            for recipient in &config.recipients {
                args.push("--recipient".into());
                args.push(recipient.into());
            }
        }
    }
    Ok(args)
}

/// Arguments for decrypting `input`; a file path goes last.
pub(crate) fn decrypt_args(input: CipherInput<'_>, config: &CipherConfig) -> Vec<OsString> {
    let mut args = common_args(config);
    args.push("--decrypt".into());
    if let CipherInput::File(path) = input {
        args.push(path.into());
    }
    args
}

impl CipherEngine for GpgEngine {
    fn encrypt(
        &self,
        plaintext: &[u8],
        mode: CipherMode,
        config: &CipherConfig,
    ) -> Result<String, PassdbError> {
        let args = encrypt_args(mode, config)?;
        let passphrase = match mode {
            CipherMode::SharedSecret => config.key.as_ref(),
            CipherMode::Identity => None,
        };
        let out = self.run(CipherOp::Encrypt, args, Some(plaintext), passphrase)?;
        String::from_utf8(out.to_vec()).map_err(|_| PassdbError::Cipher {
            op: CipherOp::Encrypt,
            status: "armored output is not valid UTF-8".into(),
        })
    }

    fn decrypt(
        &self,
        input: CipherInput<'_>,
        config: &CipherConfig,
    ) -> Result<SecretString, PassdbError> {
        let args = decrypt_args(input, config);
        let stdin = match input {
            CipherInput::Armored(text) => Some(text.as_bytes()),
            CipherInput::File(_) => None,
        };
        let out = self.run(CipherOp::Decrypt, args, stdin, config.key.as_ref())?;
        let text = std::str::from_utf8(&out).map_err(|_| PassdbError::Cipher {
            op: CipherOp::Decrypt,
            status: "plaintext is not valid UTF-8".into(),
        })?;
        Ok(SecretString::from(text.to_owned()))
    }

    fn name(&self) -> &'static str {
        "gpg"
    }
}
