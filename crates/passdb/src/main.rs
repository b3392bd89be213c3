// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! passdb - a command-line password vault.
//!
//! This is the binary entry point. Library crates never exit the process;
//! errors come back here and are mapped to exit statuses.

mod commands;
mod display;
mod editor;
mod prompt;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use passdb_core::{CipherMode, Filter};
use passdb_vault::ImportOptions;
use tracing_subscriber::EnvFilter;

use crate::commands::RunError;

/// passdb - passwords in SQLite, encrypted with GnuPG.
#[derive(Parser, Debug)]
#[command(name = "passdb", version, about, long_about = None)]
pub struct Cli {
    /// Settings file (default: ./passdb.toml, then ~/.config/passdb/passdb.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding `storage.database_path`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the ACCOUNT table if needed and list the settings.
    Init {
        /// Do not print the settings listing.
        #[arg(long)]
        no_list: bool,
    },
    /// List every entry.
    ShowAll {
        /// Decrypt and print passwords.
        #[arg(long)]
        show_password: bool,
    },
    /// Find entries by id, service, username and/or tag.
    Search {
        #[command(flatten)]
        filter: FilterArgs,
        /// Decrypt and print passwords.
        #[arg(long)]
        show_password: bool,
    },
    /// Delete entries by id, service, username and/or tag, asking per entry.
    Remove {
        #[command(flatten)]
        filter: FilterArgs,
        /// Decrypt and print passwords of the candidates.
        #[arg(long)]
        show_password: bool,
        /// Do not export deleted entries first.
        #[arg(long)]
        no_backup: bool,
        /// Where deleted entries are exported.
        #[arg(long, default_value = "./_DELETED")]
        backup_dir: PathBuf,
    },
    /// Import one password file (`.gpg` or clear text).
    FileImport {
        file: PathBuf,
        #[command(flatten)]
        import: ImportArgs,
    },
    /// Import every file below a directory, tagged by its sub-directories.
    DirImport {
        directory: PathBuf,
        #[command(flatten)]
        import: ImportArgs,
    },
    /// Export every entry's ciphertext to `<dir>/<tag words>/<service>.gpg`.
    ExportDb {
        #[arg(long, default_value = "_Export")]
        directory: PathBuf,
    },
    /// Export one entry's ciphertext.
    ExportEntry {
        #[arg(long)]
        id: i64,
        #[arg(long, default_value = "_Export")]
        directory: PathBuf,
    },
    /// Re-encrypt every entry under the mode opposite to the configured one.
    TranscodeDb {
        /// Write the new mode to the settings when every entry converted.
        #[arg(long)]
        persist: bool,
    },
    /// Record the cipher mode in the settings file.
    CommitMode {
        /// `shared-secret` or `identity`.
        mode: CipherMode,
    },
    /// Add an entry interactively.
    InputEntry {
        #[command(flatten)]
        source: PasswordSource,
    },
    /// Edit an entry in the configured editor.
    UpdateEntry {
        #[arg(long)]
        id: i64,
    },
    /// Print a generated password.
    Generate {
        /// Dictionary words instead of random characters.
        #[arg(long)]
        xkcd: bool,
    },
    /// Inspect or change the settings file.
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

/// Settings subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print every section and key, key material masked.
    Show,
    /// Set one key. The value is read as TOML when it parses, else as text.
    Set {
        section: String,
        key: String,
        value: String,
    },
}

/// Search and delete inputs.
#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    #[arg(long)]
    id: Option<i64>,
    #[arg(long)]
    service: Option<String>,
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    tag: Option<String>,
}

impl From<FilterArgs> for Filter {
    fn from(args: FilterArgs) -> Self {
        Filter {
            id: args.id,
            service: args.service,
            username: args.username,
            tag: args.tag,
        }
    }
}

/// Overrides applied to imported entries.
#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    /// Username for every imported entry (default `Import`).
    #[arg(long)]
    username: Option<String>,
    /// Extra tag put before the directory-derived tag.
    #[arg(long)]
    tag: Option<String>,
    /// Appended to the `Imported on` note.
    #[arg(long)]
    note: Option<String>,
}

impl From<ImportArgs> for ImportOptions {
    fn from(args: ImportArgs) -> Self {
        ImportOptions {
            username: args.username,
            tag: args.tag,
            note: args.note,
        }
    }
}

/// Where a new entry's password comes from.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct PasswordSource {
    /// Random characters, per `password_preference`.
    #[arg(long)]
    random: bool,
    /// Dictionary words, per `password_preference`.
    #[arg(long)]
    xkcd: bool,
    /// Type the password in the configured editor.
    #[arg(long)]
    editor: bool,
    /// Read several lines until end of input instead of a hidden prompt.
    #[arg(long)]
    multiline: bool,
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("passdb={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

/// The log level after `-v` flags are applied.
fn effective_level(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match commands::run(cli) {
        Ok(()) => 0,
        Err(RunError::Config(errors)) => {
            passdb_config::render_errors(&errors);
            1
        }
        Err(RunError::Vault(e)) => {
            eprintln!("passdb: {e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}
