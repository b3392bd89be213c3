// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! [`run`] loads the settings, opens the database and assembles a
//! [`PassVault`] over gpg, then hands off to one function per subcommand.

use std::path::{Path, PathBuf};

use passdb_cipher::GpgEngine;
use passdb_config::model::expand_home;
use passdb_config::{ConfigError, FileConfigSource, PassdbConfig};
use passdb_core::{CipherMode, Filter, PassdbError};
use passdb_storage::Database;
use passdb_vault::generator::{self, PasswordStyle};
use passdb_vault::{
    write_edit_backup, EntryDraft, ImportOptions, ImportOutcome, PassVault, TranscodePersist,
};
use secrecy::ExposeSecret;
use tracing::{debug, info};
use zeroize::Zeroize;

use crate::prompt::{self, LinePrompt, TerminalConfirm};
use crate::{display, editor, Cli, Commands, ConfigCommand, PasswordSource};

/// Directory receiving a JSON copy of each entry before it is edited.
const EDIT_BACKUP_DIR: &str = "_copy";

/// Why a command failed.
#[derive(Debug)]
pub enum RunError {
    /// The settings file is missing or invalid.
    Config(Vec<ConfigError>),
    Vault(PassdbError),
}

impl From<PassdbError> for RunError {
    fn from(e: PassdbError) -> Self {
        Self::Vault(e)
    }
}

impl From<ConfigError> for RunError {
    fn from(e: ConfigError) -> Self {
        Self::Config(vec![e])
    }
}

type CliVault = PassVault<Database, GpgEngine, FileConfigSource>;

/// Everything a subcommand needs.
struct Session {
    config_path: PathBuf,
    db_path: PathBuf,
    /// Settings as loaded at startup. Cipher settings are re-read by the
    /// vault on every call; this copy serves the generator and editor.
    config: PassdbConfig,
    vault: CliVault,
}

/// Run one parsed command line.
pub fn run(cli: Cli) -> Result<(), RunError> {
    let Cli {
        config,
        db,
        verbose,
        command,
    } = cli;
    let config_path = config.unwrap_or_else(passdb_config::default_config_path);

    // Setting a key must work even when the file does not validate.
    if let Commands::Config {
        action: ConfigCommand::Set {
            section,
            key,
            value,
        },
    } = &command
    {
        crate::init_tracing(&crate::effective_level("warn", verbose));
        return config_set(&config_path, section, key, value);
    }

    let config = passdb_config::load_and_validate_path(&config_path).map_err(RunError::Config)?;
    crate::init_tracing(&crate::effective_level(&config.logging.level, verbose));

    let db_path = db.unwrap_or_else(|| expand_home(&config.storage.database_path));
    let session = Session::open(config_path, db_path, config)?;
    session.dispatch(command)
}

fn config_set(path: &Path, section: &str, key: &str, value: &str) -> Result<(), RunError> {
    passdb_config::set_value_str(path, section, key, value)?;
    let shown = display::setting_value(section, key, value);
    println!("  SET {section}.{key} = {shown}");
    Ok(())
}

impl Session {
    fn open(config_path: PathBuf, db_path: PathBuf, config: PassdbConfig) -> Result<Self, PassdbError> {
        let db = Database::open(&db_path)?;
        let vault = PassVault::new(db, GpgEngine::new(), FileConfigSource::new(&config_path));
        vault.init()?;
        debug!(db = %db_path.display(), config = %config_path.display(), "session ready");
        Ok(Self {
            config_path,
            db_path,
            config,
            vault,
        })
    }

    fn dispatch(self, command: Commands) -> Result<(), RunError> {
        match command {
            Commands::Init { no_list } => {
                if !no_list {
                    self.show_settings();
                }
                println!("ACCOUNT table ready in {}", self.db_path.display());
            }
            Commands::ShowAll { show_password } => {
                display::print_entries(&self.vault.show_all(show_password)?);
            }
            Commands::Search {
                filter,
                show_password,
            } => self.search(filter.into(), show_password)?,
            Commands::Remove {
                filter,
                show_password,
                no_backup,
                backup_dir,
            } => self.remove(filter.into(), show_password, (!no_backup).then_some(backup_dir))?,
            Commands::FileImport { file, import } => self.file_import(&file, import.into())?,
            Commands::DirImport { directory, import } => {
                self.dir_import(&expand_home(&directory.to_string_lossy()), import.into())?;
            }
            Commands::ExportDb { directory } => {
                for path in self.vault.export_all(&directory)? {
                    println!("exported {}", path.display());
                }
            }
            Commands::ExportEntry { id, directory } => {
                match self.vault.export_entry(id, &directory)? {
                    Some(path) => println!("exported {}", path.display()),
                    None => println!("entry {id} has no password, nothing exported"),
                }
            }
            Commands::TranscodeDb { persist } => self.transcode(persist)?,
            Commands::CommitMode { mode } => self.commit_mode(mode)?,
            Commands::InputEntry { source } => self.input_entry(&source)?,
            Commands::UpdateEntry { id } => self.update_entry(id)?,
            Commands::Generate { xkcd } => {
                let style = if xkcd {
                    PasswordStyle::Xkcd
                } else {
                    PasswordStyle::Random
                };
                let password = generator::generate(style, &self.config.password_preference)?;
                println!("{}", password.expose_secret());
            }
            Commands::Config { action } => match action {
                ConfigCommand::Show => self.show_settings(),
                ConfigCommand::Set {
                    section,
                    key,
                    value,
                } => config_set(&self.config_path, &section, &key, &value)?,
            },
        }
        Ok(())
    }

    fn show_settings(&self) {
        display::print_settings(&self.config_path, &self.db_path, &self.config);
    }

    fn search(&self, filter: Filter, show_password: bool) -> Result<(), PassdbError> {
        let Some(predicate) = filter.predicate() else {
            println!("{}", display::unsupported_filter(&filter));
            return Ok(());
        };
        println!("\nquery: {}\n", display::describe_predicate(&predicate));
        display::print_entries(&self.vault.search(&filter, show_password)?);
        Ok(())
    }

    fn remove(
        &self,
        filter: Filter,
        show_password: bool,
        backup_dir: Option<PathBuf>,
    ) -> Result<(), PassdbError> {
        let Some(predicate) = filter.predicate() else {
            println!("{}", display::unsupported_filter(&filter));
            return Ok(());
        };
        println!("\nquery: {}\n", display::describe_predicate(&predicate));

        let candidates = self.vault.search(&filter, show_password)?;
        if candidates.is_empty() {
            println!("\n--- Found NO entry to DELETE ---");
            println!("--- Have a good one ---\n");
            return Ok(());
        }
        display::print_entries(&candidates);
        println!("\n--- Found {} entries to DELETE ---", candidates.len());
        println!("Let's do it one entry at a time ...\n");

        let mut confirm = TerminalConfirm::new()?;
        let deleted = self
            .vault
            .remove(&filter, &mut confirm, backup_dir.as_deref())?;
        println!("--- Deleted {} of {} entries ---", deleted.len(), candidates.len());
        if let (Some(dir), false) = (&backup_dir, deleted.is_empty()) {
            println!("--- Copies kept under {} ---", dir.display());
        }
        Ok(())
    }

    fn file_import(&self, file: &Path, options: ImportOptions) -> Result<(), PassdbError> {
        match self.vault.file_import(file, None, &options)? {
            ImportOutcome::Imported(id) => println!("imported {} as entry {id}", file.display()),
            ImportOutcome::Skipped => {
                let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                println!("!!! Ignore dot file: {name} !!!");
            }
        }
        Ok(())
    }

    fn dir_import(&self, dir: &Path, options: ImportOptions) -> Result<(), PassdbError> {
        let report = self.vault.dir_import(dir, &options)?;
        for (path, id) in &report.imported {
            println!("imported {} as entry {id}", path.display());
        }
        for path in &report.skipped {
            println!("!!! Ignore dot file: {} !!!", path.display());
        }
        println!(
            "--- {} imported, {} skipped ---",
            report.imported.len(),
            report.skipped.len()
        );

        match report.failure {
            None => Ok(()),
            Some(failure) => {
                display::print_alert(&format!(
                    "!!! Import stopped at {}; {} file(s) not imported !!!",
                    failure.path.display(),
                    report.remaining.len()
                ));
                for path in &report.remaining {
                    println!("    {}", path.display());
                }
                Err(failure.error)
            }
        }
    }

    fn transcode(&self, persist: bool) -> Result<(), PassdbError> {
        let persist = if persist {
            TranscodePersist::OnSuccess
        } else {
            TranscodePersist::Manual
        };
        let report = self.vault.transcode_all(persist)?;
        println!(
            "--- {} entries re-encrypted from {} to {} ---",
            report.converted.len(),
            report.from,
            report.to
        );

        if let Some(failure) = report.failure {
            display::print_alert(&format!(
                "!!! Transcode stopped at entry {}; entries {:?} are still {} !!!",
                failure.id, report.remaining, report.from
            ));
            if !report.converted.is_empty() {
                println!(
                    "    entries {:?} are now {}; settings still name {}",
                    report.converted, report.to, report.from
                );
            }
            return Err(failure.error);
        }

        if let Some(error) = report.commit_error {
            display::print_alert(&format!(
                "!!! Every entry is now {} but the settings still name {} !!!",
                report.to, report.from
            ));
            println!("    run `passdb commit-mode {}` once the settings are writable", report.to);
            return Err(error);
        }

        if report.committed {
            info!(mode = %report.to, "mode committed after transcode");
            println!("--- settings now name {} ---", report.to);
        } else {
            display::print_alert(&format!(
                "\n\n!!! Be sure to run `passdb commit-mode {}` before next run !!!\n\n",
                report.to
            ));
        }
        Ok(())
    }

    fn commit_mode(&self, mode: CipherMode) -> Result<(), PassdbError> {
        self.vault.commit_mode(mode)?;
        println!(
            "--- {} now names mode {mode} ---",
            self.config_path.display()
        );
        Ok(())
    }

    fn input_entry(&self, source: &PasswordSource) -> Result<(), PassdbError> {
        let mut prompt = LinePrompt::new()?;
        let service = prompt.line("Service: ")?;
        println!();
        let username = prompt.line("Username: ")?;
        println!();

        let prefs = &self.config.password_preference;
        let password = if source.random || source.xkcd {
            let style = if source.xkcd {
                PasswordStyle::Xkcd
            } else {
                PasswordStyle::Random
            };
            let password = generator::generate(style, prefs)?;
            println!(" --- generated password: {} ---", password.expose_secret());
            password
        } else if source.editor {
            editor::compose_password(&self.config.others)?
        } else if source.multiline {
            prompt::multiline_password("Password")?
        } else {
            prompt::hidden_password("Password: ")?
        };
        println!();

        let tag = prompt.line("Tag: ")?;
        println!();
        let note = prompt.line("Note: ")?;
        println!();

        let id = self.vault.insert_entry(EntryDraft {
            service: Some(service),
            username: Some(username),
            tag: Some(tag),
            note: Some(note),
            password,
        })?;
        println!("--- inserted entry {id} into {} ---", self.db_path.display());
        Ok(())
    }

    fn update_entry(&self, id: i64) -> Result<(), PassdbError> {
        let (entry, mut fields) = self.vault.fetch_for_edit(id)?;
        let backup = write_edit_backup(&entry, Path::new(EDIT_BACKUP_DIR))?;
        println!("--- copy of entry {id} saved to {} ---", backup.display());

        let edited = editor::edit_fields(&fields, &self.config.others);
        fields.password.zeroize();
        self.vault.apply_edit(id, edited?)?;
        println!("--- entry {id} updated ---");
        Ok(())
    }
}
