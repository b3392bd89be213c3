// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal rendering of entries, filters and settings.
//!
//! Formatting is done by pure functions returning `String`s so it can be
//! tested; the `print_*` wrappers only add color and write to stdout.

use std::io::IsTerminal;
use std::path::Path;

use colored::Colorize;
use passdb_cipher::mask_secret;
use passdb_config::PassdbConfig;
use passdb_core::{ClauseValue, Entry, Filter, MatchOp, Predicate};
use passdb_vault::ShownEntry;
use secrecy::ExposeSecret;

/// Shown in place of an absent or blank entry field.
pub const NULL_FIELD: &str = "-- Null --";
/// Shown in place of a blank settings value.
pub const NULL_SETTING: &str = "-NULL-";

const ENTRY_HEADER: &str = "id  service         username        tag         note";

/// Whether stdout takes color.
pub fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

fn field(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(NULL_FIELD)
}

/// One listing line: `id:: service:: username:: tag:: note`.
pub fn entry_line(entry: &Entry) -> String {
    format!(
        "{:3}:: {}:: {}:: {}:: {}",
        entry.id,
        field(entry.service.as_deref()),
        field(entry.username.as_deref()),
        field(entry.tag.as_deref()),
        field(entry.note.as_deref()),
    )
}

/// The line shown before asking whether to delete `entry`.
pub fn delete_line(entry: &Entry) -> String {
    format!(
        "DELETE: {:3}: {:30} {:20} {:20} {}",
        entry.id,
        field(entry.service.as_deref()),
        field(entry.username.as_deref()),
        field(entry.tag.as_deref()),
        field(entry.note.as_deref()),
    )
}

/// Print entries under a header; passwords follow their entry when shown.
pub fn print_entries(entries: &[ShownEntry]) {
    let color = use_color();
    let revealed = entries.iter().any(|e| e.password.is_some());

    if color {
        println!("{}", ENTRY_HEADER.bold());
    } else {
        println!("{ENTRY_HEADER}");
    }
    if revealed {
        println!("password");
    }

    if entries.is_empty() {
        println!("--- Empty result ---");
        return;
    }
    for shown in entries {
        println!("{}", entry_line(&shown.entry));
        if let Some(password) = &shown.password {
            if color {
                println!("{}", password.expose_secret().yellow());
            } else {
                println!("{}", password.expose_secret());
            }
        }
    }
}

/// Human-readable form of a predicate, e.g. `service = 'github' AND tag
/// contains 'work'`.
pub fn describe_predicate(predicate: &Predicate) -> String {
    predicate
        .clauses
        .iter()
        .map(|clause| {
            let value = match &clause.value {
                ClauseValue::Integer(v) => v.to_string(),
                ClauseValue::Text(v) => format!("'{v}'"),
            };
            let op = match clause.op {
                MatchOp::Exact => "=",
                MatchOp::Contains => "contains",
            };
            format!("{} {op} {value}", clause.field)
        })
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// The notice for a filter with no supported combination.
pub fn unsupported_filter(filter: &Filter) -> String {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "None".to_string());
    format!(
        "--- No support on query on: ---\n    id: {}\n    service: {}\n    username: {}\n    tag: {}",
        filter.id.map_or_else(|| "None".to_string(), |id| id.to_string()),
        show(&filter.service),
        show(&filter.username),
        show(&filter.tag),
    )
}

/// Value shown for a settings key: blank values become [`NULL_SETTING`]
/// and key material is masked.
pub fn setting_value(section: &str, key: &str, value: &str) -> String {
    if value.trim().is_empty() || value == "[]" {
        return NULL_SETTING.to_string();
    }
    if section == "encryption_key" && key == "key" {
        return mask_secret(value);
    }
    value.to_string()
}

/// The settings listing printed by `init` and `config show`.
pub fn settings_listing(config_path: &Path, db_path: &Path, config: &PassdbConfig) -> String {
    let mut out = String::from("\n--- Configuration ---\n");
    out.push_str(&format!("Database file: {}\n", db_path.display()));
    out.push_str(&format!("Contents of config file: {}\n", config_path.display()));
    for (section, keys) in passdb_config::listing(config) {
        out.push_str(&format!("    {section}\n"));
        for (key, value) in keys {
            out.push_str(&format!(
                "        {key} :   {}\n",
                setting_value(&section, &key, &value)
            ));
        }
        out.push('\n');
    }
    out
}

pub fn print_settings(config_path: &Path, db_path: &Path, config: &PassdbConfig) {
    print!("{}", settings_listing(config_path, db_path, config));
}

/// A loud one-line notice: red and bold on a terminal.
pub fn print_alert(message: &str) {
    if use_color() {
        println!("{}", message.red().bold());
    } else {
        println!("{message}");
    }
}
