// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping between entries and ciphertext files.
//!
//! An entry lives at `<root>/<tag words as directories>/<service>.gpg`.
//! Importing reverses this: the directories between the import root and a
//! file become its tag.

use std::path::{Component, Path, PathBuf};

use passdb_core::Entry;

/// Extension of exported ciphertext files.
pub const CIPHERTEXT_EXTENSION: &str = "gpg";

/// Basename used for entries without a service.
pub const UNNAMED_SERVICE: &str = "_unnamed";

/// Tag given to single-file imports with no tag option.
pub const DEFAULT_IMPORT_TAG: &str = "noTag";

/// Where `entry`'s ciphertext is written under `root`.
///
/// Each whitespace-separated tag word becomes one directory level; a blank
/// or missing tag puts the file directly under `root`. Only plain name
/// components of a tag word are kept, so the result never leaves `root`.
/// `/` in the service becomes `_` so the service stays a single path
/// component.
pub fn export_path(entry: &Entry, root: &Path) -> PathBuf {
    let mut path = root.to_path_buf();
    if let Some(tag) = &entry.tag {
        for word in tag.split_whitespace() {
            path.extend(Path::new(word).components().filter_map(|c| match c {
                Component::Normal(part) => Some(part),
                _ => None,
            }));
        }
    }

    let basename = entry
        .service
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.replace('/', "_"))
        .unwrap_or_else(|| UNNAMED_SERVICE.to_string());
    path.push(format!("{basename}.{CIPHERTEXT_EXTENSION}"));
    path
}

/// The tag for an imported `file`.
///
/// With an import root, the directories between the root and the file are
/// joined with single spaces, prefixed by `extra` when given. Without one,
/// the tag is `extra`, or [`DEFAULT_IMPORT_TAG`].
pub fn tag_from_path(file: &Path, import_root: Option<&Path>, extra: Option<&str>) -> String {
    let extra = extra.map(str::trim).filter(|t| !t.is_empty());

    let Some(root) = import_root else {
        return extra.unwrap_or(DEFAULT_IMPORT_TAG).to_string();
    };

    let relative: Vec<String> = file
        .parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .map(|rel| {
            rel.components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    match extra {
        Some(extra) if relative.is_empty() => extra.to_string(),
        Some(extra) => format!("{extra} {}", relative.join(" ")),
        None => relative.join(" "),
    }
}

/// Whether `file` is a dot-file and must not be imported.
pub fn is_hidden(file: &Path) -> bool {
    file.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// Whether `file` holds ciphertext rather than clear text.
pub fn is_ciphertext(file: &Path) -> bool {
    file.extension()
        .is_some_and(|ext| ext == CIPHERTEXT_EXTENSION)
}

/// The service name an imported file is stored under: its name without
/// the final extension.
pub fn service_from_path(file: &Path) -> Option<String> {
    file.file_stem()
        .map(|stem| stem.to_string_lossy().trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(service: Option<&str>, tag: Option<&str>) -> Entry {
        Entry {
            id: 1,
            service: service.map(str::to_string),
            username: Some("alice".into()),
            password: "armored".into(),
            tag: tag.map(str::to_string),
            note: None,
        }
    }

    #[test]
    fn tag_words_become_directories() {
        let path = export_path(&entry(Some("github"), Some("work personal")), Path::new("out"));
        assert_eq!(path, Path::new("out/work/personal/github.gpg"));
    }

    #[test]
    fn tag_whitespace_runs_collapse() {
        let path = export_path(&entry(Some("bank"), Some("  home\t finance ")), Path::new("r"));
        assert_eq!(path, Path::new("r/home/finance/bank.gpg"));
    }

    #[test]
    fn missing_or_blank_tag_exports_under_root() {
        let root = Path::new("root");
        assert_eq!(export_path(&entry(Some("a"), None), root), Path::new("root/a.gpg"));
        assert_eq!(export_path(&entry(Some("a"), Some("  ")), root), Path::new("root/a.gpg"));
    }

    #[test]
    fn tag_words_cannot_leave_the_root() {
        let root = Path::new("out");
        let absolute = export_path(&entry(Some("github"), Some("/tmp/elsewhere")), root);
        assert_eq!(absolute, Path::new("out/tmp/elsewhere/github.gpg"));

        let climbing = export_path(&entry(Some("github"), Some("../.. work ./x/../y")), root);
        assert_eq!(climbing, Path::new("out/work/x/y/github.gpg"));
        assert!(climbing.starts_with(root));
    }

    #[test]
    fn slashes_in_service_are_replaced() {
        let path = export_path(
            &entry(Some("https://any.com/app"), Some("web")),
            Path::new("x"),
        );
        assert_eq!(path, Path::new("x/web/https:__any.com_app.gpg"));
    }

    #[test]
    fn missing_service_gets_placeholder() {
        let path = export_path(&entry(None, Some("t")), Path::new("x"));
        assert_eq!(path, Path::new("x/t/_unnamed.gpg"));
    }

    #[test]
    fn tag_from_relative_directories() {
        let root = Path::new("/import");
        let file = Path::new("/import/work/personal/github.gpg");
        assert_eq!(tag_from_path(file, Some(root), None), "work personal");
        assert_eq!(tag_from_path(file, Some(root), Some("old")), "old work personal");
    }

    #[test]
    fn file_at_import_root_has_extra_or_blank_tag() {
        let root = Path::new("/import");
        let file = Path::new("/import/github.gpg");
        assert_eq!(tag_from_path(file, Some(root), None), "");
        assert_eq!(tag_from_path(file, Some(root), Some("old")), "old");
    }

    #[test]
    fn single_file_tag_defaults() {
        let file = Path::new("somewhere/github.gpg");
        assert_eq!(tag_from_path(file, None, None), "noTag");
        assert_eq!(tag_from_path(file, None, Some(" ")), "noTag");
        assert_eq!(tag_from_path(file, None, Some("mine")), "mine");
    }

    #[test]
    fn file_classification() {
        assert!(is_hidden(Path::new("dir/.DS_Store")));
        assert!(!is_hidden(Path::new(".hidden/visible.gpg")));
        assert!(is_ciphertext(Path::new("a/b.gpg")));
        assert!(!is_ciphertext(Path::new("a/b.txt")));
        assert!(!is_ciphertext(Path::new("a/gpg")));
        assert_eq!(service_from_path(Path::new("a/github.gpg")).as_deref(), Some("github"));
        assert_eq!(service_from_path(Path::new("a/notes")).as_deref(), Some("notes"));
    }
}
