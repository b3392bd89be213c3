// SPDX-FileCopyrightText: 2026 passdb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests of vault operations over a real SQLite file, the mock
//! cipher and in-memory settings.

use std::path::Path;

use passdb_core::{CipherMode, EntryStore, Filter, PassdbError};
use passdb_test_utils::{MockCipher, ScriptedConfirm, TestHarness};
use passdb_vault::{ImportOptions, ImportOutcome, TranscodePersist};
use secrecy::ExposeSecret;

fn harness() -> TestHarness {
    TestHarness::new().unwrap()
}

/// "hunter2" as a shared-secret mock envelope.
const HUNTER2_SEALED: &str = "MOCK-SYM:1:68756e74657232";

#[test]
fn export_then_delete_with_backup_writes_identical_file() {
    let h = harness();
    let id = h.add("github", "alice", Some("work personal"), "hunter2").unwrap();

    let export_root = h.root().join("_Export");
    let written = h.vault.export_all(&export_root).unwrap();
    let exported = export_root.join("work/personal/github.gpg");
    assert_eq!(written, vec![exported.clone()]);

    let backup_root = h.root().join("_DELETED");
    let mut confirm = ScriptedConfirm::always_yes(1);
    let filter = Filter::default()
        .service("github")
        .username("alice")
        .tag("work");
    let deleted = h
        .vault
        .remove(&filter, &mut confirm, Some(&backup_root))
        .unwrap();

    assert_eq!(deleted.len(), 1);
    assert_eq!(deleted[0].id, id);
    assert_eq!(confirm.asked(), &[id]);

    let backup = backup_root.join("work/personal/github.gpg");
    assert_eq!(
        std::fs::read(&exported).unwrap(),
        std::fs::read(&backup).unwrap()
    );
    assert!(h.store().get(id).unwrap().is_none());
}

#[test]
fn declined_deletions_keep_rows_and_write_no_backup() {
    let h = harness();
    let a = h.add("github", "alice", None, "one").unwrap();
    let b = h.add("gitlab", "alice", None, "two").unwrap();

    let backup_root = h.root().join("_DELETED");
    let mut confirm = ScriptedConfirm::new([false, true]);
    let deleted = h
        .vault
        .remove(&Filter::default().service("git"), &mut confirm, Some(&backup_root))
        .unwrap();

    assert_eq!(confirm.asked(), &[a, b]);
    assert_eq!(deleted.iter().map(|e| e.id).collect::<Vec<_>>(), vec![b]);
    assert!(h.store().get(a).unwrap().is_some());
    assert!(!backup_root.join("github.gpg").exists());
    assert!(backup_root.join("gitlab.gpg").exists());
}

#[test]
fn unsupported_filter_performs_no_store_calls() {
    let h = harness();
    h.add("github", "alice", None, "pw").unwrap();
    h.store().reset();

    let blank = Filter {
        id: None,
        service: Some("   ".into()),
        username: Some(String::new()),
        tag: None,
    };
    for filter in [Filter::default(), blank] {
        let err = h.vault.search(&filter, true).unwrap_err();
        assert!(matches!(err, PassdbError::UnsupportedFilter));

        let mut confirm = ScriptedConfirm::always_yes(10);
        let err = h.vault.remove(&filter, &mut confirm, None).unwrap_err();
        assert!(matches!(err, PassdbError::UnsupportedFilter));
        assert!(confirm.asked().is_empty());
    }

    assert_eq!(h.store().calls(), 0);
    assert_eq!(h.cipher().decrypt_calls(), 0);
}

#[test]
fn search_uses_exact_service_with_tag_substring() {
    let h = harness();
    h.add("github", "alice", Some("work personal"), "a").unwrap();
    h.add("github-enterprise", "alice", Some("work"), "b").unwrap();
    h.add("github", "bob", Some("home"), "c").unwrap();

    let found = h
        .vault
        .search(&Filter::default().service("github").tag("work"), false)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].entry.id, 1);
    assert!(found[0].password.is_none());
}

#[test]
fn search_by_id_ignores_other_fields_and_reveals() {
    let h = harness();
    h.add("github", "alice", None, "first").unwrap();
    h.add("bank", "bob", None, "second").unwrap();

    let found = h
        .vault
        .search(&Filter::by_id(2).service("github"), true)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        found[0].password.as_ref().unwrap().expose_secret(),
        "second"
    );
}

#[test]
fn settings_edits_apply_to_the_next_call() {
    let h = harness();
    let a = h.add("a", "u", None, "pw").unwrap();
    h.settings().set_mode(CipherMode::Identity);
    let b = h.add("b", "u", None, "pw").unwrap();

    let pa = h.store().get(a).unwrap().unwrap().password;
    let pb = h.store().get(b).unwrap().unwrap().password;
    assert_eq!(MockCipher::mode_of(&pa), Some(CipherMode::SharedSecret));
    assert_eq!(MockCipher::mode_of(&pb), Some(CipherMode::Identity));
}

#[test]
fn identity_mode_without_recipients_cannot_encrypt() {
    let h = harness();
    h.settings().set_mode(CipherMode::Identity);
    h.settings().set_recipients(Vec::new());

    let err = h.add("github", "alice", None, "pw").unwrap_err();
    assert_eq!(err.exit_code(), 96);
    assert!(h.store().list_all().unwrap().is_empty());
}

#[test]
fn shared_secret_entries_need_the_key_to_reveal() {
    let h = harness();
    let id = h.add("github", "alice", None, "pw").unwrap();
    h.settings().set_key(None);

    let entry = h.store().get(id).unwrap().unwrap();
    let err = h.vault.reveal(&entry).unwrap_err();
    assert_eq!(err.exit_code(), 97);

    h.settings().set_key(Some("test-passphrase"));
    assert_eq!(h.vault.reveal(&entry).unwrap().expose_secret(), "pw");
}

#[test]
fn transcode_reads_settings_for_every_cipher_call() {
    let h = harness();
    for s in ["a", "b", "c"] {
        h.add(s, "u", None, s).unwrap();
    }
    let reads = h.settings().reads();

    h.vault.transcode_all(TranscodePersist::Manual).unwrap();

    // One read to pick the target mode, then a decrypt and an encrypt per entry.
    assert_eq!(h.settings().reads() - reads, 1 + 2 * 3);
    assert_eq!(h.cipher().encrypt_calls(), 6);
    assert_eq!(
        h.cipher().modes(),
        [[CipherMode::SharedSecret; 3], [CipherMode::Identity; 3]].concat()
    );
}

#[test]
fn transcode_stops_at_the_entry_the_cipher_rejects() {
    let h = harness();
    for pw in ["one", "two", "three"] {
        h.add(pw, "u", None, pw).unwrap();
    }
    h.cipher().fail_encrypt_of("two");

    let report = h.vault.transcode_all(TranscodePersist::OnSuccess).unwrap();
    assert_eq!(report.converted, vec![1]);
    assert_eq!(report.remaining, vec![2, 3]);
    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.id, 2);
    assert_eq!(failure.error.exit_code(), 96);
    assert!(!report.committed);
    assert!(report.commit_error.is_none());
}

#[test]
fn transcode_converts_everything_and_leaves_settings_alone() {
    let h = harness();
    for s in ["a", "b", "c"] {
        h.add(s, "u", None, s).unwrap();
    }

    let report = h.vault.transcode_all(TranscodePersist::Manual).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.converted, vec![1, 2, 3]);
    assert!(report.remaining.is_empty());
    assert_eq!(report.from, CipherMode::SharedSecret);
    assert_eq!(report.to, CipherMode::Identity);
    assert!(!report.committed);
    assert!(h.settings().commits().is_empty());
    assert_eq!(h.settings().mode(), CipherMode::SharedSecret);

    for entry in h.store().list_all().unwrap() {
        assert_eq!(MockCipher::mode_of(&entry.password), Some(CipherMode::Identity));
        let clear = h.vault.reveal(&entry).unwrap();
        assert_eq!(clear.expose_secret(), entry.service.as_deref().unwrap());
    }
}

#[test]
fn transcode_twice_returns_to_the_original_mode() {
    let h = harness();
    let id = h.add("a", "u", None, "pw").unwrap();
    let before = h.store().get(id).unwrap().unwrap().password;

    h.vault.transcode_all(TranscodePersist::OnSuccess).unwrap();
    h.vault.transcode_all(TranscodePersist::OnSuccess).unwrap();

    let after = h.store().get(id).unwrap().unwrap();
    assert_eq!(MockCipher::mode_of(&after.password), Some(CipherMode::SharedSecret));
    assert_ne!(before, after.password);
    assert_eq!(h.vault.reveal(&after).unwrap().expose_secret(), "pw");
    assert_eq!(
        h.settings().commits(),
        vec![CipherMode::Identity, CipherMode::SharedSecret]
    );
}

#[test]
fn manual_transcode_keeps_targeting_the_opposite_of_the_settings() {
    let h = harness();
    let id = h.add("a", "u", None, "pw").unwrap();

    h.vault.transcode_all(TranscodePersist::Manual).unwrap();
    let report = h.vault.transcode_all(TranscodePersist::Manual).unwrap();

    assert_eq!(report.to, CipherMode::Identity);
    let entry = h.store().get(id).unwrap().unwrap();
    assert_eq!(MockCipher::mode_of(&entry.password), Some(CipherMode::Identity));
}

#[test]
fn transcode_on_success_commits_the_new_mode() {
    let h = harness();
    h.add("a", "u", None, "pw").unwrap();

    let report = h.vault.transcode_all(TranscodePersist::OnSuccess).unwrap();
    assert!(report.committed);
    assert_eq!(h.settings().commits(), vec![CipherMode::Identity]);
    assert_eq!(h.settings().mode(), CipherMode::Identity);

    // Entries and settings now agree; reading back works.
    let entry = h.store().list_all().unwrap().remove(0);
    assert_eq!(h.vault.reveal(&entry).unwrap().expose_secret(), "pw");
}

#[test]
fn failed_commit_after_transcode_still_reports_the_batch() {
    let h = harness();
    h.add("a", "u", None, "one").unwrap();
    h.add("b", "u", None, "two").unwrap();
    h.settings().make_read_only();

    let report = h.vault.transcode_all(TranscodePersist::OnSuccess).unwrap();
    assert!(report.is_complete());
    assert_eq!(report.converted, vec![1, 2]);
    assert!(!report.committed);
    assert!(matches!(report.commit_error, Some(PassdbError::Config(_))));
    assert_eq!(h.settings().mode(), CipherMode::SharedSecret);

    for entry in h.store().list_all().unwrap() {
        assert_eq!(MockCipher::mode_of(&entry.password), Some(CipherMode::Identity));
    }
}

#[test]
fn transcode_stops_at_the_first_failure_for_every_position() {
    const N: usize = 4;
    for k in 1..=N {
        // N encrypts for the inserts, then one per converted entry.
        let cipher = MockCipher::new().fail_encrypt_on_call(N + k);
        let h = TestHarness::builder().with_cipher(cipher).build().unwrap();
        for i in 0..N {
            h.add(&format!("s{i}"), "u", None, "pw").unwrap();
        }

        let report = h.vault.transcode_all(TranscodePersist::OnSuccess).unwrap();
        let k = k as i64;
        let n = N as i64;

        assert_eq!(report.converted, (1..k).collect::<Vec<_>>(), "k = {k}");
        assert_eq!(report.remaining, (k..=n).collect::<Vec<_>>(), "k = {k}");
        let failure = report.failure.as_ref().unwrap();
        assert_eq!(failure.id, k);
        assert_eq!(failure.error.exit_code(), 96);
        assert!(!report.committed);
        assert!(h.settings().commits().is_empty());

        for entry in h.store().list_all().unwrap() {
            let expected = if entry.id < k {
                CipherMode::Identity
            } else {
                CipherMode::SharedSecret
            };
            assert_eq!(MockCipher::mode_of(&entry.password), Some(expected));
        }
    }
}

#[test]
fn missing_settings_fail_the_call() {
    let h = harness();
    h.settings().remove();
    let err = h.add("a", "u", None, "pw").unwrap_err();
    assert!(matches!(err, PassdbError::Config(_)));
}

#[test]
fn export_entry_by_unknown_id_is_not_found() {
    let h = harness();
    let err = h.vault.export_entry(42, h.root()).unwrap_err();
    assert_eq!(err.exit_code(), 89);
}

#[test]
fn export_entry_writes_one_file() {
    let h = harness();
    h.add("bank", "bob", None, "pw").unwrap();
    let id = h.add("https://any.com/app", "bob", Some("web"), "pw").unwrap();

    let path = h.vault.export_entry(id, h.root()).unwrap().unwrap();
    assert_eq!(path, h.root().join("web/https:__any.com_app.gpg"));
    assert!(!h.root().join("bank.gpg").exists());
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn file_import_decrypts_gpg_and_reads_clear_files() {
    let h = harness();
    let sealed = h.root().join("in/github.gpg");
    let clear = h.root().join("in/bank.txt");
    write(&sealed, HUNTER2_SEALED);
    write(&clear, "s3cret");

    let options = ImportOptions::default();
    let ImportOutcome::Imported(a) = h.vault.file_import(&sealed, None, &options).unwrap() else {
        panic!("expected import");
    };
    let options = ImportOptions {
        username: Some("bob".into()),
        tag: Some("money".into()),
        note: Some("from old laptop".into()),
    };
    let ImportOutcome::Imported(b) = h.vault.file_import(&clear, None, &options).unwrap() else {
        panic!("expected import");
    };

    let a = h.store().get(a).unwrap().unwrap();
    assert_eq!(a.service.as_deref(), Some("github"));
    assert_eq!(a.username.as_deref(), Some("Import"));
    assert_eq!(a.tag.as_deref(), Some("noTag"));
    assert!(a.note.as_deref().unwrap().starts_with("Imported on "));
    assert_eq!(h.vault.reveal(&a).unwrap().expose_secret(), "hunter2");

    let b = h.store().get(b).unwrap().unwrap();
    assert_eq!(b.service.as_deref(), Some("bank"));
    assert_eq!(b.username.as_deref(), Some("bob"));
    assert_eq!(b.tag.as_deref(), Some("money"));
    assert!(b.note.as_deref().unwrap().ends_with(", from old laptop"));
    assert_eq!(h.vault.reveal(&b).unwrap().expose_secret(), "s3cret");
}

#[test]
fn file_import_skips_dot_files() {
    let h = harness();
    let hidden = h.root().join(".DS_Store");
    write(&hidden, "junk");
    h.store().reset();

    let outcome = h
        .vault
        .file_import(&hidden, None, &ImportOptions::default())
        .unwrap();
    assert_eq!(outcome, ImportOutcome::Skipped);
    assert_eq!(h.store().calls(), 0);
}

#[test]
fn dir_import_tags_by_directory() {
    let h = harness();
    let root = h.root().join("import");
    write(&root.join("work/personal/github.gpg"), HUNTER2_SEALED);
    write(&root.join("bank.txt"), "s3cret");
    write(&root.join(".hidden"), "junk");

    let options = ImportOptions {
        tag: Some("old".into()),
        ..ImportOptions::default()
    };
    let report = h.vault.dir_import(&root, &options).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.skipped, vec![root.join(".hidden")]);
    assert_eq!(report.imported.len(), 2);
    assert!(report.remaining.is_empty());

    let by_service = |s: &str| {
        h.store()
            .list_all()
            .unwrap()
            .into_iter()
            .find(|e| e.service.as_deref() == Some(s))
            .unwrap()
    };
    assert_eq!(by_service("github").tag.as_deref(), Some("old work personal"));
    assert_eq!(by_service("bank").tag.as_deref(), Some("old"));
}

#[test]
fn dir_import_stops_at_first_cipher_failure() {
    let cipher = MockCipher::new().fail_decrypt_on_call(1);
    let h = TestHarness::builder().with_cipher(cipher).build().unwrap();
    let root = h.root().join("import");
    write(&root.join("a.txt"), "one");
    write(&root.join("b/github.gpg"), HUNTER2_SEALED);
    write(&root.join("c.txt"), "three");

    let report = h.vault.dir_import(&root, &ImportOptions::default()).unwrap();

    assert_eq!(report.imported.len(), 1);
    assert_eq!(report.imported[0].0, root.join("a.txt"));
    let failure = report.failure.as_ref().unwrap();
    assert_eq!(failure.path, root.join("b/github.gpg"));
    assert_eq!(failure.error.exit_code(), 97);
    assert_eq!(
        report.remaining,
        vec![root.join("b/github.gpg"), root.join("c.txt")]
    );
    assert_eq!(h.store().list_all().unwrap().len(), 1);
}

#[test]
fn dir_import_rejects_non_directories() {
    let h = harness();
    let file = h.root().join("plain.txt");
    write(&file, "x");
    let err = h.vault.dir_import(&file, &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, PassdbError::NotADirectory { .. }));
    assert_eq!(err.exit_code(), 99);
}

#[test]
fn edit_round_trip_reencrypts_the_new_password() {
    let h = harness();
    let id = h.add("github", "alice", Some("work"), "old-pw").unwrap();

    let (entry, mut fields) = h.vault.fetch_for_edit(id).unwrap();
    assert_eq!(entry.id, id);
    assert_eq!(fields.password, "old-pw");

    let backup = passdb_vault::write_edit_backup(&entry, &h.root().join("_copy")).unwrap();
    assert!(std::fs::read_to_string(&backup).unwrap().contains(&entry.password));

    fields.password = "new-pw".into();
    fields.tag = Some("home".into());
    h.vault.apply_edit(id, fields).unwrap();

    let updated = h.store().get(id).unwrap().unwrap();
    assert_eq!(updated.tag.as_deref(), Some("home"));
    assert_ne!(updated.password, entry.password);
    assert_eq!(h.vault.reveal(&updated).unwrap().expose_secret(), "new-pw");
}

#[test]
fn edit_of_unknown_id_is_not_found() {
    let h = harness();
    let err = h.vault.fetch_for_edit(7).unwrap_err();
    assert!(matches!(err, PassdbError::NotFound { id: 7 }));
}

#[test]
fn inserted_notes_carry_a_creation_stamp() {
    let h = harness();
    let id = h.add("github", "alice", None, "pw").unwrap();
    let entry = h.store().get(id).unwrap().unwrap();
    assert!(entry.note.as_deref().unwrap().starts_with("created on "));
}
