//! Integration tests for the CipherVault vault repository.

use std::fs;

use ciphervault::audit::{AuditAction, AuditLedger};
use ciphervault::auth::{Session, UserDirectory};
use ciphervault::crypto::{decrypt, CipherKey};
use ciphervault::errors::{CipherVaultError, Result};
use ciphervault::store::{FileRecordStore, MemoryRecordStore, RecordKind, RecordStore};
use ciphervault::vault::{EntryUpdate, NewEntry, SortDirection, SortKey, VaultRepository};
use tempfile::TempDir;

const PASSWORD: &str = "Rahasia123";

fn entry(title: &str, account: &str, secret: &str) -> NewEntry {
    NewEntry {
        title: title.to_string(),
        account: account.to_string(),
        secret: secret.to_string(),
        notes: String::new(),
    }
}

fn dani() -> Session {
    Session::new("dani", PASSWORD)
}

// ---------------------------------------------------------------------------
// Create / list / read
// ---------------------------------------------------------------------------

#[test]
fn create_then_list_and_read() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);

    let created = repo
        .create(entry("Gmail", "dani@gmail.com", "hunter2"))
        .unwrap();
    assert_eq!(created.id, "VAULT001");
    assert_eq!(created.owner, "dani");

    let listed = repo.list().unwrap();
    assert_eq!(listed, vec![created.clone()]);

    let read = repo.read("VAULT001").unwrap();
    assert_eq!(read, created);
    assert_eq!(repo.reveal(&read).unwrap().as_str(), "hunter2");
}

#[test]
fn list_is_stable_across_calls() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    repo.create(entry("Gmail", "dani", "a1")).unwrap();
    repo.create(entry("Bank", "dani", "b2")).unwrap();

    let first = repo.list().unwrap();
    let second = repo.list().unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}

#[test]
fn ids_fill_the_lowest_gap_after_delete() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    for title in ["one", "two", "three"] {
        repo.create(entry(title, "acct", "pw")).unwrap();
    }

    repo.delete("VAULT002").unwrap();
    let again = repo.create(entry("four", "acct", "pw")).unwrap();
    assert_eq!(again.id, "VAULT002");

    let mut ids: Vec<String> = repo.list().unwrap().into_iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids, vec!["VAULT001", "VAULT002", "VAULT003"]);
}

#[test]
fn ids_are_unique_across_owners() {
    let store = MemoryRecordStore::new();
    let dani = dani();
    let budi = Session::new("budi", "Kunci4567");

    let first = VaultRepository::new(&store, &dani)
        .create(entry("Gmail", "dani", "x"))
        .unwrap();
    let second = VaultRepository::new(&store, &budi)
        .create(entry("Gmail", "budi", "y"))
        .unwrap();
    assert_ne!(first.id, second.id);
}

#[test]
fn ids_run_out_after_999() {
    let lines: Vec<String> = (1..=999)
        .map(|n| format!("VAULT{n:03}|dani|t{n}|a|eA==||2024-01-01 00:00:00"))
        .collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let store = MemoryRecordStore::new().with_records(RecordKind::Vault, &refs);
    let session = dani();
    let repo = VaultRepository::new(&store, &session);

    assert!(matches!(
        repo.create(entry("overflow", "a", "b")),
        Err(CipherVaultError::Exhausted(999))
    ));
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[test]
fn read_after_delete_is_not_found() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    repo.create(entry("Gmail", "dani", "x")).unwrap();

    let removed = repo.delete("VAULT001").unwrap();
    assert_eq!(removed.title, "Gmail");
    assert!(matches!(
        repo.read("VAULT001"),
        Err(CipherVaultError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete("VAULT001"),
        Err(CipherVaultError::NotFound(_))
    ));
}

#[test]
fn update_keeps_identity_and_reciphers_secret() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    let original = repo.create(entry("Gmail", "dani", "old-secret")).unwrap();

    let updated = repo
        .update(
            "VAULT001",
            EntryUpdate {
                secret: Some("new-secret".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.id, original.id);
    assert_eq!(updated.owner, original.owner);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.title, "Gmail");
    assert_ne!(updated.ciphered_secret, original.ciphered_secret);
    assert_eq!(repo.reveal(&updated).unwrap().as_str(), "new-secret");
}

#[test]
fn partial_update_changes_only_given_fields() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    let mut draft = entry("Gmail", "dani@gmail.com", "pw");
    draft.notes = "personal".into();
    let original = repo.create(draft).unwrap();

    let updated = repo
        .update(
            "VAULT001",
            EntryUpdate {
                account: Some("dani@work.com".into()),
                notes: Some(String::new()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.title, original.title);
    assert_eq!(updated.account, "dani@work.com");
    assert_eq!(updated.notes, "");
    assert_eq!(updated.ciphered_secret, original.ciphered_secret);
    assert_eq!(repo.read("VAULT001").unwrap(), updated);
}

#[test]
fn empty_required_fields_are_rejected() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);

    assert!(matches!(
        repo.create(entry("  ", "dani", "x")),
        Err(CipherVaultError::Validation(_))
    ));
    assert!(matches!(
        repo.create(entry("Gmail", "dani", "")),
        Err(CipherVaultError::Validation(_))
    ));
    assert!(store.read_all(RecordKind::Vault).unwrap().is_empty());

    repo.create(entry("Gmail", "dani", "x")).unwrap();
    assert!(matches!(
        repo.update(
            "VAULT001",
            EntryUpdate {
                title: Some(String::new()),
                ..Default::default()
            }
        ),
        Err(CipherVaultError::Validation(_))
    ));
}

// ---------------------------------------------------------------------------
// Ownership and authentication
// ---------------------------------------------------------------------------

#[test]
fn other_owners_entries_are_invisible() {
    let store = MemoryRecordStore::new();
    let dani = dani();
    let budi = Session::new("budi", "Kunci4567");
    VaultRepository::new(&store, &dani)
        .create(entry("Gmail", "dani", "x"))
        .unwrap();

    let repo = VaultRepository::new(&store, &budi);
    assert!(repo.list().unwrap().is_empty());
    assert!(repo.search("gmail").unwrap().is_empty());
    assert!(matches!(
        repo.read("VAULT001"),
        Err(CipherVaultError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete("VAULT001"),
        Err(CipherVaultError::NotFound(_))
    ));

    // Entry is untouched for its owner.
    assert_eq!(VaultRepository::new(&store, &dani).list().unwrap().len(), 1);
}

#[test]
fn reveal_refuses_foreign_entry() {
    let store = MemoryRecordStore::new();
    let dani = dani();
    let budi = Session::new("budi", "Kunci4567");
    let created = VaultRepository::new(&store, &dani)
        .create(entry("Gmail", "dani", "x"))
        .unwrap();

    assert!(matches!(
        VaultRepository::new(&store, &budi).reveal(&created),
        Err(CipherVaultError::NotFound(_))
    ));
}

#[test]
fn anonymous_session_cannot_touch_the_vault() {
    let store = MemoryRecordStore::new();
    let session = Session::anonymous();
    let repo = VaultRepository::new(&store, &session);

    assert!(matches!(
        repo.create(entry("Gmail", "dani", "x")),
        Err(CipherVaultError::Unauthenticated)
    ));
    assert!(matches!(repo.list(), Err(CipherVaultError::Unauthenticated)));
    assert!(store.read_all(RecordKind::Audit).unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Audit trail
// ---------------------------------------------------------------------------

#[test]
fn every_operation_adds_one_record_of_its_kind() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    let ledger = AuditLedger::new(&store);

    let check = |action: AuditAction, step: &dyn Fn()| {
        let before = ledger.statistics("dani").unwrap();
        step();
        let after = ledger.statistics("dani").unwrap();
        assert_eq!(after.total_count, before.total_count + 1, "{action}");
        assert_eq!(after.count(action), before.count(action) + 1, "{action}");
    };

    check(AuditAction::Create, &|| {
        repo.create(entry("Gmail", "dani", "x")).unwrap();
    });
    check(AuditAction::Update, &|| {
        repo.update(
            "VAULT001",
            EntryUpdate {
                notes: Some("n".into()),
                ..Default::default()
            },
        )
        .unwrap();
    });
    check(AuditAction::Read, &|| {
        repo.read("VAULT001").unwrap();
    });
    let opened = repo.read("VAULT001").unwrap();
    check(AuditAction::Read, &|| {
        repo.reveal(&opened).unwrap();
    });
    check(AuditAction::Search, &|| {
        repo.search("gm").unwrap();
    });
    check(AuditAction::Sort, &|| {
        repo.sort(SortKey::Title, SortDirection::Ascending).unwrap();
    });
    check(AuditAction::Delete, &|| {
        repo.delete("VAULT001").unwrap();
    });
}

#[test]
fn reveal_is_recorded_as_read() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    let created = repo.create(entry("Gmail", "dani", "x")).unwrap();
    repo.reveal(&created).unwrap();

    let ledger = AuditLedger::new(&store);
    let last = &ledger.recent("dani", 1).unwrap()[0];
    assert_eq!(last.action, AuditAction::Read);
    assert!(last.details.contains("Gmail"));
}

#[test]
fn user_errors_are_recorded_too() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    let ledger = AuditLedger::new(&store);

    let _ = repo.read("VAULT404");
    let _ = repo.create(entry("", "dani", "x"));

    let records = ledger.all("dani").unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].action, AuditAction::Read);
    assert!(records[0].details.contains("VAULT404"));
    assert_eq!(records[1].action, AuditAction::Create);
    assert!(records[1].details.contains("failed"));
}

#[test]
fn overview_is_not_recorded() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    repo.create(entry("First", "a", "x")).unwrap();
    repo.create(entry("Second", "a", "y")).unwrap();

    let ledger = AuditLedger::new(&store);
    let before = ledger.statistics("dani").unwrap().total_count;
    let overview = repo.overview().unwrap();
    assert_eq!(overview.count, 2);
    assert!(overview.newest.is_some());
    assert!(overview.oldest.is_some());
    assert_eq!(ledger.statistics("dani").unwrap().total_count, before);
}

// ---------------------------------------------------------------------------
// Search and sort
// ---------------------------------------------------------------------------

#[test]
fn search_matches_title_or_account_case_insensitively() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    repo.create(entry("Gmail", "dani@gmail.com", "x")).unwrap();
    repo.create(entry("Bank", "dani-bca", "y")).unwrap();
    repo.create(entry("Work mail", "dani@corp.id", "z")).unwrap();

    let titles = |kw: &str| -> Vec<String> {
        repo.search(kw)
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect()
    };

    assert_eq!(titles("MAIL"), vec!["Gmail", "Work mail"]);
    assert_eq!(titles("bca"), vec!["Bank"]);
    assert!(titles("netflix").is_empty());
    assert!(titles("   ").is_empty());
}

#[test]
fn sort_by_title_both_directions() {
    let store = MemoryRecordStore::new();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    for title in ["charlie", "Alpha", "bravo"] {
        repo.create(entry(title, "a", "x")).unwrap();
    }

    let asc: Vec<String> = repo
        .sort(SortKey::Title, SortDirection::Ascending)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(asc, vec!["Alpha", "bravo", "charlie"]);

    let desc: Vec<String> = repo
        .sort(SortKey::Title, SortDirection::Descending)
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(desc, vec!["charlie", "bravo", "Alpha"]);

    // Sorting never reorders what is stored.
    let stored: Vec<String> = repo.list().unwrap().into_iter().map(|e| e.title).collect();
    assert_eq!(stored, vec!["charlie", "Alpha", "bravo"]);
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

#[test]
fn file_store_persists_between_repositories() {
    let dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(dir.path()).unwrap();
    let users = UserDirectory::new(&store);
    users.register("dani", PASSWORD).unwrap();
    let session = users.authenticate("dani", PASSWORD).unwrap();

    VaultRepository::new(&store, &session)
        .create(entry("Gmail", "dani@gmail.com", "hunter2"))
        .unwrap();

    // A fresh store over the same directory sees the same data.
    let reopened = FileRecordStore::open(dir.path()).unwrap();
    let session = UserDirectory::new(&reopened)
        .authenticate("dani", PASSWORD)
        .unwrap();
    let repo = VaultRepository::new(&reopened, &session);
    let entries = repo.list().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(repo.reveal(&entries[0]).unwrap().as_str(), "hunter2");
}

#[test]
fn plaintext_secret_never_reaches_disk() {
    let dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(dir.path()).unwrap();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    repo.create(entry("Gmail", "dani", "PlainTextSecret99"))
        .unwrap();

    let vault = fs::read_to_string(store.path_for(RecordKind::Vault)).unwrap();
    let audit = fs::read_to_string(store.path_for(RecordKind::Audit)).unwrap();
    assert!(!vault.contains("PlainTextSecret99"));
    assert!(!audit.contains("PlainTextSecret99"));

    // The stored field decrypts with the session key.
    let line = vault.lines().next().unwrap();
    let field = line.split('|').nth(4).unwrap();
    let key = CipherKey::derive(PASSWORD);
    assert_eq!(decrypt(field, &key).unwrap().as_str(), "PlainTextSecret99");
}

#[test]
fn pipes_in_input_do_not_break_the_line_format() {
    let dir = TempDir::new().unwrap();
    let store = FileRecordStore::open(dir.path()).unwrap();
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    let mut draft = entry("Gm|ail", "da|ni", "x|y");
    draft.notes = "line1\nline2".into();
    let created = repo.create(draft).unwrap();

    assert_eq!(created.title, "Gmail");
    assert_eq!(created.account, "dani");
    assert_eq!(created.notes, "line1 line2");
    assert_eq!(repo.reveal(&created).unwrap().as_str(), "x|y");
    assert_eq!(repo.read(&created.id).unwrap(), created);
}

#[test]
fn malformed_vault_line_is_an_error() {
    let store =
        MemoryRecordStore::new().with_records(RecordKind::Vault, &["VAULT001|dani|broken"]);
    let session = dani();
    let repo = VaultRepository::new(&store, &session);
    assert!(matches!(
        repo.list(),
        Err(CipherVaultError::MalformedRecord { .. })
    ));
}

/// Store whose audit file refuses writes; everything else is in memory.
struct ReadOnlyLedger(MemoryRecordStore);

fn refused() -> CipherVaultError {
    std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into()
}

impl RecordStore for ReadOnlyLedger {
    fn read_all(&self, kind: RecordKind) -> Result<Vec<String>> {
        self.0.read_all(kind)
    }

    fn write_all(&self, kind: RecordKind, records: &[String]) -> Result<()> {
        if kind == RecordKind::Audit {
            return Err(refused());
        }
        self.0.write_all(kind, records)
    }

    fn append(&self, kind: RecordKind, record: &str) -> Result<()> {
        if kind == RecordKind::Audit {
            return Err(refused());
        }
        self.0.append(kind, record)
    }
}

#[test]
fn ledger_failure_after_save_keeps_the_change() {
    let store = ReadOnlyLedger(MemoryRecordStore::new());
    let session = dani();
    let repo = VaultRepository::new(&store, &session);

    assert!(matches!(
        repo.create(entry("Gmail", "dani", "x")),
        Err(CipherVaultError::Persistence(_))
    ));

    // The entry was committed before the ledger write failed.
    let lines = store.0.read_all(RecordKind::Vault).unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("VAULT001|dani|Gmail|"));
}
