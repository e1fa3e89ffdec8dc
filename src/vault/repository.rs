//! High-level vault operations for the authenticated owner.
//!
//! `VaultRepository` ties together the record store, the cipher, the id
//! allocator and the audit ledger.  Every operation reloads the vault
//! records, works on that local copy, writes back if it changed, and
//! appends exactly one ledger record, on success and on user-visible
//! failures (bad input, unknown id, exhausted ids).

use tracing::{info, warn};
use zeroize::Zeroizing;

use crate::audit::{AuditAction, AuditLedger};
use crate::auth::Authenticator;
use crate::crypto::{decrypt, encrypt};
use crate::errors::{CipherVaultError, Result};
use crate::store::{sanitize, RecordKind, RecordStore};

use super::entry::{EntryUpdate, NewEntry, VaultEntry};
use super::id::next_id;
use super::search::search;
use super::sort::{describe, sort, SortDirection, SortKey};

/// Entry count plus newest / oldest entry for one owner.
#[derive(Debug, Clone)]
pub struct VaultOverview {
    pub count: usize,
    pub newest: Option<VaultEntry>,
    pub oldest: Option<VaultEntry>,
}

/// The vault as seen by the logged-in owner.
pub struct VaultRepository<'s, S: RecordStore> {
    store: &'s S,
    ledger: AuditLedger<&'s S>,
    auth: &'s dyn Authenticator,
}

impl<'s, S: RecordStore> VaultRepository<'s, S> {
    pub fn new(store: &'s S, auth: &'s dyn Authenticator) -> Self {
        Self {
            store,
            ledger: AuditLedger::new(store),
            auth,
        }
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Add a credential.  The secret is ciphered with the session key
    /// before it is stored; the returned entry only holds the ciphered form.
    pub fn create(&self, mut draft: NewEntry) -> Result<VaultEntry> {
        let secret = Zeroizing::new(std::mem::take(&mut draft.secret));
        let owner = self.auth.current_user()?;
        let subject = sanitize(&draft.title);
        let result = self.try_create(owner, draft, &secret);
        self.finish(owner, AuditAction::Create, &subject, result, |e| {
            format!("Created entry: {}", e.title)
        })
    }

    /// All entries of the owner in persisted order.
    pub fn list(&self) -> Result<Vec<VaultEntry>> {
        let owner = self.auth.current_user()?;
        let result = self.entries_of(owner);
        self.finish(owner, AuditAction::Read, "", result, |entries| {
            format!("Listed {} entries", entries.len())
        })
    }

    /// One entry by id.
    pub fn read(&self, id: &str) -> Result<VaultEntry> {
        let owner = self.auth.current_user()?;
        let result = self.find(owner, id);
        self.finish(owner, AuditAction::Read, id, result, |e| {
            format!("Opened entry: {}", e.title)
        })
    }

    /// Change any of title, account, secret, notes.  `id`, owner and
    /// creation time never change.
    pub fn update(&self, id: &str, mut changes: EntryUpdate) -> Result<VaultEntry> {
        let secret = changes.secret.take().map(Zeroizing::new);
        let owner = self.auth.current_user()?;
        let new_secret = secret.as_ref().map(|s| s.as_str());
        let result = self.try_update(owner, id, changes, new_secret);
        self.finish(owner, AuditAction::Update, id, result, |e| {
            format!("Updated entry: {}", e.title)
        })
    }

    /// Remove an entry permanently.
    pub fn delete(&self, id: &str) -> Result<VaultEntry> {
        let owner = self.auth.current_user()?;
        let result = self.try_delete(owner, id);
        self.finish(owner, AuditAction::Delete, id, result, |e| {
            format!("Deleted entry: {}", e.title)
        })
    }

    /// Decrypt an entry's secret.  Nothing is modified, but a READ record
    /// is always written.
    pub fn reveal(&self, entry: &VaultEntry) -> Result<Zeroizing<String>> {
        let owner = self.auth.current_user()?;
        let result = if entry.is_owned_by(owner) {
            self.auth
                .cipher_key()
                .and_then(|key| decrypt(&entry.ciphered_secret, key))
        } else {
            Err(CipherVaultError::NotFound(entry.id.clone()))
        };
        self.finish(owner, AuditAction::Read, &entry.id, result, |_| {
            format!("Revealed secret: {}", entry.title)
        })
    }

    /// Entries whose title or account contains `keyword`.
    pub fn search(&self, keyword: &str) -> Result<Vec<VaultEntry>> {
        let owner = self.auth.current_user()?;
        let result: Result<Vec<VaultEntry>> = self
            .entries_of(owner)
            .map(|entries| search(&entries, keyword).into_iter().cloned().collect());
        self.finish(owner, AuditAction::Search, keyword, result, |_| {
            format!("Searched for: {keyword}")
        })
    }

    /// The owner's entries in the requested order.
    pub fn sort(&self, key: SortKey, direction: SortDirection) -> Result<Vec<VaultEntry>> {
        let owner = self.auth.current_user()?;
        let result = self
            .entries_of(owner)
            .map(|entries| sort(&entries, key, direction));
        self.finish(owner, AuditAction::Sort, "", result, |_| {
            format!("Sorted by: {}", describe(key, direction))
        })
    }

    /// Count and newest / oldest entry.  Read-only summary for the
    /// statistics view; does not touch the ledger.
    pub fn overview(&self) -> Result<VaultOverview> {
        let owner = self.auth.current_user()?;
        let entries = self.entries_of(owner)?;
        Ok(VaultOverview {
            count: entries.len(),
            newest: entries.iter().max_by_key(|e| e.created_at).cloned(),
            oldest: entries.iter().min_by_key(|e| e.created_at).cloned(),
        })
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn try_create(&self, owner: &str, draft: NewEntry, secret: &str) -> Result<VaultEntry> {
        let title = required("title", &draft.title)?;
        let account = required("account", &draft.account)?;
        if secret.trim().is_empty() {
            return Err(CipherVaultError::Validation("secret cannot be empty".into()));
        }
        let key = self.auth.cipher_key()?;

        let mut all = self.load_all()?;
        let id = next_id(all.iter().map(|e| e.id.as_str()))?;

        let entry = VaultEntry {
            id,
            owner: owner.to_string(),
            title,
            account,
            ciphered_secret: encrypt(secret, key),
            notes: sanitize(&draft.notes),
            created_at: crate::audit::now(),
        };
        all.push(entry.clone());
        self.save_all(&all)?;

        info!(id = %entry.id, "created vault entry");
        Ok(entry)
    }

    fn try_update(
        &self,
        owner: &str,
        id: &str,
        changes: EntryUpdate,
        secret: Option<&str>,
    ) -> Result<VaultEntry> {
        let mut all = self.load_all()?;
        let idx = all
            .iter()
            .position(|e| e.id == id && e.is_owned_by(owner))
            .ok_or_else(|| CipherVaultError::NotFound(id.to_string()))?;

        let mut entry = all[idx].clone();
        if let Some(title) = changes.title {
            entry.title = required("title", &title)?;
        }
        if let Some(account) = changes.account {
            entry.account = required("account", &account)?;
        }
        if let Some(secret) = secret {
            if secret.trim().is_empty() {
                return Err(CipherVaultError::Validation("secret cannot be empty".into()));
            }
            entry.ciphered_secret = encrypt(secret, self.auth.cipher_key()?);
        }
        if let Some(notes) = changes.notes {
            entry.notes = sanitize(&notes);
        }

        all[idx] = entry.clone();
        self.save_all(&all)?;

        info!(id = %entry.id, "updated vault entry");
        Ok(entry)
    }

    fn try_delete(&self, owner: &str, id: &str) -> Result<VaultEntry> {
        let mut all = self.load_all()?;
        let idx = all
            .iter()
            .position(|e| e.id == id && e.is_owned_by(owner))
            .ok_or_else(|| CipherVaultError::NotFound(id.to_string()))?;

        let removed = all.remove(idx);
        self.save_all(&all)?;

        info!(id = %removed.id, "deleted vault entry");
        Ok(removed)
    }

    fn find(&self, owner: &str, id: &str) -> Result<VaultEntry> {
        self.entries_of(owner)?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| CipherVaultError::NotFound(id.to_string()))
    }

    fn entries_of(&self, owner: &str) -> Result<Vec<VaultEntry>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|e| e.is_owned_by(owner))
            .collect())
    }

    /// Every entry in the store, all owners.  A malformed line is an
    /// error rather than a skip, since the next save would drop it.
    fn load_all(&self) -> Result<Vec<VaultEntry>> {
        self.store
            .read_all(RecordKind::Vault)?
            .iter()
            .map(|line| VaultEntry::parse(line))
            .collect()
    }

    fn save_all(&self, entries: &[VaultEntry]) -> Result<()> {
        let lines: Vec<String> = entries.iter().map(VaultEntry::to_line).collect();
        self.store.write_all(RecordKind::Vault, &lines)
    }

    /// Write the ledger record for an operation and pass its result on.
    ///
    /// Failures the user caused are recorded against `subject`; storage
    /// failures are not, and a ledger error never replaces the original.
    ///
    /// The record is written after the vault change is saved.  If that
    /// append fails the change stays on disk but the caller still gets the
    /// `Persistence` error, so callers must re-read before retrying a
    /// `create`.
    fn finish<T, F>(
        &self,
        owner: &str,
        action: AuditAction,
        subject: &str,
        result: Result<T>,
        success: F,
    ) -> Result<T>
    where
        F: FnOnce(&T) -> String,
    {
        match result {
            Ok(value) => {
                self.ledger.record(owner, action, &success(&value))?;
                Ok(value)
            }
            Err(e) if e.is_user_visible() => {
                let message = if subject.is_empty() {
                    format!("{action} failed: {e}")
                } else {
                    format!("{action} '{subject}' failed: {e}")
                };
                if let Err(log_err) = self.ledger.record(owner, action, &message) {
                    warn!(error = %log_err, "could not record failed {action}");
                }
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

/// Sanitize a mandatory field, rejecting it if nothing is left.
fn required(field: &str, value: &str) -> Result<String> {
    let cleaned = sanitize(value);
    if cleaned.is_empty() {
        return Err(CipherVaultError::Validation(format!(
            "{field} cannot be empty"
        )));
    }
    Ok(cleaned)
}
