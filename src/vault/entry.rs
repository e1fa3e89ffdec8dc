//! Vault entry types and their on-disk line format.
//!
//! A persisted entry is one line:
//!
//! ```text
//! id|owner|title|account|cipheredSecret|notes|createdAt
//! ```
//!
//! The secret field always holds cipher output; plaintext never appears
//! in an `VaultEntry`.

use std::fmt;

use chrono::NaiveDateTime;

use crate::errors::{CipherVaultError, Result};
use crate::store::{join_fields, split_fields, RecordKind, TIMESTAMP_FORMAT};

/// Number of fields in a vault line.
const FIELD_COUNT: usize = 7;

/// Stand-in printed for plaintext secrets.
const REDACTED: &str = "[REDACTED]";

/// A single stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    /// Store-wide unique id (e.g. "VAULT001").
    pub id: String,

    /// Username of the owner.
    pub owner: String,

    pub title: String,
    pub account: String,

    /// Secret as produced by `crypto::encrypt`.
    pub ciphered_secret: String,

    pub notes: String,

    /// When the entry was created (local time, second precision).
    pub created_at: NaiveDateTime,
}

impl VaultEntry {
    /// Whether `username` owns this entry (case-insensitive).
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner.eq_ignore_ascii_case(username)
    }

    /// The ciphered secret rendered as asterisks of the same length.
    pub fn masked_secret(&self) -> String {
        "*".repeat(self.ciphered_secret.chars().count())
    }

    pub(crate) fn to_line(&self) -> String {
        let created = self.created_at.format(TIMESTAMP_FORMAT).to_string();
        join_fields(&[
            &self.id,
            &self.owner,
            &self.title,
            &self.account,
            &self.ciphered_secret,
            &self.notes,
            &created,
        ])
    }

    pub(crate) fn parse(line: &str) -> Result<Self> {
        let fields = split_fields(line);
        if fields.len() != FIELD_COUNT {
            return Err(malformed(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        let created_at = NaiveDateTime::parse_from_str(fields[6], TIMESTAMP_FORMAT)
            .map_err(|e| malformed(format!("bad timestamp '{}': {e}", fields[6])))?;

        Ok(Self {
            id: fields[0].to_string(),
            owner: fields[1].to_string(),
            title: fields[2].to_string(),
            account: fields[3].to_string(),
            ciphered_secret: fields[4].to_string(),
            notes: fields[5].to_string(),
            created_at,
        })
    }
}

/// Input for a new entry.  The secret is plaintext here and is ciphered
/// before anything is stored; `Debug` never prints it.
#[derive(Clone, Default)]
pub struct NewEntry {
    pub title: String,
    pub account: String,
    pub secret: String,
    pub notes: String,
}

/// Partial update: `None` keeps the current value.
#[derive(Clone, Default)]
pub struct EntryUpdate {
    pub title: Option<String>,
    pub account: Option<String>,
    /// New plaintext secret; re-ciphered on save.
    pub secret: Option<String>,
    pub notes: Option<String>,
}

impl fmt::Debug for NewEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewEntry")
            .field("title", &self.title)
            .field("account", &self.account)
            .field("secret", &REDACTED)
            .field("notes", &self.notes)
            .finish()
    }
}

impl fmt::Debug for EntryUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryUpdate")
            .field("title", &self.title)
            .field("account", &self.account)
            .field("secret", &self.secret.as_ref().map(|_| REDACTED))
            .field("notes", &self.notes)
            .finish()
    }
}

impl EntryUpdate {
    /// Returns `true` if no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.account.is_none()
            && self.secret.is_none()
            && self.notes.is_none()
    }
}

fn malformed(reason: String) -> CipherVaultError {
    CipherVaultError::MalformedRecord {
        kind: RecordKind::Vault.label(),
        reason,
    }
}
