//! Audit ledger — append-only history of user actions.
//!
//! Every vault operation, plus registration, login and logout, appends one
//! `timestamp|username|action|details` line to the audit record kind.
//! Records are never edited or removed; the query helpers below only read.
//!
//! Lines that cannot be parsed (hand-edited files, unknown actions) are
//! skipped with a warning so one bad line never hides the rest of the
//! history.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime, SubsecRound};
use tracing::warn;

use crate::errors::{CipherVaultError, Result};
use crate::store::{
    join_fields, sanitize, split_fields, RecordKind, RecordStore, TIMESTAMP_FORMAT,
};

/// Kinds of recorded actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AuditAction {
    Register,
    Login,
    Logout,
    Create,
    Read,
    Update,
    Delete,
    Search,
    Sort,
}

impl AuditAction {
    pub const ALL: [AuditAction; 9] = [
        Self::Register,
        Self::Login,
        Self::Logout,
        Self::Create,
        Self::Read,
        Self::Update,
        Self::Delete,
        Self::Search,
        Self::Sort,
    ];

    /// Upper-case name as written to disk.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Register => "REGISTER",
            Self::Login => "LOGIN",
            Self::Logout => "LOGOUT",
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Search => "SEARCH",
            Self::Sort => "SORT",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = CipherVaultError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                CipherVaultError::Validation(format!("unknown audit action '{s}'"))
            })
    }
}

/// One immutable ledger line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub timestamp: NaiveDateTime,
    pub username: String,
    pub action: AuditAction,
    pub details: String,
}

impl AuditRecord {
    fn to_line(&self) -> String {
        let ts = self.timestamp.format(TIMESTAMP_FORMAT).to_string();
        join_fields(&[&ts, &self.username, self.action.as_str(), &self.details])
    }

    fn parse(line: &str) -> Result<Self> {
        let fields = split_fields(line);
        let (ts, username, action, details) = match fields.as_slice() {
            [ts, user, action] => (*ts, *user, *action, ""),
            [ts, user, action, details] => (*ts, *user, *action, *details),
            _ => {
                return Err(malformed(format!(
                    "expected 3 or 4 fields, found {}",
                    fields.len()
                )))
            }
        };

        let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
            .map_err(|e| malformed(format!("bad timestamp '{ts}': {e}")))?;

        Ok(Self {
            timestamp,
            username: username.to_string(),
            action: action.parse()?,
            details: details.to_string(),
        })
    }

    fn belongs_to(&self, username: &str) -> bool {
        self.username.eq_ignore_ascii_case(username)
    }
}

/// Per-user aggregation over the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStatistics {
    pub username: String,
    pub total_count: usize,
    pub first_timestamp: Option<NaiveDateTime>,
    pub last_timestamp: Option<NaiveDateTime>,
    pub counts_by_action: BTreeMap<AuditAction, usize>,
}

impl AuditStatistics {
    /// Occurrences of `action`, zero if never seen.
    pub fn count(&self, action: AuditAction) -> usize {
        self.counts_by_action.get(&action).copied().unwrap_or(0)
    }
}

/// Append-only ledger over a record store.
pub struct AuditLedger<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> AuditLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a record stamped with the current local time.
    pub fn record(&self, username: &str, action: AuditAction, details: &str) -> Result<()> {
        let record = AuditRecord {
            timestamp: now(),
            username: sanitize(username),
            action,
            details: sanitize(details),
        };
        self.store.append(RecordKind::Audit, &record.to_line())
    }

    /// The `n` most recent records of `username`, newest first.
    pub fn recent(&self, username: &str, n: usize) -> Result<Vec<AuditRecord>> {
        let mut records = self.all(username)?;
        records.reverse();
        records.truncate(n);
        Ok(records)
    }

    /// Full history of `username`, oldest first.
    pub fn all(&self, username: &str) -> Result<Vec<AuditRecord>> {
        Ok(self
            .all_system()?
            .into_iter()
            .filter(|r| r.belongs_to(username))
            .collect())
    }

    /// Every record in the ledger, oldest first.
    pub fn all_system(&self) -> Result<Vec<AuditRecord>> {
        let lines = self.store.read_all(RecordKind::Audit)?;
        let mut records = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            match AuditRecord::parse(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = idx + 1, error = %e, "skipping audit line"),
            }
        }
        Ok(records)
    }

    /// Every record of one action kind, across all users.
    pub fn by_action(&self, action: AuditAction) -> Result<Vec<AuditRecord>> {
        Ok(self
            .all_system()?
            .into_iter()
            .filter(|r| r.action == action)
            .collect())
    }

    /// Totals, first/last activity, and a per-action breakdown for one user.
    pub fn statistics(&self, username: &str) -> Result<AuditStatistics> {
        let records = self.all(username)?;

        let mut counts_by_action = BTreeMap::new();
        for record in &records {
            *counts_by_action.entry(record.action).or_insert(0) += 1;
        }

        Ok(AuditStatistics {
            username: username.to_string(),
            total_count: records.len(),
            first_timestamp: records.first().map(|r| r.timestamp),
            last_timestamp: records.last().map(|r| r.timestamp),
            counts_by_action,
        })
    }
}

/// Current local time at the precision stored on disk.
pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}

fn malformed(reason: String) -> CipherVaultError {
    CipherVaultError::MalformedRecord {
        kind: RecordKind::Audit.label(),
        reason,
    }
}
