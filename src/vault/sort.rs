//! Ordering entries by title or creation time.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::entry::VaultEntry;
use crate::errors::CipherVaultError;

/// Field to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    CreatedAt,
}

/// Ascending or descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortKey {
    type Err = CipherVaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "date" | "created" | "created-at" | "created_at" => Ok(Self::CreatedAt),
            other => Err(CipherVaultError::Validation(format!(
                "unknown sort key '{other}' — use title or date"
            ))),
        }
    }
}

/// Human label, e.g. "Title (A-Z)" or "Date (Newest First)".
pub fn describe(key: SortKey, direction: SortDirection) -> &'static str {
    match (key, direction) {
        (SortKey::Title, SortDirection::Ascending) => "Title (A-Z)",
        (SortKey::Title, SortDirection::Descending) => "Title (Z-A)",
        (SortKey::CreatedAt, SortDirection::Ascending) => "Date (Oldest First)",
        (SortKey::CreatedAt, SortDirection::Descending) => "Date (Newest First)",
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::CreatedAt => f.write_str("date"),
        }
    }
}

/// A sorted copy of `entries`.
///
/// The sort is stable in both directions: entries that compare equal keep
/// their input order.  Titles compare case-insensitively.
pub fn sort(entries: &[VaultEntry], key: SortKey, direction: SortDirection) -> Vec<VaultEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    sorted
}

fn compare(a: &VaultEntry, b: &VaultEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}
