//! Vault entry identifier allocation.
//!
//! Ids look like `VAULT001`.  A new entry gets the lowest free number,
//! so ids freed by deletes are reused.

use std::collections::HashSet;

use crate::errors::{CipherVaultError, Result};

/// Prefix shared by every entry id.
pub const ID_PREFIX: &str = "VAULT";

/// Highest allocatable sequence number.
pub const MAX_SEQUENCE: u32 = 999;

/// Format a sequence number as an id (`7` -> `VAULT007`).
pub fn format_id(sequence: u32) -> String {
    format!("{ID_PREFIX}{sequence:03}")
}

/// Lowest unused id, scanning from `VAULT001`.
///
/// Fails with `Exhausted` once every id up to `VAULT999` is taken.
pub fn next_id<'a, I>(existing: I) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();

    (1..=MAX_SEQUENCE)
        .map(format_id)
        .find(|candidate| !taken.contains(candidate.as_str()))
        .ok_or(CipherVaultError::Exhausted(MAX_SEQUENCE))
}
