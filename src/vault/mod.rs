//! Vault module — credential entries and the operations over them.
//!
//! This module provides:
//! - `VaultEntry`, `NewEntry`, `EntryUpdate` and the line format (`entry`)
//! - `VAULTnnn` identifier allocation (`id`)
//! - Linear keyword search (`search`) and stable sorting (`sort`)
//! - `VaultRepository`, the audited CRUD surface (`repository`)

pub mod entry;
pub mod id;
pub mod repository;
pub mod search;
pub mod sort;

// Re-export the most commonly used items.
pub use entry::{EntryUpdate, NewEntry, VaultEntry};
pub use id::next_id;
pub use repository::{VaultOverview, VaultRepository};
pub use sort::{SortDirection, SortKey};
