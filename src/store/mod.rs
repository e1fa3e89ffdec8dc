//! Record storage — the persistence substrate under the vault and ledger.
//!
//! Everything is stored as pipe-delimited lines, one record per line.
//! The [`RecordStore`] trait keeps the engine storage-agnostic:
//! - `FileRecordStore` writes one text file per record kind (`file`)
//! - `MemoryRecordStore` keeps lines in memory for tests (`memory`)
//! - Line splitting, joining and sanitizing live in `record`

pub mod file;
pub mod memory;
pub mod record;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;
pub use record::{join_fields, sanitize, split_fields, FIELD_DELIMITER, TIMESTAMP_FORMAT};

use crate::errors::Result;

/// The three record families persisted by CipherVault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Users,
    Vault,
    Audit,
}

impl RecordKind {
    /// File name used by the file-backed store.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Users => "users.txt",
            Self::Vault => "vault.txt",
            Self::Audit => "audit_log.txt",
        }
    }

    /// Short label used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Vault => "vault",
            Self::Audit => "audit",
        }
    }
}

/// Read-all / write-all access to raw record lines.
///
/// Implementations take `&self` so a repository and a ledger can share one
/// store for the length of a session.
pub trait RecordStore {
    /// Every record of `kind`, in persisted order.  A kind that was never
    /// written reads as empty.
    fn read_all(&self, kind: RecordKind) -> Result<Vec<String>>;

    /// Replace every record of `kind`.
    fn write_all(&self, kind: RecordKind, records: &[String]) -> Result<()>;

    /// Add one record at the end.
    fn append(&self, kind: RecordKind, record: &str) -> Result<()> {
        let mut records = self.read_all(kind)?;
        records.push(record.to_string());
        self.write_all(kind, &records)
    }
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn read_all(&self, kind: RecordKind) -> Result<Vec<String>> {
        (**self).read_all(kind)
    }

    fn write_all(&self, kind: RecordKind, records: &[String]) -> Result<()> {
        (**self).write_all(kind, records)
    }

    fn append(&self, kind: RecordKind, record: &str) -> Result<()> {
        (**self).append(kind, record)
    }
}
