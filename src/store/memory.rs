//! In-memory record store, used by tests and for dry runs.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{RecordKind, RecordStore};
use crate::errors::Result;

/// Record lines kept in a map keyed by kind.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RefCell<HashMap<RecordKind, Vec<String>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed `kind` with raw lines.
    pub fn with_records(self, kind: RecordKind, lines: &[&str]) -> Self {
        self.records
            .borrow_mut()
            .insert(kind, lines.iter().map(|l| l.to_string()).collect());
        self
    }
}

impl RecordStore for MemoryRecordStore {
    fn read_all(&self, kind: RecordKind) -> Result<Vec<String>> {
        Ok(self
            .records
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    fn write_all(&self, kind: RecordKind, records: &[String]) -> Result<()> {
        self.records.borrow_mut().insert(kind, records.to_vec());
        Ok(())
    }

    fn append(&self, kind: RecordKind, record: &str) -> Result<()> {
        self.records
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(record.to_string());
        Ok(())
    }
}
