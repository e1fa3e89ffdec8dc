//! File-backed record store: one text file per record kind inside a data
//! directory.
//!
//! Every call opens, reads or writes, flushes and closes its own handle,
//! so nothing stays open between operations.  Full rewrites go through a
//! temp file + rename; appends use `O_APPEND`.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{RecordKind, RecordStore};
use crate::errors::Result;

/// Record store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
}

impl FileRecordStore {
    /// Open (creating if needed) the data directory at `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            debug!(dir = %dir.display(), "created data directory");
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Returns the data directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the file holding `kind`.
    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

impl RecordStore for FileRecordStore {
    fn read_all(&self, kind: RecordKind) -> Result<Vec<String>> {
        let path = self.path_for(kind);
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if !line.trim().is_empty() {
                records.push(line);
            }
        }

        debug!(kind = kind.label(), count = records.len(), "read records");
        Ok(records)
    }

    fn write_all(&self, kind: RecordKind, records: &[String]) -> Result<()> {
        let path = self.path_for(kind);
        let tmp_path = self.dir.join(format!(".{}.tmp", kind.file_name()));

        let mut buf = String::with_capacity(records.iter().map(|r| r.len() + 1).sum());
        for record in records {
            buf.push_str(record);
            buf.push('\n');
        }

        fs::write(&tmp_path, buf)?;
        restrict_permissions(&tmp_path);
        fs::rename(&tmp_path, &path)?;

        debug!(kind = kind.label(), count = records.len(), "wrote records");
        Ok(())
    }

    fn append(&self, kind: RecordKind, record: &str) -> Result<()> {
        let path = self.path_for(kind);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{record}")?;
        file.flush()?;
        restrict_permissions(&path);

        debug!(kind = kind.label(), "appended record");
        Ok(())
    }
}

/// Owner-only permissions on Unix; a no-op elsewhere.
fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        let _ = fs::set_permissions(path, perms);
    }
    #[cfg(not(unix))]
    let _ = path;
}
