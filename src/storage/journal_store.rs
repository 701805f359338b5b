use std::{
    fs::OpenOptions,
    io::Write,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::errors::Result;
use crate::ledger::JournalRecord;

use super::{ensure_dir, read_records};

/// Append-only log of journal records, one encoded line per record.
///
/// Appends never touch existing lines and scans read the whole file; a
/// missing file is an empty journal, not an error.
pub struct Journal<R: JournalRecord> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: JournalRecord> Journal<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Commits one record to the end of the journal, flushed before return.
    pub fn append(&self, record: &R) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{}", record.encode_line())?;
        file.flush()?;
        info!(journal = R::KIND, "journal record appended");
        Ok(())
    }

    /// Decodes every record in append order.
    pub fn scan(&self) -> Result<Vec<R>> {
        read_records(&self.path, R::KIND, R::decode_line)
    }
}
