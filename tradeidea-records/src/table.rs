//! A keyed table persisted as one CSV file with a header row.
//!
//! The whole file is read on every call and rewritten on every mutation.
//! Rewrites go to a temp file in the same directory and are renamed over
//! the original, so a crash never leaves a half-written table.

use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::record::Record;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("a {table} record named '{key}' already exists")]
    DuplicateKey { table: &'static str, key: String },

    #[error("record name must not be empty")]
    EmptyKey,
}

impl RecordError {
    fn io(path: &Path, source: io::Error) -> Self {
        RecordError::Io { path: path.to_path_buf(), source }
    }
}

/// CSV-backed table of `R`, keyed by [`Record::key`].
#[derive(Debug, Clone)]
pub struct CsvTable<R: Record> {
    path: PathBuf,
    _row: PhantomData<R>,
}

impl<R: Record> CsvTable<R> {
    /// Open the table in `dir`, creating the directory if needed.
    /// The file itself is created on first write.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RecordError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| RecordError::io(dir, e))?;
        Ok(Self {
            path: dir.join(format!("{}.csv", R::TABLE)),
            _row: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rows in file order. A missing file is an empty table.
    pub fn list(&self) -> Result<Vec<R>, RecordError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let rows = reader.deserialize().collect::<Result<Vec<R>, _>>()?;
        debug!(table = R::TABLE, rows = rows.len(), "loaded table");
        Ok(rows)
    }

    pub fn get(&self, key: &str) -> Result<Option<R>, RecordError> {
        let key = key.trim();
        Ok(self.list()?.into_iter().find(|r| r.key().trim() == key))
    }

    /// Append a row. The key is stored trimmed and must be unique.
    pub fn append(&self, mut record: R) -> Result<(), RecordError> {
        let key = record.key().trim().to_string();
        if key.is_empty() {
            return Err(RecordError::EmptyKey);
        }
        let mut rows = self.list()?;
        if rows.iter().any(|r| r.key().trim() == key) {
            return Err(RecordError::DuplicateKey { table: R::TABLE, key });
        }
        record.set_key(key.clone());
        rows.push(record);
        self.save_all(&rows)?;
        info!(table = R::TABLE, key = %key, "record added");
        Ok(())
    }

    /// Delete the row with `key`. Returns whether a row was removed.
    pub fn delete(&self, key: &str) -> Result<bool, RecordError> {
        let key = key.trim();
        let mut rows = self.list()?;
        let before = rows.len();
        rows.retain(|r| r.key().trim() != key);
        if rows.len() == before {
            warn!(table = R::TABLE, key = %key, "no record to delete");
            return Ok(false);
        }
        self.save_all(&rows)?;
        info!(table = R::TABLE, key = %key, "record deleted");
        Ok(true)
    }

    fn save_all(&self, rows: &[R]) -> Result<(), RecordError> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| RecordError::io(dir, e))?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush().map_err(|e| RecordError::io(&self.path, e))?;
        }
        tmp.persist(&self.path)
            .map_err(|e| RecordError::io(&self.path, e.error))?;
        debug!(table = R::TABLE, rows = rows.len(), path = %self.path.display(), "saved table");
        Ok(())
    }
}
