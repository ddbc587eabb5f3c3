//! Trade Idea Records: CSV-backed `orders` and `clients` tables.
//!
//! Flat tabular storage keyed by a free-text name, supporting append,
//! list, get and delete-by-key. One file per table under a data directory.

pub mod record;
pub mod table;

pub use record::{ClientRecord, OrderRecord, Record};
pub use table::{CsvTable, RecordError};

use std::path::{Path, PathBuf};

/// Both tables, opened from the same directory.
#[derive(Debug, Clone)]
pub struct RecordStore {
    dir: PathBuf,
    pub orders: CsvTable<OrderRecord>,
    pub clients: CsvTable<ClientRecord>,
}

impl RecordStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, RecordError> {
        let dir = dir.as_ref();
        Ok(Self {
            dir: dir.to_path_buf(),
            orders: CsvTable::open(dir)?,
            clients: CsvTable::open(dir)?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Orders booked for `client`, in file order.
    pub fn orders_for_client(&self, client: &str) -> Result<Vec<OrderRecord>, RecordError> {
        let client = client.trim();
        Ok(self
            .orders
            .list()?
            .into_iter()
            .filter(|o| o.client.trim() == client)
            .collect())
    }
}
