//! A transaction store backed by a single JSON file on disk.

use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, store::TransactionStore, transaction::Transaction};

/// Persists the transaction collection as a JSON array in one file.
///
/// The file plays the role of the single key in a key-value store: every
/// save serializes the whole collection and replaces the file. Writes go to
/// a temporary sibling first and are moved into place with a rename, so a
/// crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store that reads and writes `path`.
    ///
    /// The file does not need to exist yet; loading from a missing file
    /// returns an empty collection.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name: OsString = self.path.as_os_str().to_owned();
        file_name.push(".tmp");
        PathBuf::from(file_name)
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Transaction>, Error> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(Error::StorageRead(error.to_string())),
        };

        serde_json::from_slice(&bytes).map_err(|error| Error::StorageRead(error.to_string()))
    }

    async fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let json = serde_json::to_vec_pretty(transactions)
            .map_err(|error| Error::StorageWrite(error.to_string()))?;

        let temp_path = self.temp_path();

        tokio::fs::write(&temp_path, &json)
            .await
            .map_err(|error| Error::StorageWrite(error.to_string()))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|error| Error::StorageWrite(error.to_string()))
    }
}
