//! The storage boundary for the transaction collection.
//!
//! The whole collection is the unit of persistence: a store hands back every
//! transaction on [TransactionStore::load] and replaces the stored blob on
//! [TransactionStore::save]. There is no caching or indexing at this layer.

use std::future::Future;

use crate::{Error, transaction::Transaction};

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Handles reading and replacing the persisted transaction collection.
pub trait TransactionStore {
    /// Read the full transaction collection.
    ///
    /// A store that has never been written to returns an empty collection.
    ///
    /// # Errors
    /// Returns [Error::StorageRead] if stored data exists but cannot be read
    /// or parsed.
    fn load(&self) -> impl Future<Output = Result<Vec<Transaction>, Error>> + Send;

    /// Replace the stored collection with `transactions`.
    ///
    /// A reader never observes a partially written collection: either the
    /// previous blob or the new one.
    ///
    /// # Errors
    /// Returns [Error::StorageWrite] if the data cannot be written.
    fn save(&self, transactions: &[Transaction]) -> impl Future<Output = Result<(), Error>> + Send;
}
