//! An in-process transaction store.

use std::sync::{Arc, Mutex};

use crate::{Error, store::TransactionStore, transaction::Transaction};

/// Keeps the transaction collection in memory.
///
/// Used by the test suite in place of [crate::JsonFileStore] and handy for
/// trying out the app without touching the disk. Clones share the same
/// underlying collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Arc<Mutex<Vec<Transaction>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `transactions`.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(Mutex::new(transactions)),
        }
    }
}

impl TransactionStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Transaction>, Error> {
        let transactions = self
            .transactions
            .lock()
            .map_err(|error| Error::StorageRead(error.to_string()))?;

        Ok(transactions.clone())
    }

    async fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let mut stored = self
            .transactions
            .lock()
            .map_err(|error| Error::StorageWrite(error.to_string()))?;

        *stored = transactions.to_vec();

        Ok(())
    }
}

#[cfg(test)]
mod memory_store_tests {
    use super::MemoryStore;
    use crate::{
        store::TransactionStore,
        transaction::{Transaction, TransactionType},
    };

    #[tokio::test]
    async fn starts_empty() {
        let store = MemoryStore::new();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn clones_share_the_collection() {
        let store = MemoryStore::new();
        let clone = store.clone();

        let transaction = Transaction {
            id: "1".to_owned(),
            transaction_type: TransactionType::Expense,
            category: "food".to_owned(),
            amount: 100.0,
            description: String::new(),
            date: "2024-01-05".to_owned(),
            created_at: "2024-01-05T10:30:00Z".to_owned(),
        };
        store.save(std::slice::from_ref(&transaction)).await.unwrap();

        assert_eq!(clone.load().await.unwrap(), vec![transaction]);
    }
}
