//! The repository that owns the in-memory transaction collection.

use time::OffsetDateTime;
use tokio::sync::watch;

use crate::{
    Error,
    store::TransactionStore,
    transaction::{Transaction, TransactionDraft},
};

/// Owns the in-memory transaction collection and its persistence lifecycle.
///
/// Every mutating operation works on a freshly loaded copy of the stored
/// collection, saves it back, and only then mirrors the change in memory.
/// Memory therefore never shows data that failed to persist. Derived views
/// and pages read snapshots through [TransactionRepository::transactions];
/// nothing mutates the collection except the operations here.
///
/// The repository is shared behind a single async lock (see
/// [crate::AppState]), so mutations are applied one at a time rather than
/// racing last-write-wins on the stored blob.
pub struct TransactionRepository<S> {
    store: S,
    transactions: Vec<Transaction>,
    loading: bool,
    error: Option<String>,
    revision: watch::Sender<u64>,
}

impl<S> TransactionRepository<S>
where
    S: TransactionStore,
{
    /// Create a repository reading and writing through `store`.
    ///
    /// The in-memory collection starts empty; call
    /// [TransactionRepository::fetch_all] to populate it.
    pub fn new(store: S) -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            store,
            transactions: Vec::new(),
            loading: false,
            error: None,
            revision,
        }
    }

    /// The current in-memory transaction collection.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Whether a storage operation is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The message of the most recent failed operation, cleared when the
    /// next operation starts.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Watch for changes to the collection.
    ///
    /// The receiver's value is a revision counter that increases every time
    /// the in-memory collection changes, letting UI layers re-render without
    /// polling.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn publish(&mut self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Replace the in-memory collection with the stored one.
    ///
    /// # Errors
    /// Returns [Error::StorageRead] if the store cannot be read, in which
    /// case the previous in-memory collection is kept.
    pub async fn fetch_all(&mut self) -> Result<(), Error> {
        self.loading = true;
        self.error = None;

        let result = self.store.load().await;

        self.loading = false;

        match result {
            Ok(transactions) => {
                self.transactions = transactions;
                self.publish();
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Assign an ID and creation timestamp to `draft` and persist it.
    ///
    /// The draft is appended to a freshly loaded copy of the stored
    /// collection; the in-memory collection only picks it up after the save
    /// succeeds.
    ///
    /// # Errors
    /// Returns [Error::StorageRead] or [Error::StorageWrite] if the store
    /// round-trip fails. The in-memory collection is left untouched.
    pub async fn add(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        self.loading = true;
        self.error = None;

        let result = async {
            let mut stored = self.store.load().await?;

            let now = OffsetDateTime::now_utc();
            let transaction = draft.into_transaction(next_transaction_id(&stored, now), now);

            stored.push(transaction.clone());
            self.store.save(&stored).await?;

            Ok::<Transaction, Error>(transaction)
        }
        .await;

        self.loading = false;

        match result {
            Ok(transaction) => {
                tracing::debug!("Recorded transaction {}", transaction.id);
                self.transactions.push(transaction.clone());
                self.publish();
                Ok(transaction)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Replace the stored transaction with the same ID as `transaction`.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingTransaction] if no stored transaction
    /// has that ID, or a storage error if the round-trip fails. In both
    /// cases the in-memory collection is left untouched.
    pub async fn update(&mut self, transaction: Transaction) -> Result<(), Error> {
        self.loading = true;
        self.error = None;

        let result = async {
            let mut stored = self.store.load().await?;

            let entry = stored
                .iter_mut()
                .find(|stored_transaction| stored_transaction.id == transaction.id)
                .ok_or(Error::UpdateMissingTransaction)?;
            *entry = transaction.clone();

            self.store.save(&stored).await
        }
        .await;

        self.loading = false;

        match result {
            Ok(()) => {
                if let Some(entry) = self
                    .transactions
                    .iter_mut()
                    .find(|in_memory| in_memory.id == transaction.id)
                {
                    *entry = transaction;
                }
                self.publish();
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Remove the stored transaction with the given ID.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if no stored transaction
    /// has that ID, or a storage error if the round-trip fails. In both
    /// cases the in-memory collection is left untouched.
    pub async fn delete(&mut self, id: &str) -> Result<(), Error> {
        self.loading = true;
        self.error = None;

        let result = async {
            let mut stored = self.store.load().await?;

            let length_before = stored.len();
            stored.retain(|transaction| transaction.id != id);

            if stored.len() == length_before {
                return Err(Error::DeleteMissingTransaction);
            }

            self.store.save(&stored).await
        }
        .await;

        self.loading = false;

        match result {
            Ok(()) => {
                self.transactions.retain(|transaction| transaction.id != id);
                self.publish();
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }
}

/// The next free transaction ID: the creation time in unix milliseconds,
/// bumped past any ID already taken in `stored`.
fn next_transaction_id(stored: &[Transaction], now: OffsetDateTime) -> String {
    let mut millis = (now.unix_timestamp_nanos() / 1_000_000) as i64;

    while stored
        .iter()
        .any(|transaction| transaction.id == millis.to_string())
    {
        millis += 1;
    }

    millis.to_string()
}
