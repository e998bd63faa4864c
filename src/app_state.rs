//! Implements a struct that holds the state of the server.

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::Mutex;

use crate::{repository::TransactionRepository, store::TransactionStore};

/// The transaction repository as it is shared between request handlers.
///
/// The async lock serializes mutating operations, so two concurrent edits
/// apply one after the other instead of racing on the stored blob.
pub type SharedRepository<S> = Arc<Mutex<TransactionRepository<S>>>;

/// The state of the server.
pub struct AppState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// The repository owning the transaction collection.
    pub repository: SharedRepository<S>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl<S> AppState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// Create a new [AppState] around `store`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name,
    /// e.g. "Asia/Kolkata".
    pub fn new(store: S, local_timezone: &str) -> Self {
        Self {
            repository: Arc::new(Mutex::new(TransactionRepository::new(store))),
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl<S> Clone for AppState<S>
where
    S: TransactionStore + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            local_timezone: self.local_timezone.clone(),
        }
    }
}

/// The state needed for pages that only resolve "today" in the local timezone.
#[derive(Debug, Clone)]
pub struct TimezoneState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl<S> FromRef<AppState<S>> for TimezoneState
where
    S: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The state needed for pages that only read the transaction collection.
pub struct RepositoryState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// The repository owning the transaction collection.
    pub repository: SharedRepository<S>,
}

impl<S> FromRef<AppState<S>> for RepositoryState<S>
where
    S: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            repository: Arc::clone(&state.repository),
        }
    }
}

impl<S> Clone for RepositoryState<S>
where
    S: TransactionStore + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// The state needed for pages that also resolve "today" in the local timezone.
pub struct LocalizedRepositoryState<S>
where
    S: TransactionStore + Send + Sync,
{
    /// The repository owning the transaction collection.
    pub repository: SharedRepository<S>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl<S> FromRef<AppState<S>> for LocalizedRepositoryState<S>
where
    S: TransactionStore + Send + Sync,
{
    fn from_ref(state: &AppState<S>) -> Self {
        Self {
            repository: Arc::clone(&state.repository),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl<S> Clone for LocalizedRepositoryState<S>
where
    S: TransactionStore + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            local_timezone: self.local_timezone.clone(),
        }
    }
}
