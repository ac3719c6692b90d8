//! Transaction scope management for ledger workflows

use std::future::Future;
use std::pin::Pin;

use crate::traits::*;
use crate::types::*;

/// Boxed future returned by a transactional unit of work
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = LedgerResult<T>> + Send + 'a>>;

/// Transaction orchestrator for the transfer core.
///
/// Constructed once per process around a storage backend and shared by
/// reference between callers; it holds no mutable state of its own, all
/// concurrency is resolved by the backend's transaction isolation.
pub struct Store<S: TransferStorage> {
    storage: S,
}

impl<S: TransferStorage> Store<S> {
    /// Create a new store around a storage backend
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Execute a unit of work inside a single transaction.
    ///
    /// Opens a transaction, hands the scoped [`LedgerTx`] to the unit of
    /// work, then commits if the work succeeded or rolls back if it failed.
    /// A commit failure becomes the operation's result. A rollback failure
    /// is combined with the work's error into
    /// [`LedgerError::RollbackFailed`] so neither is lost.
    ///
    /// Scopes do not nest: a unit of work must not call back into
    /// `exec_tx` on the same store.
    pub async fn exec_tx<T, F>(&self, work: F) -> LedgerResult<T>
    where
        T: Send,
        F: for<'a> FnOnce(&'a mut S::Tx) -> TxFuture<'a, T> + Send,
    {
        let mut tx = self.storage.begin().await?;

        match work(&mut tx).await {
            Ok(value) => {
                tx.commit().await?;
                Ok(value)
            }
            Err(err) => match tx.rollback().await {
                Ok(()) => Err(err),
                Err(rollback_error) => {
                    tracing::warn!(error = %rollback_error, "rollback failed after aborted unit of work");
                    Err(LedgerError::RollbackFailed {
                        source_error: Box::new(err),
                        rollback_error: Box::new(rollback_error),
                    })
                }
            },
        }
    }
}
