//! In-memory storage implementation for testing and development
//!
//! Unlike a plain map of rows, this backend models the transactional
//! behavior the transfer workflow relies on: every account row sits behind
//! its own async lock, held from the first balance update until commit or
//! rollback, which is the same blocking discipline a database row lock
//! gives. Created transfers and entries are staged privately and published
//! only on commit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use tokio::sync::{Mutex as RowLock, OwnedMutexGuard};

use crate::traits::*;
use crate::types::*;

/// In-memory storage backend with row-lock transaction semantics
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    accounts: RwLock<HashMap<i64, Arc<RowLock<Account>>>>,
    transfers: Mutex<Vec<Transfer>>,
    entries: Mutex<Vec<Entry>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    /// Create a new memory store instance
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                accounts: RwLock::new(HashMap::new()),
                transfers: Mutex::new(Vec::new()),
                entries: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
            }),
        }
    }

    /// Create an account row.
    ///
    /// Account creation belongs to the surrounding system, not the transfer
    /// core; this helper exists so tests and demos can seed pre-existing
    /// accounts.
    pub fn create_account(&self, owner: &str, balance: i64, currency: &str) -> Account {
        let account = Account {
            id: self.next_id(),
            owner: owner.to_string(),
            balance,
            currency: currency.to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.inner
            .accounts
            .write()
            .unwrap()
            .insert(account.id, Arc::new(RowLock::new(account.clone())));
        account
    }

    /// Read an account row.
    ///
    /// Waits for any in-flight transaction holding the account's row lock,
    /// so a read never observes a balance that could still be rolled back.
    pub async fn get_account(&self, account_id: i64) -> LedgerResult<Account> {
        let row = self.row(account_id)?;
        let guard = row.lock().await;
        Ok(guard.clone())
    }

    /// All committed transfers, in commit order
    pub fn transfers(&self) -> Vec<Transfer> {
        self.inner.transfers.lock().unwrap().clone()
    }

    /// All committed entries, in commit order
    pub fn entries(&self) -> Vec<Entry> {
        self.inner.entries.lock().unwrap().clone()
    }

    fn row(&self, account_id: i64) -> LedgerResult<Arc<RowLock<Account>>> {
        self.inner
            .accounts
            .read()
            .unwrap()
            .get(&account_id)
            .cloned()
            .ok_or(LedgerError::AccountNotFound(account_id))
    }

    fn next_id(&self) -> i64 {
        self.inner.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// An account row lock held by an open transaction, with enough state to
/// undo the transaction's balance changes
struct LockedRow {
    guard: OwnedMutexGuard<Account>,
    balance_before: i64,
}

/// One open transaction against a [`MemoryStore`].
///
/// Dropping an uncommitted transaction behaves as rollback: staged rows are
/// discarded, balances are restored, and all row locks are released. A
/// cancelled unit of work therefore leaves no partial state behind.
pub struct MemoryTx {
    store: MemoryStore,
    staged_transfers: Vec<Transfer>,
    staged_entries: Vec<Entry>,
    locked: Vec<LockedRow>,
    finished: bool,
}

impl MemoryTx {
    fn revert(&mut self) {
        for locked in &mut self.locked {
            locked.guard.balance = locked.balance_before;
        }
        self.staged_transfers.clear();
        self.staged_entries.clear();
    }
}

#[async_trait]
impl LedgerTx for MemoryTx {
    async fn create_transfer(&mut self, params: CreateTransferParams) -> LedgerResult<Transfer> {
        let transfer = Transfer {
            id: self.store.next_id(),
            from_account_id: params.from_account_id,
            to_account_id: params.to_account_id,
            amount: params.amount,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.staged_transfers.push(transfer.clone());
        Ok(transfer)
    }

    async fn create_entry(&mut self, params: CreateEntryParams) -> LedgerResult<Entry> {
        let entry = Entry {
            id: self.store.next_id(),
            account_id: params.account_id,
            amount: params.amount,
            created_at: chrono::Utc::now().naive_utc(),
        };
        self.staged_entries.push(entry.clone());
        Ok(entry)
    }

    async fn add_account_balance(&mut self, account_id: i64, delta: i64) -> LedgerResult<Account> {
        // This transaction may already hold the row lock; locking it again
        // would deadlock against ourselves.
        if let Some(locked) = self.locked.iter_mut().find(|l| l.guard.id == account_id) {
            locked.guard.balance += delta;
            return Ok(locked.guard.clone());
        }

        let row = self.store.row(account_id)?;
        let mut guard = row.lock_owned().await;
        let balance_before = guard.balance;
        guard.balance += delta;
        let updated = guard.clone();
        self.locked.push(LockedRow {
            guard,
            balance_before,
        });
        Ok(updated)
    }
}

#[async_trait]
impl TransactionScope for MemoryTx {
    async fn commit(mut self) -> LedgerResult<()> {
        self.store
            .inner
            .transfers
            .lock()
            .unwrap()
            .append(&mut self.staged_transfers);
        self.store
            .inner
            .entries
            .lock()
            .unwrap()
            .append(&mut self.staged_entries);
        self.finished = true;
        // Row locks release as `self` drops.
        Ok(())
    }

    async fn rollback(mut self) -> LedgerResult<()> {
        self.revert();
        self.finished = true;
        Ok(())
    }
}

impl Drop for MemoryTx {
    fn drop(&mut self) {
        if !self.finished {
            self.revert();
        }
    }
}

#[async_trait]
impl TransferStorage for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> LedgerResult<MemoryTx> {
        Ok(MemoryTx {
            store: self.clone(),
            staged_transfers: Vec::new(),
            staged_entries: Vec::new(),
            locked: Vec::new(),
            finished: false,
        })
    }
}
