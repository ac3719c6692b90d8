//! Traits for storage abstraction and transaction scoping
//!
//! The transfer workflow never talks to a database directly; it runs against
//! the [`LedgerTx`] port, bound to one open transaction by the storage
//! backend. Any backend (PostgreSQL, MySQL, SQLite, in-memory, etc.) can
//! plug in by implementing [`TransferStorage`].

use async_trait::async_trait;

use crate::types::*;

/// Parameters for creating a transfer row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTransferParams {
    pub from_account_id: i64,
    pub to_account_id: i64,
    pub amount: i64,
}

/// Parameters for creating an entry row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateEntryParams {
    pub account_id: i64,
    pub amount: i64,
}

/// Row-level ledger operations bound to one open transaction.
///
/// All writes performed through this port become visible only when the
/// surrounding scope commits; none survive a rollback.
#[async_trait]
pub trait LedgerTx: Send {
    /// Create a transfer record
    async fn create_transfer(&mut self, params: CreateTransferParams) -> LedgerResult<Transfer>;

    /// Create an entry record
    async fn create_entry(&mut self, params: CreateEntryParams) -> LedgerResult<Entry>;

    /// Apply a signed delta to an account balance and return the updated row.
    ///
    /// Blocks while another in-flight transaction holds the account's row
    /// lock, until that transaction commits or rolls back.
    async fn add_account_balance(&mut self, account_id: i64, delta: i64) -> LedgerResult<Account>;
}

/// An open transaction: the ledger operations plus a terminal commit or
/// rollback. Both consume the scope, so it ends exactly once.
#[async_trait]
pub trait TransactionScope: LedgerTx + Sized {
    /// Commit the transaction, publishing all writes
    async fn commit(self) -> LedgerResult<()>;

    /// Roll back the transaction, discarding all writes
    async fn rollback(self) -> LedgerResult<()>;
}

/// A storage backend capable of opening transactions.
///
/// Implementations own the underlying connection handling; the transfer
/// core only ever asks them to begin a new scope.
#[async_trait]
pub trait TransferStorage: Send + Sync {
    /// Transaction type handed to units of work
    type Tx: TransactionScope + Send;

    /// Begin a new transaction
    async fn begin(&self) -> LedgerResult<Self::Tx>;
}
