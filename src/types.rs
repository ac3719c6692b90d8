//! Core row types and errors for the transfer ledger

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A bank account row.
///
/// `balance` is held in the smallest currency unit and is only ever mutated
/// by a signed delta applied inside an open transaction scope. `owner` and
/// `currency` are opaque metadata to this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, stable identifier
    pub id: i64,
    /// Owner of the account
    pub owner: String,
    /// Current balance in the smallest currency unit
    pub balance: i64,
    /// Currency code
    pub currency: String,
    /// When the account was created
    pub created_at: NaiveDateTime,
}

/// One signed balance-affecting line item tied to one account.
///
/// Entries are an append-only audit log: never updated or deleted once
/// created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier
    pub id: i64,
    /// Account affected by this entry
    pub account_id: i64,
    /// Signed delta; negative on the source side of a transfer
    pub amount: i64,
    /// When the entry was created
    pub created_at: NaiveDateTime,
}

/// A completed transfer between two accounts. Immutable once created.
///
/// Every transfer is paired with exactly two entries whose amounts sum to
/// zero, created in the same transaction as the transfer itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier
    pub id: i64,
    /// Source account
    pub from_account_id: i64,
    /// Destination account
    pub to_account_id: i64,
    /// Transferred amount, always positive
    pub amount: i64,
    /// When the transfer was created
    pub created_at: NaiveDateTime,
}

/// Errors that can occur in the transfer core
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Account not found: {0}")]
    AccountNotFound(i64),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Transaction error: {0}")]
    Transaction(String),
    /// The unit of work failed and the subsequent rollback failed too.
    /// Both errors are kept so the rollback failure never masks the
    /// original one.
    #[error("transaction failed: {source_error}; rollback also failed: {rollback_error}")]
    RollbackFailed {
        source_error: Box<LedgerError>,
        rollback_error: Box<LedgerError>,
    },
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
