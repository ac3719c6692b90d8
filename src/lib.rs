//! # Transfer Core
//!
//! The atomic money-transfer core of a double-entry ledger: moving an amount
//! between two accounts while recording an immutable audit trail and keeping
//! balances consistent under concurrent access.
//!
//! ## Features
//!
//! - **Double-entry transfers**: every transfer produces two offsetting
//!   entries whose amounts sum to zero
//! - **Scoped transactions**: units of work run with guaranteed all-or-nothing
//!   commit/rollback, including on cancellation
//! - **Deadlock avoidance**: balance updates always lock account rows in
//!   identifier order, so concurrent transfers over the same pair of accounts
//!   can never form a lock-wait cycle
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   storage; an in-memory backend ships for testing and development
//!
//! ## Quick Start
//!
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> transfer_core::LedgerResult<()> {
//! use transfer_core::utils::MemoryStore;
//! use transfer_core::{Store, TransferTxParams};
//!
//! let backend = MemoryStore::new();
//! let alice = backend.create_account("alice", 100, "USD");
//! let bob = backend.create_account("bob", 50, "USD");
//!
//! let store = Store::new(backend.clone());
//! let result = store
//!     .transfer_tx(TransferTxParams {
//!         from_account_id: alice.id,
//!         to_account_id: bob.id,
//!         amount: 30,
//!     })
//!     .await?;
//!
//! assert_eq!(result.from_account.balance, 70);
//! assert_eq!(result.to_account.balance, 80);
//! # Ok(())
//! # }
//! ```

pub mod ledger;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use ledger::*;
pub use traits::*;
pub use types::*;
