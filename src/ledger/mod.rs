//! Ledger module containing the transaction scope manager and the transfer
//! workflow

pub mod core;
pub mod transfer;

pub use self::core::*;
pub use self::transfer::*;
