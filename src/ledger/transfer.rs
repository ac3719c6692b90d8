//! Money transfer workflow with deadlock-safe balance updates

use serde::{Deserialize, Serialize};

use crate::ledger::core::Store;
use crate::traits::*;
use crate::types::*;
use crate::utils::validation::validate_transfer_params;

/// Input parameters of the transfer transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxParams {
    /// Source account
    pub from_account_id: i64,
    /// Destination account
    pub to_account_id: i64,
    /// Amount to move, in the smallest currency unit; must be positive
    pub amount: i64,
}

impl TransferTxParams {
    /// Map the public parameters to the row-creation shape.
    ///
    /// The two structs only happen to line up field-for-field today; the
    /// mapping is spelled out so schema evolution on either side cannot
    /// silently reorder values.
    fn to_create_transfer(self) -> CreateTransferParams {
        CreateTransferParams {
            from_account_id: self.from_account_id,
            to_account_id: self.to_account_id,
            amount: self.amount,
        }
    }
}

/// Result of a completed transfer transaction: the transfer row, both
/// entries, and both post-update accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferTxResult {
    pub transfer: Transfer,
    pub from_account: Account,
    pub to_account: Account,
    pub from_entry: Entry,
    pub to_entry: Entry,
}

impl<S: TransferStorage> Store<S> {
    /// Move `amount` from one account to another.
    ///
    /// Creates the transfer record, two offsetting entries, and updates both
    /// account balances inside a single transaction: either every write
    /// commits or none does. Parameters are validated before the transaction
    /// is opened.
    pub async fn transfer_tx(&self, params: TransferTxParams) -> LedgerResult<TransferTxResult> {
        validate_transfer_params(&params)?;

        tracing::debug!(
            from_account_id = params.from_account_id,
            to_account_id = params.to_account_id,
            amount = params.amount,
            "starting transfer"
        );

        self.exec_tx(move |tx: &mut S::Tx| {
            Box::pin(async move {
                let transfer = tx.create_transfer(params.to_create_transfer()).await?;

                let from_entry = tx
                    .create_entry(CreateEntryParams {
                        account_id: params.from_account_id,
                        amount: -params.amount,
                    })
                    .await?;

                let to_entry = tx
                    .create_entry(CreateEntryParams {
                        account_id: params.to_account_id,
                        amount: params.amount,
                    })
                    .await?;

                // Always touch the lower account id first. Row locks are then
                // taken in one global order across all concurrent transfers,
                // so no lock-wait cycle can form.
                let (from_account, to_account) = if params.from_account_id < params.to_account_id {
                    add_money(
                        tx,
                        params.from_account_id,
                        -params.amount,
                        params.to_account_id,
                        params.amount,
                    )
                    .await?
                } else {
                    let (to_account, from_account) = add_money(
                        tx,
                        params.to_account_id,
                        params.amount,
                        params.from_account_id,
                        -params.amount,
                    )
                    .await?;
                    (from_account, to_account)
                };

                Ok(TransferTxResult {
                    transfer,
                    from_account,
                    to_account,
                    from_entry,
                    to_entry,
                })
            })
        })
        .await
    }
}

/// Apply two balance deltas in the given order, returning the updated rows
/// in that same order
async fn add_money<T: LedgerTx>(
    tx: &mut T,
    account_id1: i64,
    amount1: i64,
    account_id2: i64,
    amount2: i64,
) -> LedgerResult<(Account, Account)> {
    let account1 = tx.add_account_balance(account_id1, amount1).await?;
    let account2 = tx.add_account_balance(account_id2, amount2).await?;
    Ok((account1, account2))
}
