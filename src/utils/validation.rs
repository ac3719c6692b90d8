//! Validation utilities

use crate::ledger::transfer::TransferTxParams;
use crate::types::*;

/// Validate that a transfer amount is positive
pub fn validate_amount(amount: i64) -> LedgerResult<()> {
    if amount <= 0 {
        Err(LedgerError::Validation(format!(
            "Transfer amount must be positive, got {amount}"
        )))
    } else {
        Ok(())
    }
}

/// Validate that an account id refers to a persisted row
pub fn validate_account_id(account_id: i64) -> LedgerResult<()> {
    if account_id <= 0 {
        Err(LedgerError::Validation(format!(
            "Account id must be positive, got {account_id}"
        )))
    } else {
        Ok(())
    }
}

/// Validate that source and destination accounts differ
pub fn validate_distinct_accounts(from_account_id: i64, to_account_id: i64) -> LedgerResult<()> {
    if from_account_id == to_account_id {
        Err(LedgerError::Validation(format!(
            "Cannot transfer from account {from_account_id} to itself"
        )))
    } else {
        Ok(())
    }
}

/// Validate transfer parameters before any transaction is opened
pub fn validate_transfer_params(params: &TransferTxParams) -> LedgerResult<()> {
    validate_amount(params.amount)?;
    validate_account_id(params.from_account_id)?;
    validate_account_id(params.to_account_id)?;
    validate_distinct_accounts(params.from_account_id, params.to_account_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_amounts() {
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(-30).is_err());
        assert!(validate_amount(1).is_ok());
    }

    #[test]
    fn rejects_identical_accounts() {
        assert!(validate_distinct_accounts(5, 5).is_err());
        assert!(validate_distinct_accounts(5, 6).is_ok());
    }

    #[test]
    fn rejects_malformed_params() {
        let params = TransferTxParams {
            from_account_id: 1,
            to_account_id: 1,
            amount: 10,
        };
        assert!(matches!(
            validate_transfer_params(&params),
            Err(LedgerError::Validation(_))
        ));

        let params = TransferTxParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: 0,
        };
        assert!(matches!(
            validate_transfer_params(&params),
            Err(LedgerError::Validation(_))
        ));

        let params = TransferTxParams {
            from_account_id: 1,
            to_account_id: 2,
            amount: 10,
        };
        assert!(validate_transfer_params(&params).is_ok());
    }
}
