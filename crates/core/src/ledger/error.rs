//! Ledger error types.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// A debit would drive the balance negative.
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        /// The debit amount requested.
        requested: Decimal,
        /// The balance available at check time.
        available: Decimal,
    },

    /// Entry amounts must be strictly positive.
    #[error("Entry amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// Wallet not found.
    #[error("Wallet {0} not found")]
    WalletNotFound(Uuid),

    /// Wallet transaction not found.
    #[error("Wallet transaction {0} not found")]
    TransactionNotFound(Uuid),

    /// The stored entry kind could not be interpreted.
    #[error("Unknown entry kind: {0}")]
    UnknownEntryKind(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InsufficientBalance { .. } => 422,
            Self::NonPositiveAmount(_) => 400,
            Self::WalletNotFound(_) | Self::TransactionNotFound(_) => 404,
            Self::UnknownEntryKind(_) | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::NonPositiveAmount(_) => "NON_POSITIVE_AMOUNT",
            Self::WalletNotFound(_) => "WALLET_NOT_FOUND",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::UnknownEntryKind(_) => "UNKNOWN_ENTRY_KIND",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_insufficient_balance_error() {
        let err = LedgerError::InsufficientBalance {
            requested: dec!(400000),
            available: dec!(300000),
        };
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");
        assert!(err.to_string().contains("400000"));
        assert!(err.to_string().contains("300000"));
    }

    #[test]
    fn test_non_positive_amount_error() {
        let err = LedgerError::NonPositiveAmount(dec!(-5));
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "NON_POSITIVE_AMOUNT");
    }

    #[test]
    fn test_not_found_errors() {
        use uuid::Uuid;
        assert_eq!(LedgerError::WalletNotFound(Uuid::nil()).status_code(), 404);
        assert_eq!(
            LedgerError::TransactionNotFound(Uuid::nil()).error_code(),
            "TRANSACTION_NOT_FOUND"
        );
    }
}
