//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use rust_decimal::Decimal;
use thiserror::Error;

/// Business-rule violations and domain invariant failures.
///
/// Insufficient funds is a separate variant rather than a generic invalid
/// state: it is a normal, expected business outcome callers must handle.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Invalid amount (zero, negative, too precise, or exceeds limit)
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Account cannot be opened with a negative initial balance
    #[error("Invalid initial balance: {0}")]
    InvalidInitialBalance(Decimal),

    /// Operation attempted on a closed account
    #[error("Account is closed")]
    AccountClosed,

    /// Debit exceeds the current balance
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    /// Account cannot be closed while it still holds funds
    #[error("Cannot close account with non-zero balance ({balance})")]
    BalanceNotZero { balance: Decimal },

    /// Replay was given an empty event sequence
    #[error("Cannot replay an empty event history")]
    EmptyHistory,

    /// Replay history does not start with an AccountOpened event
    #[error("Event history does not start with AccountOpened (got {0})")]
    HistoryNotOpenedFirst(&'static str),

    /// Replay history has non-contiguous version numbers
    #[error("Event history has a version gap: expected {expected}, found {found}")]
    VersionGap { expected: i64, found: i64 },
}

impl From<super::AmountError> for DomainError {
    fn from(err: super::AmountError) -> Self {
        DomainError::InvalidAmount(err.to_string())
    }
}

impl DomainError {
    /// Check if this is a client error (caller's fault, not corruption)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAmount(_)
                | Self::InvalidInitialBalance(_)
                | Self::AccountClosed
                | Self::InsufficientFunds { .. }
                | Self::BalanceNotZero { .. }
        )
    }

    /// Check if this error indicates a corrupt or malformed event history
    pub fn is_history_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyHistory | Self::HistoryNotOpenedFirst(_) | Self::VersionGap { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_error() {
        let err = DomainError::InsufficientFunds {
            requested: Decimal::new(100, 0),
            available: Decimal::new(50, 0),
        };

        assert!(err.is_client_error());
        assert!(!err.is_history_error());
        assert!(err.to_string().contains("100"));
        assert!(err.to_string().contains("50"));
    }

    #[test]
    fn test_version_gap_error() {
        let err = DomainError::VersionGap {
            expected: 3,
            found: 5,
        };

        assert!(!err.is_client_error());
        assert!(err.is_history_error());
    }

    #[test]
    fn test_amount_error_conversion() {
        let err: DomainError = super::super::AmountError::NotPositive(Decimal::ZERO).into();
        assert!(matches!(err, DomainError::InvalidAmount(_)));
    }
}
