//! Query module
//!
//! Read-only facade over the projections. Queries never touch the event
//! store; every answer comes from a derived view.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::projection::{AccountSummary, ProjectionService, TransactionRecord};

/// Read-side entry point for account queries
#[derive(Debug, Clone)]
pub struct AccountQueries {
    projections: ProjectionService,
}

impl AccountQueries {
    pub fn new(projections: ProjectionService) -> Self {
        Self { projections }
    }

    /// Full summary for one account
    pub fn summary(&self, account_id: Uuid) -> Option<AccountSummary> {
        self.projections.summary(account_id)
    }

    /// Current balance, if the account is known
    pub fn balance(&self, account_id: Uuid) -> Option<Decimal> {
        self.projections.balance(account_id)
    }

    /// Whether the account is known and active
    pub fn is_active(&self, account_id: Uuid) -> bool {
        self.projections
            .summary(account_id)
            .map(|s| s.active)
            .unwrap_or(false)
    }

    /// Derived transactions for one account, oldest first
    pub fn transactions(&self, account_id: Uuid) -> Vec<TransactionRecord> {
        self.projections.transactions(account_id)
    }

    /// Number of transactions folded for one account
    pub fn transaction_count(&self, account_id: Uuid) -> u64 {
        self.projections
            .summary(account_id)
            .map(|s| s.transaction_count)
            .unwrap_or(0)
    }
}
