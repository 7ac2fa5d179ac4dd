//! Account Summary projection
//!
//! Per-account summary view: running balance, active flag, activity
//! timestamps and a transaction counter. Built exclusively by folding events;
//! disposable and rebuildable from the full log at any time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountEvent, StoredEvent};

/// Denormalized summary of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_id: Uuid,
    pub owner_id: Uuid,
    pub balance: Decimal,
    pub active: bool,
    pub opened_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
    pub transaction_count: u64,
    /// Version of the last event folded into this summary
    pub last_version: i64,
}

/// Summary read view over all accounts.
///
/// Writes are version-gated: an event is folded only when its version is
/// exactly one past the last folded version, so duplicate or out-of-order
/// deliveries are ignored instead of corrupting the view.
#[derive(Debug, Default)]
pub struct AccountSummaryProjection {
    accounts: HashMap<Uuid, AccountSummary>,
}

impl AccountSummaryProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one stored event into the view.
    pub fn apply(&mut self, event: &StoredEvent) {
        let occurred_at = event.payload.occurred_at();
        match &event.payload {
            AccountEvent::AccountOpened {
                account_id,
                owner_id,
                initial_balance,
                ..
            } => {
                if event.version != 1 || self.accounts.contains_key(account_id) {
                    tracing::warn!(
                        account_id = %account_id,
                        version = event.version,
                        "Ignoring out-of-order AccountOpened"
                    );
                    return;
                }
                self.accounts.insert(
                    *account_id,
                    AccountSummary {
                        account_id: *account_id,
                        owner_id: *owner_id,
                        balance: *initial_balance,
                        active: true,
                        opened_at: occurred_at,
                        last_activity_at: occurred_at,
                        transaction_count: 1,
                        last_version: 1,
                    },
                );
            }

            AccountEvent::MoneyCredited {
                account_id,
                balance_after,
                ..
            }
            | AccountEvent::MoneyDebited {
                account_id,
                balance_after,
                ..
            } => {
                if let Some(summary) = self.gated(*account_id, event.version) {
                    summary.balance = *balance_after;
                    summary.last_activity_at = occurred_at;
                    summary.transaction_count += 1;
                    summary.last_version = event.version;
                }
            }

            AccountEvent::AccountClosed { account_id, .. } => {
                if let Some(summary) = self.gated(*account_id, event.version) {
                    summary.active = false;
                    summary.last_activity_at = occurred_at;
                    summary.last_version = event.version;
                }
            }
        }
    }

    /// Look up the summary for a mutation event, enforcing the version gate.
    fn gated(&mut self, account_id: Uuid, version: i64) -> Option<&mut AccountSummary> {
        match self.accounts.get_mut(&account_id) {
            Some(summary) if version == summary.last_version + 1 => Some(summary),
            Some(summary) => {
                tracing::warn!(
                    account_id = %account_id,
                    version,
                    last_version = summary.last_version,
                    "Ignoring out-of-order event"
                );
                None
            }
            None => {
                tracing::warn!(
                    account_id = %account_id,
                    version,
                    "Ignoring event for unknown account"
                );
                None
            }
        }
    }

    /// Summary for one account, if any events for it were seen
    pub fn get(&self, account_id: Uuid) -> Option<&AccountSummary> {
        self.accounts.get(&account_id)
    }

    /// Number of accounts in the view
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Discard all derived state
    pub fn reset(&mut self) {
        self.accounts.clear();
    }
}
