//! Transaction History projection
//!
//! Per-account append-only list of derived transaction records. Like the
//! summary view, writes are version-gated so replays out of order or twice
//! cannot duplicate records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{AccountEvent, StoredEvent};

/// Kind of a derived transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Initial funding at account opening
    Opened,
    Credit,
    Debit,
}

/// One derived transaction, as queries see it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance_after: Decimal,
    pub recorded_at: DateTime<Utc>,
    pub version: i64,
}

#[derive(Debug, Default)]
struct AccountHistory {
    records: Vec<TransactionRecord>,
    last_version: i64,
}

/// Transaction history read view over all accounts.
#[derive(Debug, Default)]
pub struct TransactionHistoryProjection {
    histories: HashMap<Uuid, AccountHistory>,
}

impl TransactionHistoryProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one stored event into the view.
    ///
    /// `AccountClosed` produces no record but still advances the version gate,
    /// so the view stays aligned with the stream it consumed.
    pub fn apply(&mut self, event: &StoredEvent) {
        let account_id = event.payload.account_id();

        let history = self.histories.entry(account_id).or_default();
        if event.version != history.last_version + 1 {
            tracing::warn!(
                account_id = %account_id,
                version = event.version,
                last_version = history.last_version,
                "Ignoring out-of-order event"
            );
            // An entry created by this stray lookup stays at version 0 and is
            // harmless: the gate only ever admits a version-1 open next.
            return;
        }

        let occurred_at = event.payload.occurred_at();
        let record = match &event.payload {
            AccountEvent::AccountOpened {
                initial_balance, ..
            } => Some(TransactionRecord {
                kind: TransactionKind::Opened,
                amount: *initial_balance,
                balance_after: *initial_balance,
                recorded_at: occurred_at,
                version: event.version,
            }),

            AccountEvent::MoneyCredited {
                amount,
                balance_after,
                ..
            } => Some(TransactionRecord {
                kind: TransactionKind::Credit,
                amount: *amount,
                balance_after: *balance_after,
                recorded_at: occurred_at,
                version: event.version,
            }),

            AccountEvent::MoneyDebited {
                amount,
                balance_after,
                ..
            } => Some(TransactionRecord {
                kind: TransactionKind::Debit,
                amount: *amount,
                balance_after: *balance_after,
                recorded_at: occurred_at,
                version: event.version,
            }),

            AccountEvent::AccountClosed { .. } => None,
        };

        if let Some(record) = record {
            history.records.push(record);
        }
        history.last_version = event.version;
    }

    /// Derived transactions for one account, oldest first
    pub fn get(&self, account_id: Uuid) -> &[TransactionRecord] {
        self.histories
            .get(&account_id)
            .map(|h| h.records.as_slice())
            .unwrap_or(&[])
    }

    /// Discard all derived state
    pub fn reset(&mut self) {
        self.histories.clear();
    }
}
