//! Domain Events
//!
//! Event definitions for Event Sourcing.
//! Events are immutable facts that have happened in the system; the event
//! stream is the sole durable representation of account state.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OperationContext;

/// Account-related events
///
/// This is a closed set: every consumer (aggregate replay, each projection)
/// matches on it exhaustively, so adding a variant is a compile-time-checked
/// decision point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccountEvent {
    /// Account was opened with an initial balance
    AccountOpened {
        account_id: Uuid,
        owner_id: Uuid,
        initial_balance: Decimal,
        opened_at: DateTime<Utc>,
    },

    /// Money was credited to the account (balance increased)
    MoneyCredited {
        account_id: Uuid,
        amount: Decimal,
        balance_after: Decimal,
        credited_at: DateTime<Utc>,
    },

    /// Money was debited from the account (balance decreased)
    MoneyDebited {
        account_id: Uuid,
        amount: Decimal,
        balance_after: Decimal,
        debited_at: DateTime<Utc>,
    },

    /// Account was closed; a closed account never becomes active again
    AccountClosed {
        account_id: Uuid,
        reason: String,
        closed_at: DateTime<Utc>,
    },
}

impl AccountEvent {
    /// Get the event type as a string
    pub fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountOpened { .. } => "AccountOpened",
            AccountEvent::MoneyCredited { .. } => "MoneyCredited",
            AccountEvent::MoneyDebited { .. } => "MoneyDebited",
            AccountEvent::AccountClosed { .. } => "AccountClosed",
        }
    }

    /// Get the account ID this event relates to
    pub fn account_id(&self) -> Uuid {
        match self {
            AccountEvent::AccountOpened { account_id, .. } => *account_id,
            AccountEvent::MoneyCredited { account_id, .. } => *account_id,
            AccountEvent::MoneyDebited { account_id, .. } => *account_id,
            AccountEvent::AccountClosed { account_id, .. } => *account_id,
        }
    }

    /// Get the timestamp carried inside the event payload
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            AccountEvent::AccountOpened { opened_at, .. } => *opened_at,
            AccountEvent::MoneyCredited { credited_at, .. } => *credited_at,
            AccountEvent::MoneyDebited { debited_at, .. } => *debited_at,
            AccountEvent::AccountClosed { closed_at, .. } => *closed_at,
        }
    }
}

/// A persisted event, as the event store hands it back.
///
/// The envelope carries everything the store assigns at append time: the event
/// id, the per-aggregate version (1-based, gapless) and the global insertion
/// sequence used to break timestamp ties in `all_events` ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub id: Uuid,
    pub aggregate_id: Uuid,
    pub version: i64,
    pub sequence: u64,
    pub payload: AccountEvent,
    pub context: OperationContext,
    pub recorded_at: DateTime<Utc>,
}

impl StoredEvent {
    /// Event type of the wrapped payload
    pub fn event_type(&self) -> &'static str {
        self.payload.event_type()
    }
}
