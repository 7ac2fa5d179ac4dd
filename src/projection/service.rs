//! Projection Service
//!
//! Owns the read-model views and feeds them events.
//! This is the query side of CQRS: reads hit these views, never the store.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::StoredEvent;
use crate::event_store::EventStore;

use super::history::{TransactionHistoryProjection, TransactionRecord};
use super::summary::{AccountSummary, AccountSummaryProjection};

#[derive(Debug, Default)]
struct Views {
    summaries: AccountSummaryProjection,
    history: TransactionHistoryProjection,
}

/// Projection Service owning every read view.
///
/// Each view owns its own derived map; the only communication with the write
/// side is the stored events themselves. Cheap to clone; clones share views.
#[derive(Debug, Clone, Default)]
pub struct ProjectionService {
    inner: Arc<Mutex<Views>>,
}

impl ProjectionService {
    /// Create a new ProjectionService with empty views
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one stored event into every view
    pub fn apply_event(&self, event: &StoredEvent) {
        let mut views = self.inner.lock().expect("projection lock poisoned");
        views.summaries.apply(event);
        views.history.apply(event);

        tracing::debug!(
            aggregate_id = %event.aggregate_id,
            event_type = event.event_type(),
            version = event.version,
            "Projection updated"
        );
    }

    /// Fold a batch of stored events, in order
    pub fn apply_all(&self, events: &[StoredEvent]) {
        for event in events {
            self.apply_event(event);
        }
    }

    /// Discard all derived state and re-fold the full event log.
    ///
    /// Projections are disposable: this produces exactly the state incremental
    /// application would have, for any valid log.
    pub fn rebuild_from(&self, store: &EventStore) {
        let events = store.all_events();
        {
            let mut views = self.inner.lock().expect("projection lock poisoned");
            views.summaries.reset();
            views.history.reset();
        }

        tracing::info!(count = events.len(), "Rebuilding projections from event log");
        self.apply_all(&events);
    }

    /// Summary for one account
    pub fn summary(&self, account_id: Uuid) -> Option<AccountSummary> {
        let views = self.inner.lock().expect("projection lock poisoned");
        views.summaries.get(account_id).cloned()
    }

    /// Current balance for one account, if known
    pub fn balance(&self, account_id: Uuid) -> Option<Decimal> {
        self.summary(account_id).map(|s| s.balance)
    }

    /// Derived transactions for one account, oldest first
    pub fn transactions(&self, account_id: Uuid) -> Vec<TransactionRecord> {
        let views = self.inner.lock().expect("projection lock poisoned");
        views.history.get(account_id).to_vec()
    }

    /// Number of accounts the summary view has seen
    pub fn account_count(&self) -> usize {
        let views = self.inner.lock().expect("projection lock poisoned");
        views.summaries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountEvent, OperationContext};
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn test_incremental_equals_rebuilt() {
        let store = EventStore::new();
        let context = OperationContext::new();
        let account_id = Uuid::new_v4();

        let events = vec![
            AccountEvent::AccountOpened {
                account_id,
                owner_id: Uuid::new_v4(),
                initial_balance: dec!(1000),
                opened_at: Utc::now(),
            },
            AccountEvent::MoneyCredited {
                account_id,
                amount: dec!(500),
                balance_after: dec!(1500),
                credited_at: Utc::now(),
            },
        ];
        let stored = store.append(account_id, 0, events, &context).unwrap();

        // Incrementally built views.
        let incremental = ProjectionService::new();
        incremental.apply_all(&stored);

        // From-scratch rebuild of a separate service.
        let rebuilt = ProjectionService::new();
        rebuilt.rebuild_from(&store);

        assert_eq!(
            incremental.summary(account_id),
            rebuilt.summary(account_id)
        );
        assert_eq!(
            incremental.transactions(account_id),
            rebuilt.transactions(account_id)
        );
    }

    #[test]
    fn test_queries_on_unknown_account() {
        let service = ProjectionService::new();
        let id = Uuid::new_v4();
        assert!(service.summary(id).is_none());
        assert!(service.balance(id).is_none());
        assert!(service.transactions(id).is_empty());
        assert_eq!(service.account_count(), 0);
    }
}
