//! Audit Trail
//!
//! Flattens the global event log into audit records for inspection and
//! export. The event store is the single source of truth; this module only
//! reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregate::{Account, Aggregate};
use crate::domain::AccountEvent;
use crate::event_store::{EventStore, EventStoreError};

/// One audit record, derived from a stored event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub event_id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: Uuid,
    /// Dotted action name, e.g. "account.credited"
    pub action: String,
    pub version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initiated_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,
    pub recorded_at: DateTime<Utc>,
}

fn action_name(event: &AccountEvent) -> &'static str {
    match event {
        AccountEvent::AccountOpened { .. } => "account.opened",
        AccountEvent::MoneyCredited { .. } => "account.credited",
        AccountEvent::MoneyDebited { .. } => "account.debited",
        AccountEvent::AccountClosed { .. } => "account.closed",
    }
}

/// Audit reader over the full event log
#[derive(Debug, Clone)]
pub struct AuditTrail {
    event_store: EventStore,
}

impl AuditTrail {
    pub fn new(event_store: EventStore) -> Self {
        Self { event_store }
    }

    /// Every audit entry across all aggregates, ordered by timestamp
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.event_store
            .all_events()
            .into_iter()
            .map(|stored| AuditEntry {
                event_id: stored.id,
                aggregate_type: Account::aggregate_type().to_string(),
                aggregate_id: stored.aggregate_id,
                action: action_name(&stored.payload).to_string(),
                version: stored.version,
                initiated_by: stored.context.initiated_by.clone(),
                correlation_id: stored.context.correlation_id,
                recorded_at: stored.recorded_at,
            })
            .collect()
    }

    /// Audit entries for one aggregate, in version order
    pub fn entries_for(&self, aggregate_id: Uuid) -> Vec<AuditEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Export the full trail as pretty-printed JSON
    pub fn export_json(&self) -> Result<String, EventStoreError> {
        Ok(serde_json::to_string_pretty(&self.entries())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OperationContext;
    use rust_decimal_macros::dec;

    #[test]
    fn test_audit_entries_and_export() {
        let store = EventStore::new();
        let account_id = Uuid::new_v4();
        let context = OperationContext::new().with_initiator("auditor");

        store
            .append(
                account_id,
                0,
                vec![
                    AccountEvent::AccountOpened {
                        account_id,
                        owner_id: Uuid::new_v4(),
                        initial_balance: dec!(10),
                        opened_at: Utc::now(),
                    },
                    AccountEvent::MoneyCredited {
                        account_id,
                        amount: dec!(5),
                        balance_after: dec!(15),
                        credited_at: Utc::now(),
                    },
                ],
                &context,
            )
            .unwrap();

        let trail = AuditTrail::new(store);
        let entries = trail.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "account.opened");
        assert_eq!(entries[0].aggregate_type, "Account");
        assert_eq!(entries[1].action, "account.credited");
        assert_eq!(entries[0].initiated_by.as_deref(), Some("auditor"));

        let json = trail.export_json().unwrap();
        assert!(json.contains("account.credited"));
    }

    #[test]
    fn test_entries_for_filters_by_aggregate() {
        let store = EventStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let context = OperationContext::new();

        for id in [a, b] {
            store
                .append(
                    id,
                    0,
                    vec![AccountEvent::AccountOpened {
                        account_id: id,
                        owner_id: Uuid::new_v4(),
                        initial_balance: dec!(0),
                        opened_at: Utc::now(),
                    }],
                    &context,
                )
                .unwrap();
        }

        let trail = AuditTrail::new(store);
        assert_eq!(trail.entries().len(), 2);
        assert_eq!(trail.entries_for(a).len(), 1);
        assert_eq!(trail.entries_for(a)[0].aggregate_id, a);
    }
}
