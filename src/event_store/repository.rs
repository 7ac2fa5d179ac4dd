//! Event Store Repository
//!
//! In-memory implementation of the Event Store pattern: an append-only,
//! per-aggregate-id log of events with optimistic concurrency control.
//!
//! The store does not enforce business invariants; it guarantees ordering and
//! version assignment and trusts the aggregate layer for validity.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{AccountEvent, OperationContext, StoredEvent};

use super::EventStoreError;

#[derive(Debug, Default)]
struct StoreInner {
    /// Canonical event sequence per aggregate id, in append order
    streams: HashMap<Uuid, Vec<StoredEvent>>,

    /// Global insertion counter, used to break timestamp ties in `all_events`
    sequence: u64,
}

/// Append-only event store, keyed by aggregate id.
///
/// Cheap to clone; clones share the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl EventStore {
    /// Create a new, empty EventStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Append events to the end of an aggregate's sequence.
    ///
    /// The store assigns event ids, versions `expected_version + 1..` and
    /// timestamps, preserving the order of `events`. The caller's
    /// `expected_version` is compared against the stream's current version; a
    /// mismatch means another command appended since the caller loaded, and
    /// the append is rejected without storing anything.
    ///
    /// Returns the enveloped events as stored.
    ///
    /// # Errors
    /// - `EventStoreError::ConcurrencyConflict` on version mismatch
    pub fn append(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: Vec<AccountEvent>,
        context: &OperationContext,
    ) -> Result<Vec<StoredEvent>, EventStoreError> {
        let mut inner = self.inner.lock().expect("event store lock poisoned");

        let current_version = inner
            .streams
            .get(&aggregate_id)
            .and_then(|s| s.last())
            .map(|e| e.version)
            .unwrap_or(0);

        if current_version != expected_version {
            return Err(EventStoreError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual: current_version,
            });
        }

        let base_sequence = inner.sequence;
        inner.sequence += events.len() as u64;

        let now = Utc::now();
        let stream = inner.streams.entry(aggregate_id).or_default();
        let mut appended = Vec::with_capacity(events.len());
        for (idx, payload) in events.into_iter().enumerate() {
            let stored = StoredEvent {
                id: Uuid::new_v4(),
                aggregate_id,
                version: expected_version + idx as i64 + 1,
                sequence: base_sequence + idx as u64,
                payload,
                context: context.clone(),
                recorded_at: now,
            };
            stream.push(stored.clone());
            appended.push(stored);
        }

        tracing::debug!(
            aggregate_id = %aggregate_id,
            count = appended.len(),
            new_version = appended.last().map(|e| e.version).unwrap_or(expected_version),
            "Events appended"
        );

        Ok(appended)
    }

    /// Load the full ordered event sequence for an aggregate id.
    ///
    /// Returns an empty vector for an unknown id.
    pub fn load(&self, aggregate_id: Uuid) -> Vec<StoredEvent> {
        let inner = self.inner.lock().expect("event store lock poisoned");
        inner
            .streams
            .get(&aggregate_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Current version of an aggregate's stream (0 if unknown).
    pub fn current_version(&self, aggregate_id: Uuid) -> i64 {
        let inner = self.inner.lock().expect("event store lock poisoned");
        inner
            .streams
            .get(&aggregate_id)
            .and_then(|s| s.last())
            .map(|e| e.version)
            .unwrap_or(0)
    }

    /// Every event across all aggregates, ordered by timestamp.
    ///
    /// Insertion sequence breaks timestamp ties, so the ordering is total and
    /// stable. Used for global audit and projection rebuilds.
    pub fn all_events(&self) -> Vec<StoredEvent> {
        let inner = self.inner.lock().expect("event store lock poisoned");
        let mut events: Vec<StoredEvent> =
            inner.streams.values().flatten().cloned().collect();
        events.sort_by(|a, b| {
            a.recorded_at
                .cmp(&b.recorded_at)
                .then(a.sequence.cmp(&b.sequence))
        });
        events
    }

    /// Total number of stored events across all aggregates.
    pub fn event_count(&self) -> usize {
        let inner = self.inner.lock().expect("event store lock poisoned");
        inner.streams.values().map(Vec::len).sum()
    }
}
