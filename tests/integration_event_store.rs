//! Integration tests for the Event Store

use bankfold::aggregate::{Account, Aggregate};
use bankfold::domain::{AccountEvent, Amount, OperationContext};
use bankfold::event_store::{EventStore, EventStoreError};
use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

mod common;

#[test]
fn test_event_store_append_and_load() {
    let event_store = EventStore::new();
    let account_id = Uuid::new_v4();
    let context = OperationContext::new().with_correlation_id(Uuid::new_v4());

    let event = AccountEvent::AccountOpened {
        account_id,
        owner_id: Uuid::new_v4(),
        initial_balance: dec!(1000),
        opened_at: Utc::now(),
    };

    let stored = event_store
        .append(account_id, 0, vec![event], &context)
        .unwrap();
    assert_eq!(stored.len(), 1);

    let events = event_store.load(account_id);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type(), "AccountOpened");
    assert_eq!(events[0].version, 1);
    assert_eq!(events[0].context.correlation_id, context.correlation_id);
}

#[test]
fn test_event_store_concurrency_conflict() {
    let event_store = EventStore::new();
    let account_id = Uuid::new_v4();
    let context = OperationContext::new();

    let opened = AccountEvent::AccountOpened {
        account_id,
        owner_id: Uuid::new_v4(),
        initial_balance: dec!(0),
        opened_at: Utc::now(),
    };
    event_store
        .append(account_id, 0, vec![opened], &context)
        .unwrap();

    // Two commands loaded the same history; the second append is stale.
    let closed = AccountEvent::AccountClosed {
        account_id,
        reason: "stale writer".to_string(),
        closed_at: Utc::now(),
    };
    let result = event_store.append(account_id, 0, vec![closed], &context);

    assert!(matches!(
        result,
        Err(EventStoreError::ConcurrencyConflict { .. })
    ));
    assert_eq!(event_store.load(account_id).len(), 1);
}

#[test]
fn test_full_command_history_replays_to_same_state() {
    let app = common::setup();
    let account_id = Uuid::new_v4();

    app.open
        .execute(
            bankfold::handlers::OpenAccountCommand::new(account_id, Uuid::new_v4(), "100"),
            &app.context,
        )
        .unwrap();
    for amount in ["40", "10.50"] {
        app.deposit
            .execute(
                bankfold::handlers::DepositCommand::new(account_id, amount),
                &app.context,
            )
            .unwrap();
    }
    app.withdraw
        .execute(
            bankfold::handlers::WithdrawCommand::new(account_id, "25.25"),
            &app.context,
        )
        .unwrap();

    // Replay the stored history from scratch: balance must equal
    // initial + credits - debits, versions must be exactly 1..N.
    let history = app.event_store.load(account_id);
    let versions: Vec<i64> = history.iter().map(|e| e.version).collect();
    assert_eq!(versions, vec![1, 2, 3, 4]);

    let account = Account::replay(&history).unwrap();
    assert_eq!(account.balance().value(), dec!(125.25));
    assert_eq!(account.version(), 4);
    assert!(account.is_active());

    // And a second replay is deterministic.
    let again = Account::replay(&history).unwrap();
    assert_eq!(again.balance().value(), account.balance().value());
    assert_eq!(again.version(), account.version());
}

#[test]
fn test_all_events_spans_aggregates_in_order() {
    let app = common::setup();
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();

    app.open
        .execute(
            bankfold::handlers::OpenAccountCommand::new(a, Uuid::new_v4(), "10"),
            &app.context,
        )
        .unwrap();
    app.open
        .execute(
            bankfold::handlers::OpenAccountCommand::new(b, Uuid::new_v4(), "20"),
            &app.context,
        )
        .unwrap();
    app.deposit
        .execute(
            bankfold::handlers::DepositCommand::new(a, "5"),
            &app.context,
        )
        .unwrap();

    let all = app.event_store.all_events();
    assert_eq!(all.len(), 3);
    let aggregates: Vec<Uuid> = all.iter().map(|e| e.aggregate_id).collect();
    assert_eq!(aggregates, vec![a, b, a]);
    assert!(all.windows(2).all(|w| w[0].sequence < w[1].sequence));
}

#[test]
fn test_failed_append_is_not_partial() {
    let event_store = EventStore::new();
    let account_id = Uuid::new_v4();
    let context = OperationContext::new();

    // Conflict on a batch of two: neither event may land.
    let mut account = Account::open(account_id, Uuid::new_v4(), dec!(100)).unwrap();
    account.credit(&Amount::new(dec!(1)).unwrap()).unwrap();

    let result = event_store.append(account_id, 5, account.take_pending(), &context);
    assert!(matches!(
        result,
        Err(EventStoreError::ConcurrencyConflict { .. })
    ));
    assert!(event_store.load(account_id).is_empty());
    assert_eq!(event_store.event_count(), 0);
}
