//! Cross-handler unit tests

use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::domain::{DomainError, OperationContext};
use crate::error::AppError;
use crate::event_store::EventStore;
use crate::projection::ProjectionService;

use super::*;

struct Fixture {
    event_store: EventStore,
    projections: ProjectionService,
    open: OpenAccountHandler,
    deposit: DepositHandler,
    withdraw: WithdrawHandler,
    close: CloseAccountHandler,
    context: OperationContext,
}

impl Fixture {
    fn new() -> Self {
        let event_store = EventStore::new();
        let projections = ProjectionService::new();
        Self {
            open: OpenAccountHandler::new(event_store.clone(), projections.clone()),
            deposit: DepositHandler::new(event_store.clone(), projections.clone()),
            withdraw: WithdrawHandler::new(event_store.clone(), projections.clone()),
            close: CloseAccountHandler::new(event_store.clone(), projections.clone()),
            event_store,
            projections,
            context: OperationContext::new().with_initiator("tests"),
        }
    }
}

#[test]
fn test_open_then_deposit_then_withdraw() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();

    let opened = fx
        .open
        .execute(
            OpenAccountCommand::new(account_id, Uuid::new_v4(), "1000"),
            &fx.context,
        )
        .unwrap();
    assert_eq!(opened.balance, dec!(1000));
    assert_eq!(opened.version, 1);

    let deposited = fx
        .deposit
        .execute(DepositCommand::new(account_id, "500"), &fx.context)
        .unwrap();
    assert_eq!(deposited.balance, dec!(1500));
    assert_eq!(deposited.version, 2);

    let withdrawn = fx
        .withdraw
        .execute(WithdrawCommand::new(account_id, "200"), &fx.context)
        .unwrap();
    assert_eq!(withdrawn.balance, dec!(1300));
    assert_eq!(withdrawn.version, 3);

    assert_eq!(fx.event_store.load(account_id).len(), 3);
    let summary = fx.projections.summary(account_id).unwrap();
    assert_eq!(summary.balance, dec!(1300));
    assert_eq!(summary.transaction_count, 3);
}

#[test]
fn test_open_existing_account_rejected() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();

    fx.open
        .execute(
            OpenAccountCommand::new(account_id, Uuid::new_v4(), "0"),
            &fx.context,
        )
        .unwrap();

    let result = fx.open.execute(
        OpenAccountCommand::new(account_id, Uuid::new_v4(), "0"),
        &fx.context,
    );
    assert!(matches!(result, Err(AppError::AccountAlreadyExists(id)) if id == account_id));
    assert_eq!(fx.event_store.load(account_id).len(), 1);
}

#[test]
fn test_open_negative_balance_stores_nothing() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();

    let result = fx.open.execute(
        OpenAccountCommand::new(account_id, Uuid::new_v4(), "-10"),
        &fx.context,
    );
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::InvalidInitialBalance(_)))
    ));
    assert!(fx.event_store.load(account_id).is_empty());
    assert!(fx.projections.summary(account_id).is_none());
}

#[test]
fn test_open_sub_cent_balance_stores_nothing() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();

    let result = fx.open.execute(
        OpenAccountCommand::new(account_id, Uuid::new_v4(), "0.125"),
        &fx.context,
    );
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::InvalidAmount(_)))
    ));
    assert!(fx.event_store.load(account_id).is_empty());
}

#[test]
fn test_mutations_on_unknown_account() {
    let fx = Fixture::new();
    let unknown = Uuid::new_v4();

    assert!(matches!(
        fx.deposit
            .execute(DepositCommand::new(unknown, "10"), &fx.context),
        Err(AppError::AccountNotFound(_))
    ));
    assert!(matches!(
        fx.withdraw
            .execute(WithdrawCommand::new(unknown, "10"), &fx.context),
        Err(AppError::AccountNotFound(_))
    ));
    assert!(matches!(
        fx.close
            .execute(CloseAccountCommand::new(unknown, "unused"), &fx.context),
        Err(AppError::AccountNotFound(_))
    ));
}

#[test]
fn test_deposit_rejects_bad_amounts() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();
    fx.open
        .execute(
            OpenAccountCommand::new(account_id, Uuid::new_v4(), "100"),
            &fx.context,
        )
        .unwrap();

    for bad in ["0", "-5", "abc"] {
        let result = fx
            .deposit
            .execute(DepositCommand::new(account_id, bad), &fx.context);
        assert!(
            matches!(result, Err(AppError::InvalidRequest(_))),
            "amount {bad:?} should be rejected"
        );
    }
    assert_eq!(fx.event_store.load(account_id).len(), 1);
}

#[test]
fn test_withdraw_insufficient_funds_appends_nothing() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();
    fx.open
        .execute(
            OpenAccountCommand::new(account_id, Uuid::new_v4(), "1300"),
            &fx.context,
        )
        .unwrap();

    let result = fx
        .withdraw
        .execute(WithdrawCommand::new(account_id, "5000"), &fx.context);
    match result {
        Err(AppError::Domain(DomainError::InsufficientFunds {
            requested,
            available,
        })) => {
            assert_eq!(requested, dec!(5000));
            assert_eq!(available, dec!(1300));
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }

    assert_eq!(fx.event_store.load(account_id).len(), 1);
    assert_eq!(fx.projections.balance(account_id), Some(dec!(1300)));
}

#[test]
fn test_close_lifecycle() {
    let fx = Fixture::new();
    let account_id = Uuid::new_v4();
    fx.open
        .execute(
            OpenAccountCommand::new(account_id, Uuid::new_v4(), "1300"),
            &fx.context,
        )
        .unwrap();

    // Close with funds still on the account is rejected.
    let result = fx
        .close
        .execute(CloseAccountCommand::new(account_id, "moving banks"), &fx.context);
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::BalanceNotZero { .. }))
    ));

    // Zero out, then close succeeds.
    fx.withdraw
        .execute(WithdrawCommand::new(account_id, "1300"), &fx.context)
        .unwrap();
    let closed = fx
        .close
        .execute(CloseAccountCommand::new(account_id, "moving banks"), &fx.context)
        .unwrap();
    assert_eq!(closed.version, 3);

    let summary = fx.projections.summary(account_id).unwrap();
    assert!(!summary.active);

    // A closed account rejects further deposits.
    let result = fx
        .deposit
        .execute(DepositCommand::new(account_id, "1"), &fx.context);
    assert!(matches!(
        result,
        Err(AppError::Domain(DomainError::AccountClosed))
    ));
}
