//! bankfold - In-memory event-sourced account ledger
//!
//! Runs the full account lifecycle once against the in-memory store:
//! open, deposit, withdraw, the expected failures, closure, and a
//! from-scratch projection rebuild.

use uuid::Uuid;

use bankfold::audit::AuditTrail;
use bankfold::event_store::EventStore;
use bankfold::handlers::{
    CloseAccountCommand, CloseAccountHandler, DepositCommand, DepositHandler, OpenAccountCommand,
    OpenAccountHandler, WithdrawCommand, WithdrawHandler,
};
use bankfold::projection::ProjectionService;
use bankfold::query::AccountQueries;
use bankfold::{Config, OperationContext};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
fn init_tracing(json: bool) {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "bankfold=debug".into()),
    );

    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.log_json);

    tracing::info!(environment = %config.environment, "Starting bankfold demo");

    let event_store = EventStore::new();
    let projections = ProjectionService::new();

    let open = OpenAccountHandler::new(event_store.clone(), projections.clone());
    let deposit = DepositHandler::new(event_store.clone(), projections.clone());
    let withdraw = WithdrawHandler::new(event_store.clone(), projections.clone());
    let close = CloseAccountHandler::new(event_store.clone(), projections.clone());
    let queries = AccountQueries::new(projections.clone());

    let mut context = OperationContext::new().with_initiator("demo");
    context.ensure_correlation_id();

    let account_id = Uuid::new_v4();
    let owner_id = Uuid::new_v4();

    // Happy path: open, deposit, withdraw.
    open.execute(
        OpenAccountCommand::new(
            account_id,
            owner_id,
            config.demo_initial_balance.to_string(),
        ),
        &context,
    )?;
    deposit.execute(DepositCommand::new(account_id, "500"), &context)?;
    withdraw.execute(WithdrawCommand::new(account_id, "200"), &context)?;

    let summary = queries
        .summary(account_id)
        .ok_or_else(|| anyhow::anyhow!("summary view missing freshly opened account"))?;
    tracing::info!(
        balance = %summary.balance,
        transactions = summary.transaction_count,
        version = summary.last_version,
        "Account summary after deposits and withdrawal"
    );
    for record in queries.transactions(account_id) {
        tracing::info!(
            kind = ?record.kind,
            amount = %record.amount,
            balance_after = %record.balance_after,
            "Transaction"
        );
    }

    // Expected business failures: both leave the store untouched.
    if let Err(e) = withdraw.execute(WithdrawCommand::new(account_id, "5000"), &context) {
        tracing::warn!("Withdrawal rejected as expected: {e}");
    }
    if let Err(e) = close.execute(
        CloseAccountCommand::new(account_id, "moving banks"),
        &context,
    ) {
        tracing::warn!("Closure rejected as expected: {e}");
    }

    // Zero out the balance, then closure succeeds.
    let balance = queries
        .balance(account_id)
        .ok_or_else(|| anyhow::anyhow!("balance view missing account"))?;
    withdraw.execute(WithdrawCommand::new(account_id, balance.to_string()), &context)?;
    close.execute(
        CloseAccountCommand::new(account_id, "moving banks"),
        &context,
    )?;

    if let Err(e) = deposit.execute(DepositCommand::new(account_id, "1"), &context) {
        tracing::warn!("Deposit on closed account rejected as expected: {e}");
    }

    // Projections are disposable: rebuild from the full log and compare.
    let before = queries.summary(account_id);
    projections.rebuild_from(&event_store);
    let after = queries.summary(account_id);
    tracing::info!(
        consistent = before == after,
        events = event_store.event_count(),
        "Projection rebuild from event log"
    );

    let trail = AuditTrail::new(event_store);
    println!("{}", trail.export_json()?);

    Ok(())
}
