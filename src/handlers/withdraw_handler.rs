//! Withdraw Handler
//!
//! Same load-replay-mutate-append protocol as deposits; insufficient funds
//! surfaces as its own error with nothing appended to the store.

use crate::aggregate::{Account, Aggregate};
use crate::domain::{Amount, OperationContext};
use crate::error::AppError;
use crate::event_store::EventStore;
use crate::projection::ProjectionService;

use super::{WithdrawCommand, WithdrawResult};

/// Handler for withdrawals
pub struct WithdrawHandler {
    event_store: EventStore,
    projections: ProjectionService,
}

impl WithdrawHandler {
    pub fn new(event_store: EventStore, projections: ProjectionService) -> Self {
        Self {
            event_store,
            projections,
        }
    }

    /// Execute the withdraw command
    pub fn execute(
        &self,
        command: WithdrawCommand,
        context: &OperationContext,
    ) -> Result<WithdrawResult, AppError> {
        let amount: Amount = command
            .amount
            .parse()
            .map_err(|e| AppError::InvalidRequest(format!("Invalid amount: {e}")))?;

        let history = self.event_store.load(command.account_id);
        if history.is_empty() {
            return Err(AppError::AccountNotFound(command.account_id));
        }

        let mut account = Account::replay(&history)?;
        let expected_version = account.version();

        account.debit(&amount)?;

        let stored = self.event_store.append(
            command.account_id,
            expected_version,
            account.take_pending(),
            context,
        )?;
        self.projections.apply_all(&stored);

        tracing::info!(
            account_id = %command.account_id,
            amount = %amount,
            balance = %account.balance(),
            "Withdrawal completed"
        );

        Ok(WithdrawResult {
            account_id: command.account_id,
            amount: amount.value(),
            balance: account.balance().value(),
            version: account.version(),
        })
    }
}
