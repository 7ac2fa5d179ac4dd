//! Deposit Handler
//!
//! Load prior events, replay, credit, then append only the new events.
//! The aggregate is rebuilt fresh on every command, so the store never
//! receives an event derived from stale or partially-applied state.

use crate::aggregate::{Account, Aggregate};
use crate::domain::{Amount, OperationContext};
use crate::error::AppError;
use crate::event_store::EventStore;
use crate::projection::ProjectionService;

use super::{DepositCommand, DepositResult};

/// Handler for deposits
pub struct DepositHandler {
    event_store: EventStore,
    projections: ProjectionService,
}

impl DepositHandler {
    pub fn new(event_store: EventStore, projections: ProjectionService) -> Self {
        Self {
            event_store,
            projections,
        }
    }

    /// Execute the deposit command
    pub fn execute(
        &self,
        command: DepositCommand,
        context: &OperationContext,
    ) -> Result<DepositResult, AppError> {
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

        account.credit(&amount)?;

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
            "Deposit completed"
        );

        Ok(DepositResult {
            account_id: command.account_id,
            amount: amount.value(),
            balance: account.balance().value(),
            version: account.version(),
        })
    }
}
