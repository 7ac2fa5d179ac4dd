//! Open Account Handler
//!
//! Creates a new account aggregate from scratch; fails if the target id
//! already has an event history.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::aggregate::{Account, Aggregate};
use crate::domain::OperationContext;
use crate::error::AppError;
use crate::event_store::EventStore;
use crate::projection::ProjectionService;

use super::{OpenAccountCommand, OpenAccountResult};

/// Handler for opening accounts
pub struct OpenAccountHandler {
    event_store: EventStore,
    projections: ProjectionService,
}

impl OpenAccountHandler {
    pub fn new(event_store: EventStore, projections: ProjectionService) -> Self {
        Self {
            event_store,
            projections,
        }
    }

    /// Execute the open-account command
    pub fn execute(
        &self,
        command: OpenAccountCommand,
        context: &OperationContext,
    ) -> Result<OpenAccountResult, AppError> {
        let initial_balance = Decimal::from_str(&command.initial_balance)
            .map_err(|e| AppError::InvalidRequest(format!("Invalid initial balance: {e}")))?;

        // Creation must target a fresh stream.
        if !self.event_store.load(command.account_id).is_empty() {
            return Err(AppError::AccountAlreadyExists(command.account_id));
        }

        let mut account = Account::open(command.account_id, command.owner_id, initial_balance)?;

        let stored =
            self.event_store
                .append(command.account_id, 0, account.take_pending(), context)?;
        self.projections.apply_all(&stored);

        tracing::info!(
            account_id = %command.account_id,
            owner_id = %command.owner_id,
            balance = %account.balance(),
            "Account opened"
        );

        Ok(OpenAccountResult {
            account_id: command.account_id,
            owner_id: command.owner_id,
            balance: account.balance().value(),
            version: account.version(),
        })
    }
}
