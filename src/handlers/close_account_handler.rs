//! Close Account Handler
//!
//! Closure requires a zeroed balance; a closed account never reopens.

use crate::aggregate::{Account, Aggregate};
use crate::domain::OperationContext;
use crate::error::AppError;
use crate::event_store::EventStore;
use crate::projection::ProjectionService;

use super::{CloseAccountCommand, CloseAccountResult};

/// Handler for account closures
pub struct CloseAccountHandler {
    event_store: EventStore,
    projections: ProjectionService,
}

impl CloseAccountHandler {
    pub fn new(event_store: EventStore, projections: ProjectionService) -> Self {
        Self {
            event_store,
            projections,
        }
    }

    /// Execute the close-account command
    pub fn execute(
        &self,
        command: CloseAccountCommand,
        context: &OperationContext,
    ) -> Result<CloseAccountResult, AppError> {
        let history = self.event_store.load(command.account_id);
        if history.is_empty() {
            return Err(AppError::AccountNotFound(command.account_id));
        }

        let mut account = Account::replay(&history)?;
        let expected_version = account.version();

        account.close(command.reason)?;

        let stored = self.event_store.append(
            command.account_id,
            expected_version,
            account.take_pending(),
            context,
        )?;
        self.projections.apply_all(&stored);

        tracing::info!(
            account_id = %command.account_id,
            "Account closed"
        );

        Ok(CloseAccountResult {
            account_id: command.account_id,
            version: account.version(),
        })
    }
}
