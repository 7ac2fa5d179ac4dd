//! Shared test harness: a fully wired in-memory application.

use bankfold::event_store::EventStore;
use bankfold::handlers::{
    CloseAccountHandler, DepositHandler, OpenAccountHandler, WithdrawHandler,
};
use bankfold::projection::ProjectionService;
use bankfold::query::AccountQueries;
use bankfold::OperationContext;

pub struct TestApp {
    pub event_store: EventStore,
    pub projections: ProjectionService,
    pub open: OpenAccountHandler,
    pub deposit: DepositHandler,
    pub withdraw: WithdrawHandler,
    pub close: CloseAccountHandler,
    pub queries: AccountQueries,
    pub context: OperationContext,
}

/// Wire up a fresh store, projections, and every handler.
pub fn setup() -> TestApp {
    let event_store = EventStore::new();
    let projections = ProjectionService::new();

    TestApp {
        open: OpenAccountHandler::new(event_store.clone(), projections.clone()),
        deposit: DepositHandler::new(event_store.clone(), projections.clone()),
        withdraw: WithdrawHandler::new(event_store.clone(), projections.clone()),
        close: CloseAccountHandler::new(event_store.clone(), projections.clone()),
        queries: AccountQueries::new(projections.clone()),
        event_store,
        projections,
        context: OperationContext::new().with_initiator("integration-tests"),
    }
}
