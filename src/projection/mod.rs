//! Projection module
//!
//! Read-model views derived by folding events, and the service that owns them.
//! Projections are disposable and rebuildable from the full event log.

mod history;
mod service;
mod summary;

pub use history::{TransactionHistoryProjection, TransactionKind, TransactionRecord};
pub use service::ProjectionService;
pub use summary::{AccountSummary, AccountSummaryProjection};
