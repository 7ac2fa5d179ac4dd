//! bankfold Library
//!
//! In-memory event-sourced account ledger with CQRS projections.
//! Commands are validated by the Account aggregate, persisted as events in an
//! append-only store, and folded into disposable read views.

pub mod aggregate;
pub mod audit;
pub mod config;
pub mod domain;
pub mod event_store;
pub mod handlers;
pub mod projection;
pub mod query;

mod error;

pub use config::Config;
pub use domain::{AccountEvent, Amount, AmountError, Balance, DomainError, OperationContext, StoredEvent};
pub use error::{AppError, AppResult};
