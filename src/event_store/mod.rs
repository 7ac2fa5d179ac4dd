//! Event Store module
//!
//! Append-only persistence for event sequences, keyed by aggregate id.

mod error;
mod repository;

pub use error::EventStoreError;
pub use repository::EventStore;
