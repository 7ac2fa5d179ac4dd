//! Command Handlers module
//!
//! CQRS command handlers that orchestrate business operations.
//! Each handler coordinates the aggregate, event store, and projections.

mod close_account_handler;
mod commands;
mod deposit_handler;
mod open_account_handler;
mod withdraw_handler;

#[cfg(test)]
mod tests;

pub use close_account_handler::CloseAccountHandler;
pub use commands::*;
pub use deposit_handler::DepositHandler;
pub use open_account_handler::OpenAccountHandler;
pub use withdraw_handler::WithdrawHandler;
