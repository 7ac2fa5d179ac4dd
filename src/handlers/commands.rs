//! Command definitions
//!
//! Commands represent intentions to change the system state.
//! Amounts travel as strings so callers control decimal precision exactly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Command to open a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccountCommand {
    pub account_id: Uuid,
    pub owner_id: Uuid,
    /// Initial balance (as string for precise decimal)
    pub initial_balance: String,
}

impl OpenAccountCommand {
    pub fn new(account_id: Uuid, owner_id: Uuid, initial_balance: impl Into<String>) -> Self {
        Self {
            account_id,
            owner_id,
            initial_balance: initial_balance.into(),
        }
    }
}

/// Command to deposit money into an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositCommand {
    pub account_id: Uuid,
    /// Amount to deposit (as string for precise decimal)
    pub amount: String,
}

impl DepositCommand {
    pub fn new(account_id: Uuid, amount: impl Into<String>) -> Self {
        Self {
            account_id,
            amount: amount.into(),
        }
    }
}

/// Command to withdraw money from an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawCommand {
    pub account_id: Uuid,
    /// Amount to withdraw (as string for precise decimal)
    pub amount: String,
}

impl WithdrawCommand {
    pub fn new(account_id: Uuid, amount: impl Into<String>) -> Self {
        Self {
            account_id,
            amount: amount.into(),
        }
    }
}

/// Command to close an account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseAccountCommand {
    pub account_id: Uuid,
    pub reason: String,
}

impl CloseAccountCommand {
    pub fn new(account_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            account_id,
            reason: reason.into(),
        }
    }
}

/// Result of a successful account opening
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAccountResult {
    pub account_id: Uuid,
    pub owner_id: Uuid,
    pub balance: Decimal,
    pub version: i64,
}

/// Result of a successful deposit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepositResult {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub balance: Decimal,
    pub version: i64,
}

/// Result of a successful withdrawal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawResult {
    pub account_id: Uuid,
    pub amount: Decimal,
    pub balance: Decimal,
    pub version: i64,
}

/// Result of a successful account closure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseAccountResult {
    pub account_id: Uuid,
    pub version: i64,
}
