//! Account Aggregate
//!
//! Account is the transactional consistency boundary of the ledger.
//! State is derived entirely from the event history; every mutating operation
//! validates against current state, emits exactly one event into a transient
//! pending buffer, and applies it to in-memory state in the same call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{AccountEvent, Amount, Balance, DomainError, StoredEvent};

use super::Aggregate;

/// Account Aggregate
///
/// Reconstructed fresh from the stored event sequence on every command,
/// mutated only in memory, then discarded; its only durable trace is the
/// events drained from the pending buffer.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID
    id: Uuid,

    /// Owner user ID
    owner_id: Uuid,

    /// Current balance (derived from events)
    balance: Balance,

    /// Whether the account is active; a closed account never reopens
    active: bool,

    /// Current version (version of the last applied event)
    version: i64,

    /// When the account was opened
    opened_at: Option<DateTime<Utc>>,

    /// Events produced by the current command, not yet persisted
    pending: Vec<AccountEvent>,
}

impl Default for Account {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            owner_id: Uuid::nil(),
            balance: Balance::zero(),
            active: false,
            version: 0,
            opened_at: None,
            pending: Vec::new(),
        }
    }
}

impl Account {
    /// Open a new account with an initial balance.
    ///
    /// Produces a single `AccountOpened` event at version 1.
    ///
    /// # Errors
    /// - `DomainError::InvalidInitialBalance` if the initial balance is negative
    /// - `DomainError::InvalidAmount` if it exceeds the balance limits
    pub fn open(
        account_id: Uuid,
        owner_id: Uuid,
        initial_balance: Decimal,
    ) -> Result<Self, DomainError> {
        if initial_balance < Decimal::ZERO {
            return Err(DomainError::InvalidInitialBalance(initial_balance));
        }

        // Enforces the scale and magnitude limits as well.
        let balance = Balance::new(initial_balance)?;

        let event = AccountEvent::AccountOpened {
            account_id,
            owner_id,
            initial_balance: balance.value(),
            opened_at: Utc::now(),
        };

        let mut account = Account::default().apply(&event);
        account.pending.push(event);
        Ok(account)
    }

    /// Credit (deposit) money to the account.
    ///
    /// # Errors
    /// - `DomainError::AccountClosed` if the account is not active
    /// - `DomainError::InvalidAmount` if the new balance would exceed the limit
    pub fn credit(&mut self, amount: &Amount) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::AccountClosed);
        }

        let new_balance = self.balance.credit(amount)?;

        let event = AccountEvent::MoneyCredited {
            account_id: self.id,
            amount: amount.value(),
            balance_after: new_balance.value(),
            credited_at: Utc::now(),
        };

        self.record(event);
        Ok(())
    }

    /// Debit (withdraw) money from the account.
    ///
    /// # Errors
    /// - `DomainError::AccountClosed` if the account is not active
    /// - `DomainError::InsufficientFunds` if the amount exceeds the balance
    pub fn debit(&mut self, amount: &Amount) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::AccountClosed);
        }

        if !self.balance.is_sufficient_for(amount) {
            return Err(DomainError::InsufficientFunds {
                requested: amount.value(),
                available: self.balance.value(),
            });
        }

        let new_balance = self.balance.debit(amount)?;

        let event = AccountEvent::MoneyDebited {
            account_id: self.id,
            amount: amount.value(),
            balance_after: new_balance.value(),
            debited_at: Utc::now(),
        };

        self.record(event);
        Ok(())
    }

    /// Close the account.
    ///
    /// # Errors
    /// - `DomainError::AccountClosed` if already closed
    /// - `DomainError::BalanceNotZero` if the account still holds funds
    pub fn close(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        if !self.active {
            return Err(DomainError::AccountClosed);
        }

        if !self.balance.is_zero() {
            return Err(DomainError::BalanceNotZero {
                balance: self.balance.value(),
            });
        }

        let event = AccountEvent::AccountClosed {
            account_id: self.id,
            reason: reason.into(),
            closed_at: Utc::now(),
        };

        self.record(event);
        Ok(())
    }

    /// Rebuild an account by replaying its stored event history in order.
    ///
    /// This is the sole mechanism for loading aggregate state; there is no
    /// separately persisted "current state".
    ///
    /// # Errors
    /// - `DomainError::EmptyHistory` if `events` is empty
    /// - `DomainError::HistoryNotOpenedFirst` if the first event is not
    ///   `AccountOpened`
    /// - `DomainError::VersionGap` if version numbers are not exactly `1..N`
    pub fn replay(events: &[StoredEvent]) -> Result<Self, DomainError> {
        let first = events.first().ok_or(DomainError::EmptyHistory)?;

        if !matches!(first.payload, AccountEvent::AccountOpened { .. }) {
            return Err(DomainError::HistoryNotOpenedFirst(first.event_type()));
        }

        let mut account = Account::default();
        for (idx, stored) in events.iter().enumerate() {
            let expected = idx as i64 + 1;
            if stored.version != expected {
                return Err(DomainError::VersionGap {
                    expected,
                    found: stored.version,
                });
            }
            account = account.apply(&stored.payload);
        }

        Ok(account)
    }

    /// Apply an event and push it onto the pending buffer in one step.
    fn record(&mut self, event: AccountEvent) {
        *self = std::mem::take(self).apply(&event);
        self.pending.push(event);
    }

    /// Drain the not-yet-persisted events produced by the current command.
    pub fn take_pending(&mut self) -> Vec<AccountEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Events produced by the current command, in order.
    pub fn pending_events(&self) -> &[AccountEvent] {
        &self.pending
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn opened_at(&self) -> Option<DateTime<Utc>> {
        self.opened_at
    }
}

impl Aggregate for Account {
    type Event = AccountEvent;

    fn aggregate_type() -> &'static str {
        "Account"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(mut self, event: &Self::Event) -> Self {
        match event {
            AccountEvent::AccountOpened {
                account_id,
                owner_id,
                initial_balance,
                opened_at,
            } => {
                self.id = *account_id;
                self.owner_id = *owner_id;
                self.active = true;
                self.opened_at = Some(*opened_at);
                match Balance::new(*initial_balance) {
                    Ok(balance) => self.balance = balance,
                    Err(e) => {
                        tracing::error!(
                            account_id = %self.id,
                            "Invalid initial balance in AccountOpened event: {e}"
                        );
                    }
                }
            }

            AccountEvent::MoneyCredited { amount, .. } => {
                // Replayed events are trusted but not blindly: an amount the
                // balance cannot absorb leaves state unchanged.
                match Amount::new(*amount).and_then(|amt| self.balance.credit(&amt)) {
                    Ok(new_balance) => self.balance = new_balance,
                    Err(e) => {
                        tracing::error!(
                            account_id = %self.id,
                            "Skipping invalid MoneyCredited during replay: {e}"
                        );
                    }
                }
            }

            AccountEvent::MoneyDebited { amount, .. } => {
                match Amount::new(*amount).and_then(|amt| self.balance.debit(&amt)) {
                    Ok(new_balance) => self.balance = new_balance,
                    Err(e) => {
                        tracing::error!(
                            account_id = %self.id,
                            "Skipping invalid MoneyDebited during replay: {e}"
                        );
                    }
                }
            }

            AccountEvent::AccountClosed { .. } => {
                self.active = false;
            }
        }

        self.version += 1;
        self
    }
}
