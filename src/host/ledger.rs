//! Value Transfer
//!
//! The host's transfer primitive. A transfer either credits the full amount
//! or fails; a failure aborts the enclosing call.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::core::address::Address;

/// Transfer failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// Recipient refused the funds.
    #[error("recipient {0} rejected the transfer")]
    Rejected(Address),

    /// Payer cannot cover the amount.
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds {
        /// Amount requested.
        needed: u64,
        /// Amount held.
        available: u64,
    },

    /// Credit would overflow the recipient's balance.
    #[error("balance overflow")]
    Overflow,
}

/// Atomic, non-reentrant credit of funds held by the escrow.
pub trait ValueTransfer {
    /// Pay `amount` out of escrow to `to`.
    fn transfer(&mut self, to: Address, amount: u64) -> Result<(), TransferError>;
}

// =============================================================================
// IN-MEMORY LEDGER
// =============================================================================

/// Balance book for accounts plus the escrow's own holdings.
#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    balances: BTreeMap<Address, u64>,
    escrow: u64,
    rejecting: BTreeSet<Address>,
}

impl MemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit an account from outside the system.
    pub fn fund(&mut self, account: Address, amount: u64) {
        let balance = self.balances.entry(account).or_insert(0);
        *balance = balance.saturating_add(amount);
    }

    /// Balance of an account.
    pub fn balance(&self, account: &Address) -> u64 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Funds currently held in escrow.
    pub fn escrow_balance(&self) -> u64 {
        self.escrow
    }

    /// Make every transfer to `account` fail.
    pub fn reject_transfers_to(&mut self, account: Address) {
        self.rejecting.insert(account);
    }

    /// Accept transfers to `account` again.
    pub fn accept_transfers_to(&mut self, account: &Address) {
        self.rejecting.remove(account);
    }

    /// Move a call's attached value from the payer into escrow.
    pub fn deposit(&mut self, payer: Address, amount: u64) -> Result<(), TransferError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.balance(&payer);
        if available < amount {
            return Err(TransferError::InsufficientFunds { needed: amount, available });
        }
        let escrow = self.escrow.checked_add(amount).ok_or(TransferError::Overflow)?;
        self.balances.insert(payer, available - amount);
        self.escrow = escrow;
        Ok(())
    }
}

impl ValueTransfer for MemoryLedger {
    fn transfer(&mut self, to: Address, amount: u64) -> Result<(), TransferError> {
        if self.rejecting.contains(&to) {
            return Err(TransferError::Rejected(to));
        }
        if self.escrow < amount {
            return Err(TransferError::InsufficientFunds {
                needed: amount,
                available: self.escrow,
            });
        }
        let credited = self.balance(&to).checked_add(amount).ok_or(TransferError::Overflow)?;
        self.escrow -= amount;
        self.balances.insert(to, credited);
        debug!("Transferred {} to {}", amount, to.short());
        Ok(())
    }
}
