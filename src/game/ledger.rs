//! Virtual Balance Ledger
//!
//! Funds owed to players, decoupled from the external transfer that
//! eventually pays them out.
//!
//! Every unit the engine has received is in exactly one place:
//!
//! ```text
//!   total_received - total_paid_out == Σ balance + Σ locked
//! ```
//!
//! `balance` is withdrawable. `locked` is escrowed in open game slots.
//! Since the right-hand side never exceeds `total_received`, credits
//! cannot overflow while the invariant holds.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::hash::CommitHasher;
use crate::core::identity::PlayerId;
use crate::game::error::EngineError;

/// Per-player balances plus conservation counters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// Withdrawable balance per player. Entries are never removed.
    balances: BTreeMap<PlayerId, u64>,

    /// Funds escrowed in open slots per player.
    locked: BTreeMap<PlayerId, u64>,

    /// Sum of all deposits.
    total_received: u64,

    /// Sum of all successful withdrawals.
    total_paid_out: u64,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Withdrawable balance.
    pub fn balance_of(&self, player: &PlayerId) -> u64 {
        self.balances.get(player).copied().unwrap_or(0)
    }

    /// Funds escrowed in open slots.
    pub fn locked_of(&self, player: &PlayerId) -> u64 {
        self.locked.get(player).copied().unwrap_or(0)
    }

    /// Sum of all deposits.
    pub fn total_received(&self) -> u64 {
        self.total_received
    }

    /// Sum of all completed withdrawals.
    pub fn total_paid_out(&self) -> u64 {
        self.total_paid_out
    }

    /// Credit an inbound payment.
    pub fn deposit(&mut self, player: PlayerId, amount: u64) -> Result<(), EngineError> {
        if amount == 0 {
            return Err(EngineError::ZeroValue);
        }
        let total = self.total_received.checked_add(amount).ok_or(EngineError::Overflow)?;
        let balance = self.balance_of(&player).checked_add(amount).ok_or(EngineError::Overflow)?;

        self.total_received = total;
        self.balances.insert(player, balance);
        Ok(())
    }

    /// Move `amount` from the player's balance into escrow.
    pub fn lock(&mut self, player: PlayerId, amount: u64) -> Result<(), EngineError> {
        let available = self.balance_of(&player);
        if available < amount {
            return Err(EngineError::InsufficientFunds { available, required: amount });
        }
        let locked = self.locked_of(&player).checked_add(amount).ok_or(EngineError::Overflow)?;

        self.balances.insert(player, available - amount);
        self.locked.insert(player, locked);
        Ok(())
    }

    /// Release a player's escrow for a closed slot.
    ///
    /// The released funds leave escrow without returning to the player;
    /// the caller credits whatever payout the game produced.
    pub fn release(&mut self, player: PlayerId, amount: u64) {
        let locked = self.locked_of(&player);
        debug_assert!(locked >= amount, "releasing more than locked");
        self.locked.insert(player, locked.saturating_sub(amount));
    }

    /// Credit a payout (winnings or refund).
    pub fn credit(&mut self, player: PlayerId, amount: u64) {
        let balance = self.balance_of(&player);
        self.balances.insert(player, balance.saturating_add(amount));
    }

    /// Debit a withdrawal ahead of the external transfer.
    pub fn debit_for_withdrawal(&mut self, player: PlayerId, amount: u64) -> Result<(), EngineError> {
        let available = self.balance_of(&player);
        if available < amount {
            return Err(EngineError::InsufficientFunds { available, required: amount });
        }
        let paid = self.total_paid_out.checked_add(amount).ok_or(EngineError::Overflow)?;

        self.balances.insert(player, available - amount);
        self.total_paid_out = paid;
        Ok(())
    }

    /// Undo a withdrawal whose transfer failed.
    pub fn rollback_withdrawal(&mut self, player: PlayerId, amount: u64) {
        self.credit(player, amount);
        self.total_paid_out = self.total_paid_out.saturating_sub(amount);
    }

    /// Sum of all withdrawable balances.
    pub fn total_balances(&self) -> u64 {
        self.balances.values().fold(0u64, |acc, b| acc.saturating_add(*b))
    }

    /// Sum of all escrowed funds.
    pub fn total_locked(&self) -> u64 {
        self.locked.values().fold(0u64, |acc, b| acc.saturating_add(*b))
    }

    /// Check that no value was created or destroyed.
    pub fn check_conservation(&self) -> bool {
        let held = self.total_balances().checked_add(self.total_locked());
        let owed = self.total_received.checked_sub(self.total_paid_out);
        matches!((held, owed), (Some(h), Some(o)) if h == o)
    }

    /// Iterate accounts in identity order.
    pub fn accounts(&self) -> impl Iterator<Item = (&PlayerId, &u64)> {
        self.balances.iter()
    }

    /// Hash the ledger for the engine digest.
    pub fn hash_into(&self, hasher: &mut CommitHasher) {
        for (player, balance) in &self.balances {
            hasher.update_id(&player.0);
            hasher.update_u64(*balance);
        }
        for (player, locked) in &self.locked {
            hasher.update_id(&player.0);
            hasher.update_u64(*locked);
        }
        hasher.update_u64(self.total_received);
        hasher.update_u64(self.total_paid_out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> PlayerId {
        PlayerId::new([1; 16])
    }

    #[test]
    fn test_deposit_and_zero_value() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.deposit(alice(), 0), Err(EngineError::ZeroValue));
        ledger.deposit(alice(), 10).unwrap();
        ledger.deposit(alice(), 5).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 15);
        assert_eq!(ledger.total_received(), 15);
        assert!(ledger.check_conservation());
    }

    #[test]
    fn test_lock_requires_balance() {
        let mut ledger = Ledger::new();
        ledger.deposit(alice(), 3).unwrap();

        assert_eq!(
            ledger.lock(alice(), 4),
            Err(EngineError::InsufficientFunds { available: 3, required: 4 })
        );
        assert_eq!(ledger.balance_of(&alice()), 3);

        ledger.lock(alice(), 2).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 1);
        assert_eq!(ledger.locked_of(&alice()), 2);
        assert!(ledger.check_conservation());
    }

    #[test]
    fn test_release_and_credit_refund() {
        let mut ledger = Ledger::new();
        ledger.deposit(alice(), 5).unwrap();
        ledger.lock(alice(), 5).unwrap();

        ledger.release(alice(), 5);
        ledger.credit(alice(), 5);

        assert_eq!(ledger.balance_of(&alice()), 5);
        assert_eq!(ledger.locked_of(&alice()), 0);
        assert!(ledger.check_conservation());
    }

    #[test]
    fn test_withdrawal_and_rollback() {
        let mut ledger = Ledger::new();
        ledger.deposit(alice(), 8).unwrap();

        ledger.debit_for_withdrawal(alice(), 6).unwrap();
        assert_eq!(ledger.balance_of(&alice()), 2);
        assert_eq!(ledger.total_paid_out(), 6);
        assert!(ledger.check_conservation());

        ledger.rollback_withdrawal(alice(), 6);
        assert_eq!(ledger.balance_of(&alice()), 8);
        assert_eq!(ledger.total_paid_out(), 0);
        assert!(ledger.check_conservation());
    }

    #[test]
    fn test_zeroed_account_persists() {
        let mut ledger = Ledger::new();
        ledger.deposit(alice(), 1).unwrap();
        ledger.debit_for_withdrawal(alice(), 1).unwrap();
        assert_eq!(ledger.accounts().count(), 1);
        assert_eq!(ledger.balance_of(&alice()), 0);
    }
}
