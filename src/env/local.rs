//! In-Memory Chain
//!
//! A single-process execution environment: external wallets, funds held
//! in custody for the engine, a block counter and the current caller.
//! Used by the demo binary and by tests.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::core::identity::PlayerId;
use crate::env::{ExecutionEnv, TransferError};
use crate::game::engine::RpsEngine;
use crate::game::error::EngineError;

/// Local execution environment.
#[derive(Debug, Clone, Default)]
pub struct LocalChain {
    /// Current block height.
    block_height: u64,
    /// Caller of the next engine operation.
    caller: PlayerId,
    /// Funds outside the engine.
    wallets: BTreeMap<PlayerId, u64>,
    /// Funds the chain holds for the engine.
    custody: u64,
    /// Recipients whose incoming transfers fail.
    rejecting: BTreeSet<PlayerId>,
}

impl LocalChain {
    /// Create an empty chain at block 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Give a player external funds.
    pub fn fund(&mut self, player: PlayerId, amount: u64) -> &mut Self {
        let wallet = self.wallets.entry(player).or_insert(0);
        *wallet = wallet.saturating_add(amount);
        self
    }

    /// Set the caller for subsequent operations.
    pub fn call_as(&mut self, player: PlayerId) -> &mut Self {
        self.caller = player;
        self
    }

    /// Mine `blocks` empty blocks.
    pub fn advance(&mut self, blocks: u64) -> &mut Self {
        self.block_height = self.block_height.saturating_add(blocks);
        self
    }

    /// Make transfers to `player` fail.
    pub fn reject_transfers_to(&mut self, player: PlayerId) -> &mut Self {
        self.rejecting.insert(player);
        self
    }

    /// Let transfers to `player` succeed again.
    pub fn accept_transfers_to(&mut self, player: PlayerId) -> &mut Self {
        self.rejecting.remove(&player);
        self
    }

    /// External balance of a player.
    pub fn wallet_of(&self, player: &PlayerId) -> u64 {
        self.wallets.get(player).copied().unwrap_or(0)
    }

    /// Funds currently held for the engine.
    pub fn custody(&self) -> u64 {
        self.custody
    }

    /// Pay `amount` from `player`'s wallet into the engine.
    ///
    /// The wallet is only charged if the engine accepts the deposit.
    pub fn deposit(
        &mut self,
        engine: &mut RpsEngine,
        player: PlayerId,
        amount: u64,
    ) -> Result<(), EngineError> {
        let available = self.wallet_of(&player);
        if available < amount {
            return Err(EngineError::InsufficientFunds { available, required: amount });
        }
        let custody = self.custody.checked_add(amount).ok_or(EngineError::Overflow)?;

        self.caller = player;
        engine.receive_deposit(self, amount)?;

        self.wallets.insert(player, available - amount);
        self.custody = custody;
        Ok(())
    }
}

impl ExecutionEnv for LocalChain {
    fn caller(&self) -> PlayerId {
        self.caller
    }

    fn block_height(&self) -> u64 {
        self.block_height
    }

    fn transfer_out(
        &mut self,
        _engine: &mut RpsEngine,
        to: PlayerId,
        amount: u64,
    ) -> Result<(), TransferError> {
        if self.rejecting.contains(&to) {
            return Err(TransferError::Rejected(to));
        }
        if self.custody < amount {
            return Err(TransferError::InsufficientCustody { held: self.custody, needed: amount });
        }
        self.custody -= amount;
        self.fund(to, amount);
        debug!("Transferred {} to {}", amount, to);
        Ok(())
    }
}
