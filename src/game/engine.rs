//! Game Engine
//!
//! Owns every game slot and the ledger. Each operation validates against
//! the slot state and block height first and mutates only once every
//! check has passed, so a failed call leaves the engine exactly as it
//! found it.
//!
//! # Fund flow
//!
//! ```text
//!   deposit ──▶ balance ──commit──▶ locked ──resolve/cancel/timeout──▶ balance ──withdraw──▶ out
//! ```
//!
//! Nothing is ever pushed to a player. `withdraw` is the only operation
//! that calls out, and it debits the ledger before doing so.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::commitment::{verify, Nonce};
use crate::core::hash::{CommitHasher, Hash32};
use crate::core::identity::PlayerId;
use crate::env::ExecutionEnv;
use crate::game::config::EngineConfig;
use crate::game::error::EngineError;
use crate::game::events::{EngineEvent, EngineEventData, Settlement};
use crate::game::ledger::Ledger;
use crate::game::moves::{Move, Outcome};
use crate::game::slot::{GameSlot, GameState};

/// The wagering engine.
#[derive(Clone, Debug)]
pub struct RpsEngine {
    /// Construction parameters
    config: EngineConfig,

    /// Open games by id (BTreeMap for deterministic iteration)
    slots: BTreeMap<u64, GameSlot>,

    /// Virtual balances
    ledger: Ledger,

    /// Events not yet taken
    pending_events: Vec<EngineEvent>,
}

impl RpsEngine {
    /// Create an engine with the given reveal period (blocks).
    pub fn new(reveal_period_length: u64) -> Result<Self, EngineError> {
        Self::with_config(EngineConfig::new(reveal_period_length))
    }

    /// Create an engine from a config.
    pub fn with_config(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        info!("Engine created with reveal period of {} blocks", config.reveal_period_length);
        Ok(Self {
            config,
            slots: BTreeMap::new(),
            ledger: Ledger::new(),
            pending_events: Vec::new(),
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Blocks before a stuck game may be timed out.
    pub fn reveal_period_length(&self) -> u64 {
        self.config.reveal_period_length
    }

    /// Protocol phase of a slot. Unknown ids are `NoGame`.
    pub fn game_state(&self, game_id: u64) -> GameState {
        self.slots.get(&game_id).map(|s| s.state).unwrap_or_default()
    }

    /// Open game in a slot.
    pub fn game(&self, game_id: u64) -> Option<&GameSlot> {
        self.slots.get(&game_id)
    }

    /// Withdrawable balance.
    pub fn balance_of(&self, player: &PlayerId) -> u64 {
        self.ledger.balance_of(player)
    }

    /// Funds escrowed in open games.
    pub fn locked_of(&self, player: &PlayerId) -> u64 {
        self.ledger.locked_of(player)
    }

    /// The ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// First block at which `reveal_phase_ended` can succeed, if the
    /// slot is in a timeout-eligible state.
    pub fn timeout_block(&self, game_id: u64) -> Option<u64> {
        self.slots
            .get(&game_id)
            .filter(|s| matches!(s.state, GameState::Move2 | GameState::Reveal1))
            .map(|s| s.timeout_block(self.config.reveal_period_length))
    }

    /// Digest of all slots and the ledger.
    pub fn state_hash(&self) -> Hash32 {
        let mut hasher = CommitHasher::for_engine_state();
        hasher.update_u64(self.config.reveal_period_length);
        for (game_id, slot) in &self.slots {
            hasher.update_u64(*game_id);
            slot.hash_into(&mut hasher);
        }
        self.ledger.hash_into(&mut hasher);
        hasher.finalize()
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Credit an inbound payment to the caller.
    pub fn receive_deposit<E>(&mut self, env: &mut E, amount: u64) -> Result<(), EngineError>
    where
        E: ExecutionEnv + ?Sized,
    {
        let caller = env.caller();
        self.ledger.deposit(caller, amount)?;

        debug!("Player {} deposited {}", caller, amount);
        self.pending_events.push(EngineEvent::deposited(env.block_height(), caller, amount));
        Ok(())
    }

    /// Commit to a hidden move, staking `bet` from the caller's balance.
    ///
    /// The first commit opens the slot and fixes the bet. The second must
    /// match it exactly.
    pub fn make_move<E>(
        &mut self,
        env: &mut E,
        game_id: u64,
        bet: u64,
        commitment: Hash32,
    ) -> Result<(), EngineError>
    where
        E: ExecutionEnv + ?Sized,
    {
        let caller = env.caller();
        let block = env.block_height();

        match self.slots.get_mut(&game_id) {
            None => {
                self.ledger.lock(caller, bet)?;
                self.slots.insert(game_id, GameSlot::open(caller, bet, commitment, block));
            }
            Some(slot) => {
                if slot.is_player(&caller) {
                    return Err(EngineError::AlreadyCommitted(game_id));
                }
                if slot.state != GameState::Move1 {
                    return Err(EngineError::InvalidState { game_id, state: slot.state });
                }
                if bet != slot.bet {
                    return Err(EngineError::BetMismatch { expected: slot.bet, got: bet });
                }
                self.ledger.lock(caller, bet)?;
                slot.join(caller, commitment, block);
            }
        }

        debug!("Player {} committed to game {} with bet {}", caller, game_id, bet);
        self.pending_events.push(EngineEvent::new(
            block,
            EngineEventData::MoveCommitted { game_id, player_id: caller, bet, commitment },
        ));
        Ok(())
    }

    /// Open the caller's commitment.
    ///
    /// The first reveal is recorded. The second resolves the game and
    /// frees the slot.
    pub fn reveal_move<E>(
        &mut self,
        env: &mut E,
        game_id: u64,
        mv: Move,
        nonce: &Nonce,
    ) -> Result<(), EngineError>
    where
        E: ExecutionEnv + ?Sized,
    {
        let caller = env.caller();
        let block = env.block_height();

        let slot = self.slots.get(&game_id).ok_or(EngineError::InvalidState {
            game_id,
            state: GameState::NoGame,
        })?;
        if !matches!(slot.state, GameState::Move2 | GameState::Reveal1) {
            return Err(EngineError::InvalidState { game_id, state: slot.state });
        }
        if !slot.is_player(&caller) {
            return Err(EngineError::Unauthorized(game_id));
        }
        if slot.has_revealed(&caller) {
            return Err(EngineError::AlreadyRevealed(game_id));
        }
        let commitment = slot.commitment_of(&caller).ok_or(EngineError::Unauthorized(game_id))?;
        if !matches!(verify(commitment, mv, nonce), Ok(true)) {
            debug!("Player {} sent a bad reveal for game {}", caller, game_id);
            return Err(EngineError::InvalidReveal(game_id));
        }

        let Some((revealer, revealed_move)) = slot.revealed else {
            if let Some(slot) = self.slots.get_mut(&game_id) {
                slot.record_reveal(caller, mv, block);
            }
            debug!("Player {} revealed {:?} in game {}", caller, mv, game_id);
            self.pending_events.push(EngineEvent::new(
                block,
                EngineEventData::MoveRevealed { game_id, player_id: caller, mv },
            ));
            return Ok(());
        };

        // Second reveal: orient both moves by commit order.
        let (first_move, second_move) = if revealer == slot.first {
            (revealed_move, mv)
        } else {
            (mv, revealed_move)
        };
        let outcome = Outcome::resolve(first_move, second_move);
        let pot = slot.bet.checked_mul(2).ok_or(EngineError::Overflow)?;
        let second = slot.second.ok_or(EngineError::InvalidState { game_id, state: slot.state })?;
        let payouts = match outcome {
            Outcome::FirstWins => vec![(slot.first, pot)],
            Outcome::SecondWins => vec![(second, pot)],
            Outcome::Draw => vec![(slot.first, slot.bet), (second, slot.bet)],
        };

        info!("Game {} resolved: {:?} vs {:?} -> {:?}", game_id, first_move, second_move, outcome);
        self.close_slot(game_id, payouts, Settlement::Revealed(outcome), block);
        Ok(())
    }

    /// Withdraw a game nobody has joined yet.
    pub fn cancel_game<E>(&mut self, env: &mut E, game_id: u64) -> Result<(), EngineError>
    where
        E: ExecutionEnv + ?Sized,
    {
        let caller = env.caller();
        let block = env.block_height();

        let state = self.game_state(game_id);
        let slot = match self.slots.get(&game_id) {
            Some(slot) if state == GameState::Move1 => slot,
            _ => return Err(EngineError::InvalidState { game_id, state }),
        };
        if slot.first != caller {
            return Err(EngineError::Unauthorized(game_id));
        }
        let refund = slot.bet;

        if let Some(slot) = self.slots.remove(&game_id) {
            self.ledger.release(slot.first, slot.bet);
            self.ledger.credit(slot.first, slot.bet);
        }

        info!("Game {} cancelled by {}, refunded {}", game_id, caller, refund);
        self.pending_events.push(EngineEvent::new(
            block,
            EngineEventData::GameCancelled { game_id, player_id: caller, refund },
        ));
        Ok(())
    }

    /// Close a game whose reveal window has elapsed.
    ///
    /// Move2: nobody revealed, both bets are refunded.
    /// Reveal1: the player who revealed takes both bets.
    /// Move1 is never eligible; it can only be cancelled.
    pub fn reveal_phase_ended<E>(&mut self, env: &mut E, game_id: u64) -> Result<(), EngineError>
    where
        E: ExecutionEnv + ?Sized,
    {
        let block = env.block_height();

        let slot = self.slots.get(&game_id).ok_or(EngineError::InvalidState {
            game_id,
            state: GameState::NoGame,
        })?;
        if !matches!(slot.state, GameState::Move2 | GameState::Reveal1) {
            return Err(EngineError::InvalidState { game_id, state: slot.state });
        }
        let eligible_at = slot.timeout_block(self.config.reveal_period_length);
        if block < eligible_at {
            return Err(EngineError::TooEarly { eligible_at, current: block });
        }

        let second = slot.second.ok_or(EngineError::InvalidState { game_id, state: slot.state })?;
        let (payouts, settlement) = match slot.revealed {
            None => (
                vec![(slot.first, slot.bet), (second, slot.bet)],
                Settlement::TimeoutRefund,
            ),
            Some((revealer, _)) => {
                let pot = slot.bet.checked_mul(2).ok_or(EngineError::Overflow)?;
                (vec![(revealer, pot)], Settlement::TimeoutForfeit)
            }
        };

        info!("Game {} timed out at block {}: {:?}", game_id, block, settlement);
        self.close_slot(game_id, payouts, settlement, block);
        Ok(())
    }

    /// Pay out part of the caller's balance.
    ///
    /// The ledger is debited before the environment is asked to transfer.
    /// Anything the recipient does during the transfer, including calling
    /// `withdraw` again, sees the reduced balance. If the transfer fails
    /// the debit is reverted.
    pub fn withdraw<E>(&mut self, env: &mut E, amount: u64) -> Result<(), EngineError>
    where
        E: ExecutionEnv + ?Sized,
    {
        let caller = env.caller();
        if amount == 0 {
            return Ok(());
        }

        self.ledger.debit_for_withdrawal(caller, amount)?;

        if let Err(e) = env.transfer_out(self, caller, amount) {
            warn!("Withdrawal of {} by {} failed, rolling back: {}", amount, caller, e);
            self.ledger.rollback_withdrawal(caller, amount);
            return Err(e.into());
        }

        info!("Player {} withdrew {}", caller, amount);
        self.pending_events.push(EngineEvent::withdrawn(env.block_height(), caller, amount));
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Drop a slot, release both stakes and credit payouts.
    fn close_slot(
        &mut self,
        game_id: u64,
        payouts: Vec<(PlayerId, u64)>,
        settlement: Settlement,
        block: u64,
    ) {
        let Some(slot) = self.slots.remove(&game_id) else {
            return;
        };
        for player in slot.players() {
            self.ledger.release(player, slot.bet);
        }
        for (player, amount) in &payouts {
            self.ledger.credit(*player, *amount);
        }
        self.pending_events.push(EngineEvent::new(
            block,
            EngineEventData::GameResolved { game_id, settlement, payouts },
        ));
    }
}

// =============================================================================
// TESTS
// =============================================================================
