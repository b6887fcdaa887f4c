//! Game Slot State
//!
//! One slot per `game_id`. A slot exists only while a game is open; when
//! it resolves, cancels or times out the engine drops it and the id is
//! free for an unrelated game.
//!
//! ```text
//!   NoGame ──commit──▶ Move1 ──commit──▶ Move2 ──reveal──▶ Reveal1 ──reveal──▶ NoGame
//!                        │                 │                  │
//!                        └─cancel─▶ NoGame └──timeout─▶ NoGame ┘
//! ```

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::hash::{CommitHasher, Hash32};
use crate::core::identity::PlayerId;
use crate::game::moves::Move;

/// Protocol phase of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
#[derive(Default)]
pub enum GameState {
    /// No open game (initial, and again after every resolution)
    #[default]
    NoGame = 0,
    /// First player committed
    Move1 = 1,
    /// Both players committed
    Move2 = 2,
    /// One player revealed
    Reveal1 = 3,
}

/// An open game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSlot {
    /// Current phase
    pub state: GameState,

    /// First mover
    pub first: PlayerId,

    /// Second mover (set on the second commit)
    pub second: Option<PlayerId>,

    /// Commitment per player
    pub commitments: BTreeMap<PlayerId, Hash32>,

    /// Stake per player
    pub bet: u64,

    /// First reveal, if any
    pub revealed: Option<(PlayerId, Move)>,

    /// Block height of the last state-advancing action
    pub last_action_block: u64,
}

impl GameSlot {
    /// Open a slot with the first commitment.
    pub fn open(first: PlayerId, bet: u64, commitment: Hash32, block: u64) -> Self {
        let mut commitments = BTreeMap::new();
        commitments.insert(first, commitment);
        Self {
            state: GameState::Move1,
            first,
            second: None,
            commitments,
            bet,
            revealed: None,
            last_action_block: block,
        }
    }

    /// Record the second commitment.
    pub fn join(&mut self, second: PlayerId, commitment: Hash32, block: u64) {
        self.second = Some(second);
        self.commitments.insert(second, commitment);
        self.state = GameState::Move2;
        self.last_action_block = block;
    }

    /// Record the first reveal.
    pub fn record_reveal(&mut self, player: PlayerId, mv: Move, block: u64) {
        self.revealed = Some((player, mv));
        self.state = GameState::Reveal1;
        self.last_action_block = block;
    }

    /// Both players, in commit order.
    pub fn players(&self) -> Vec<PlayerId> {
        let mut players = vec![self.first];
        players.extend(self.second);
        players
    }

    /// Is this identity seated in the slot?
    pub fn is_player(&self, player: &PlayerId) -> bool {
        self.first == *player || self.second.as_ref() == Some(player)
    }

    /// Stored commitment for a player.
    pub fn commitment_of(&self, player: &PlayerId) -> Option<&Hash32> {
        self.commitments.get(player)
    }

    /// Has this player already revealed?
    pub fn has_revealed(&self, player: &PlayerId) -> bool {
        self.revealed.is_some_and(|(p, _)| p == *player)
    }

    /// First block at which the slot may be timed out.
    pub fn timeout_block(&self, reveal_period_length: u64) -> u64 {
        self.last_action_block.saturating_add(reveal_period_length)
    }

    /// Hash this slot for the engine digest.
    pub fn hash_into(&self, hasher: &mut CommitHasher) {
        hasher.update_u8(self.state as u8);
        hasher.update_id(&self.first.0);
        match self.second {
            Some(p) => {
                hasher.update_bool(true);
                hasher.update_id(&p.0);
            }
            None => hasher.update_bool(false),
        }
        for (player, commitment) in &self.commitments {
            hasher.update_id(&player.0);
            hasher.update_bytes(commitment);
        }
        hasher.update_u64(self.bet);
        match self.revealed {
            Some((p, mv)) => {
                hasher.update_bool(true);
                hasher.update_id(&p.0);
                hasher.update_u8(mv.encode());
            }
            None => hasher.update_bool(false),
        }
        hasher.update_u64(self.last_action_block);
    }
}
