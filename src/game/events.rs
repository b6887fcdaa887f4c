//! Engine Events
//!
//! Audit trail of every state change the engine commits. Failed calls
//! emit nothing.

use serde::{Serialize, Deserialize};

use crate::core::hash::Hash32;
use crate::core::identity::PlayerId;
use crate::game::moves::{Move, Outcome};

/// How a game left its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    /// Both reveals arrived.
    Revealed(Outcome),
    /// Nobody revealed in time; both refunded.
    TimeoutRefund,
    /// Only one player revealed in time; they take the pot.
    TimeoutForfeit,
}

/// Event data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEventData {
    /// Funds received from outside
    Deposited {
        player_id: PlayerId,
        amount: u64,
    },

    /// A commitment entered a slot
    MoveCommitted {
        game_id: u64,
        player_id: PlayerId,
        bet: u64,
        commitment: Hash32,
    },

    /// First reveal accepted
    MoveRevealed {
        game_id: u64,
        player_id: PlayerId,
        mv: Move,
    },

    /// Slot closed with payouts
    GameResolved {
        game_id: u64,
        settlement: Settlement,
        /// (player, amount credited)
        payouts: Vec<(PlayerId, u64)>,
    },

    /// Sole committed player withdrew the offer
    GameCancelled {
        game_id: u64,
        player_id: PlayerId,
        refund: u64,
    },

    /// Funds left the engine
    Withdrawn {
        player_id: PlayerId,
        amount: u64,
    },
}

/// An event stamped with the block it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineEvent {
    /// Block height at emission
    pub block: u64,

    /// Event data
    pub data: EngineEventData,
}

impl EngineEvent {
    /// Create a new event.
    pub fn new(block: u64, data: EngineEventData) -> Self {
        Self { block, data }
    }

    /// Slot this event concerns, if any.
    pub fn game_id(&self) -> Option<u64> {
        match &self.data {
            EngineEventData::MoveCommitted { game_id, .. }
            | EngineEventData::MoveRevealed { game_id, .. }
            | EngineEventData::GameResolved { game_id, .. }
            | EngineEventData::GameCancelled { game_id, .. } => Some(*game_id),
            EngineEventData::Deposited { .. } | EngineEventData::Withdrawn { .. } => None,
        }
    }

    /// Create deposited event.
    pub fn deposited(block: u64, player_id: PlayerId, amount: u64) -> Self {
        Self::new(block, EngineEventData::Deposited { player_id, amount })
    }

    /// Create withdrawn event.
    pub fn withdrawn(block: u64, player_id: PlayerId, amount: u64) -> Self {
        Self::new(block, EngineEventData::Withdrawn { player_id, amount })
    }
}
