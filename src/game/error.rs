//! Engine Errors
//!
//! Every failure is returned to the caller with engine state untouched.

use crate::env::TransferError;
use crate::game::slot::GameState;

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Operation is not legal in the slot's current state.
    #[error("Invalid state for game {game_id}: {state:?}")]
    InvalidState {
        /// Slot the call targeted.
        game_id: u64,
        /// State the slot was in.
        state: GameState,
    },

    /// Caller may not act on this slot.
    #[error("Caller is not entitled to act on game {0}")]
    Unauthorized(u64),

    /// Ledger balance does not cover the request.
    #[error("Insufficient funds: available {available}, required {required}")]
    InsufficientFunds {
        /// Balance the caller holds.
        available: u64,
        /// Amount the call needed.
        required: u64,
    },

    /// Second bet differs from the first.
    #[error("Bet mismatch: expected {expected}, got {got}")]
    BetMismatch {
        /// Bet stored by the first mover.
        expected: u64,
        /// Bet offered by the caller.
        got: u64,
    },

    /// Caller already holds a commitment in this slot.
    #[error("Already committed to game {0}")]
    AlreadyCommitted(u64),

    /// Caller already revealed in this slot.
    #[error("Already revealed in game {0}")]
    AlreadyRevealed(u64),

    /// Reveal does not open the stored commitment, or the move is not playable.
    #[error("Invalid reveal for game {0}")]
    InvalidReveal(u64),

    /// Timeout window has not elapsed.
    #[error("Too early: timeout at block {eligible_at}, current block {current}")]
    TooEarly {
        /// First block at which the timeout may be claimed.
        eligible_at: u64,
        /// Block height at call time.
        current: u64,
    },

    /// Construction parameter rejected.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Zero-value deposit.
    #[error("Deposit amount must be greater than zero")]
    ZeroValue,

    /// External transfer failed; the withdrawal was rolled back.
    #[error("Transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// Balance arithmetic overflowed.
    #[error("Balance overflow")]
    Overflow,
}
