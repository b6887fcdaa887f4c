//! Execution Environment
//!
//! The engine does not own time, identity or money movement. It asks the
//! environment for:
//! - the caller of the current operation
//! - the current block height
//! - an outbound transfer when a player withdraws
//!
//! `transfer_out` receives the engine itself, so the recipient side of a
//! transfer may call back into it. The engine must already be consistent
//! by the time this happens.

pub mod local;

pub use local::LocalChain;

use crate::core::identity::PlayerId;
use crate::game::engine::RpsEngine;

/// Outbound transfer failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    /// The recipient refused the funds.
    #[error("recipient {0} rejected the transfer")]
    Rejected(PlayerId),

    /// The environment does not hold enough funds on the engine's behalf.
    #[error("insufficient custody: held {held}, needed {needed}")]
    InsufficientCustody {
        /// Funds held for the engine.
        held: u64,
        /// Funds requested.
        needed: u64,
    },
}

/// Services the engine consumes from its host.
pub trait ExecutionEnv {
    /// Identity of the account invoking the current operation.
    fn caller(&self) -> PlayerId;

    /// Current block height. Never decreases.
    fn block_height(&self) -> u64;

    /// Send `amount` to `to`.
    ///
    /// May re-enter `engine` before returning.
    fn transfer_out(
        &mut self,
        engine: &mut RpsEngine,
        to: PlayerId,
        amount: u64,
    ) -> Result<(), TransferError>;
}
