//! # RPS Wager Engine
//!
//! Two-player Rock-Paper-Scissors with stakes, played through a
//! commit-reveal protocol on top of a pull-payment ledger.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      RPS WAGER ENGINE                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Primitives                                │
//! │  ├── hash.rs     - SHA-256 with domain separation            │
//! │  └── identity.rs - Player identities                         │
//! │                                                              │
//! │  commitment/     - Move commitments                          │
//! │  └── verify.rs   - hash(move, nonce) and reveal checks       │
//! │                                                              │
//! │  game/           - Game engine                               │
//! │  ├── moves.rs    - Move and outcome resolution               │
//! │  ├── slot.rs     - Per-game state machine                    │
//! │  ├── ledger.rs   - Virtual balances and locked funds         │
//! │  ├── engine.rs   - Public operations                         │
//! │  └── events.rs   - Audit events                              │
//! │                                                              │
//! │  env/            - Execution environment                     │
//! │  ├── mod.rs      - ExecutionEnv trait                        │
//! │  └── local.rs    - In-memory chain for demos and tests       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fund Safety
//!
//! Payouts are never pushed. Winnings, refunds and forfeits are credited
//! to the ledger, and players pull them with `withdraw`. A withdrawal
//! debits the ledger before the external transfer is requested, so a
//! recipient that re-enters the engine during the transfer sees the
//! already-reduced balance.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod commitment;
pub mod env;
pub mod game;

// Re-export commonly used types
pub use crate::core::hash::Hash32;
pub use crate::core::identity::PlayerId;
pub use commitment::{compute_commitment, verify, CommitmentError, MoveCommitment, Nonce};
pub use env::{ExecutionEnv, LocalChain, TransferError};
pub use game::{
    EngineConfig, EngineError, EngineEvent, GameSlot, GameState, Ledger, Move, Outcome, RpsEngine,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reveal period used by the reference deployment (blocks).
pub const DEFAULT_REVEAL_PERIOD_LENGTH: u64 = 4;
