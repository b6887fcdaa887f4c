//! Game Engine Module
//!
//! ## Module Structure
//!
//! - `moves`: Move values and outcome resolution
//! - `slot`: Per-game state machine
//! - `ledger`: Virtual balances and escrow
//! - `config`: Construction parameters
//! - `error`: Error taxonomy
//! - `events`: Audit events
//! - `engine`: Public operations

pub mod moves;
pub mod slot;
pub mod ledger;
pub mod config;
pub mod error;
pub mod events;
pub mod engine;

// Re-export key types
pub use moves::{Move, Outcome};
pub use slot::{GameSlot, GameState};
pub use ledger::Ledger;
pub use config::EngineConfig;
pub use error::EngineError;
pub use events::{EngineEvent, EngineEventData, Settlement};
pub use engine::RpsEngine;
