//! Move Commitments
//!
//! Players bind themselves to a move before the opponent can see it:
//!
//! ```text
//!   commit:  C = SHA256("RPS_WAGER_COMMIT_V1" || word(move) || nonce)
//!   reveal:  (move, nonce)  ->  verify(C, move, nonce)
//! ```
//!
//! The verifier is stateless. Storage of commitments belongs to the
//! game slot that received them.

pub mod verify;

// Re-export key types
pub use verify::{compute_commitment, verify, CommitmentError, MoveCommitment, Nonce};
