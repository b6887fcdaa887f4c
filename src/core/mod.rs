//! Core primitives.
//!
//! Hashing and identity types shared by the commitment scheme and the
//! game engine.

pub mod hash;
pub mod identity;

// Re-export core types
pub use hash::{Hash32, CommitHasher, hash_with_domain};
pub use identity::PlayerId;
