//! Commitment Verification
//!
//! Recompute `hash(move, nonce)` and compare it with a stored commitment.

use rand::RngCore;
use serde::{Serialize, Deserialize};

use crate::core::hash::{CommitHasher, Hash32};
use crate::game::moves::Move;

/// 32-byte secret blinding a committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nonce(pub [u8; 32]);

impl Nonce {
    /// Wrap raw bytes.
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Draw a nonce from the thread RNG.
    pub fn random() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Build a nonce from a short secret, right-padded with zeros.
    ///
    /// Secrets longer than 32 bytes are truncated.
    pub fn from_secret(secret: &[u8]) -> Self {
        let mut bytes = [0u8; 32];
        let len = secret.len().min(32);
        bytes[..len].copy_from_slice(&secret[..len]);
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Errors raised by the verifier itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitmentError {
    /// `Move::None` was offered as a reveal.
    #[error("move is not playable: {0:?}")]
    InvalidMove(Move),
}

/// Compute the commitment for a move and nonce.
///
/// The move is widened to a 32-byte big-endian word before the nonce is
/// appended. Any move can be committed, including `None`; it simply can
/// never be revealed.
pub fn compute_commitment(mv: Move, nonce: &Nonce) -> Hash32 {
    let mut hasher = CommitHasher::for_move_commitment();
    hasher.update_word(mv.encode() as u64);
    hasher.update_bytes(&nonce.0);
    hasher.finalize()
}

/// Check a revealed move against a commitment.
///
/// Returns `Ok(true)` iff the recomputed hash matches. Unplayable moves
/// are rejected before hashing.
pub fn verify(commitment: &Hash32, mv: Move, nonce: &Nonce) -> Result<bool, CommitmentError> {
    if !mv.is_playable() {
        return Err(CommitmentError::InvalidMove(mv));
    }
    Ok(compute_commitment(mv, nonce) == *commitment)
}

/// A move together with the secret that hides it.
///
/// Held by the player off-engine; only `commitment` is ever submitted
/// until the reveal.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MoveCommitment {
    /// The hidden move.
    pub mv: Move,
    /// Blinding nonce.
    pub nonce: Nonce,
    /// Published commitment hash.
    pub commitment: Hash32,
}

impl MoveCommitment {
    /// Commit to a move with a fresh random nonce.
    pub fn new(mv: Move) -> Self {
        Self::with_nonce(mv, Nonce::random())
    }

    /// Commit to a move with a caller-chosen nonce.
    pub fn with_nonce(mv: Move, nonce: Nonce) -> Self {
        let commitment = compute_commitment(mv, &nonce);
        Self { mv, nonce, commitment }
    }

    /// Verify that this bundle is internally consistent.
    pub fn verify(&self) -> Result<bool, CommitmentError> {
        verify(&self.commitment, self.mv, &self.nonce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_commitment_determinism() {
        let nonce = Nonce::from_secret(b"secret");
        assert_eq!(
            compute_commitment(Move::Rock, &nonce),
            compute_commitment(Move::Rock, &nonce)
        );
    }

    #[test]
    fn test_verify_accepts_truthful_reveal() {
        let c = MoveCommitment::with_nonce(Move::Paper, Nonce::from_secret(b"secret1"));
        assert_eq!(verify(&c.commitment, Move::Paper, &c.nonce), Ok(true));
        assert_eq!(c.verify(), Ok(true));
    }

    #[test]
    fn test_verify_rejects_wrong_move() {
        let c = MoveCommitment::with_nonce(Move::Paper, Nonce::from_secret(b"secret1"));
        assert_eq!(verify(&c.commitment, Move::Rock, &c.nonce), Ok(false));
    }

    #[test]
    fn test_verify_rejects_wrong_nonce() {
        let c = MoveCommitment::with_nonce(Move::Paper, Nonce::from_secret(b"secret1"));
        let wrong = Nonce::from_secret(b"secret2");
        assert_eq!(verify(&c.commitment, Move::Paper, &wrong), Ok(false));
    }

    #[test]
    fn test_none_is_rejected_even_when_hash_matches() {
        let nonce = Nonce::from_secret(b"x");
        let commitment = compute_commitment(Move::None, &nonce);
        assert_eq!(
            verify(&commitment, Move::None, &nonce),
            Err(CommitmentError::InvalidMove(Move::None))
        );
    }

    #[test]
    fn test_from_secret_padding() {
        let nonce = Nonce::from_secret(b"ab");
        assert_eq!(&nonce.0[..2], b"ab");
        assert!(nonce.0[2..].iter().all(|b| *b == 0));

        let long = Nonce::from_secret(&[9u8; 40]);
        assert_eq!(long.0, [9u8; 32]);
    }

    #[test]
    fn test_random_nonces_differ() {
        assert_ne!(Nonce::random(), Nonce::random());
    }

    fn playable() -> impl Strategy<Value = Move> {
        prop_oneof![Just(Move::Rock), Just(Move::Paper), Just(Move::Scissors)]
    }

    proptest! {
        #[test]
        fn prop_truthful_reveal_verifies(mv in playable(), bytes in any::<[u8; 32]>()) {
            let nonce = Nonce::new(bytes);
            let c = compute_commitment(mv, &nonce);
            prop_assert_eq!(verify(&c, mv, &nonce), Ok(true));
        }

        #[test]
        fn prop_mutated_nonce_fails(mv in playable(), bytes in any::<[u8; 32]>(), idx in 0usize..32, flip in 1u8..=255) {
            let nonce = Nonce::new(bytes);
            let c = compute_commitment(mv, &nonce);
            let mut mutated = bytes;
            mutated[idx] ^= flip;
            prop_assert_eq!(verify(&c, mv, &Nonce::new(mutated)), Ok(false));
        }

        #[test]
        fn prop_mutated_move_fails(mv in playable(), other in playable(), bytes in any::<[u8; 32]>()) {
            prop_assume!(mv != other);
            let nonce = Nonce::new(bytes);
            let c = compute_commitment(mv, &nonce);
            prop_assert_eq!(verify(&c, other, &nonce), Ok(false));
        }

        #[test]
        fn prop_mutated_hash_fails(mv in playable(), bytes in any::<[u8; 32]>(), idx in 0usize..32, flip in 1u8..=255) {
            let nonce = Nonce::new(bytes);
            let mut c = compute_commitment(mv, &nonce);
            c[idx] ^= flip;
            prop_assert_eq!(verify(&c, mv, &nonce), Ok(false));
        }
    }
}
