//! Hashing Helpers
//!
//! Deterministic SHA-256 hashing used for:
//! - Move commitments (commit-reveal)
//! - Engine state digests (idempotence and no-mutation checks)

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type Hash32 = [u8; 32];

/// Deterministic hasher with a domain separator.
///
/// Wraps SHA-256 with helpers for the integer widths the engine stores.
/// Order of updates is significant.
pub struct CommitHasher {
    hasher: Sha256,
}

impl CommitHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for move commitments.
    pub fn for_move_commitment() -> Self {
        Self::new(b"RPS_WAGER_COMMIT_V1")
    }

    /// Create hasher for engine state digests.
    pub fn for_engine_state() -> Self {
        Self::new(b"RPS_WAGER_STATE_V1")
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.hasher.update([value]);
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with an integer widened to a 32-byte big-endian word.
    ///
    /// Matches the layout of a 256-bit machine word, so small enum
    /// discriminants hash the same way a contract ABI would pack them.
    #[inline]
    pub fn update_word(&mut self, value: u64) {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        self.hasher.update(word);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Update with a 16-byte identifier.
    #[inline]
    pub fn update_id(&mut self, id: &[u8; 16]) {
        self.hasher.update(id);
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> Hash32 {
        self.hasher.finalize().into()
    }
}

/// Compute hash with domain separator.
pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    hasher.update(data);
    hasher.finalize().into()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hasher_determinism() {
        let make_hash = || {
            let mut hasher = CommitHasher::for_engine_state();
            hasher.update_u64(12345);
            hasher.update_word(3);
            hasher.update_bool(true);
            hasher.update_id(&[7; 16]);
            hasher.finalize()
        };

        assert_eq!(make_hash(), make_hash());
    }

    #[test]
    fn test_hash_order_matters() {
        let hash1 = {
            let mut h = CommitHasher::new(b"test");
            h.update_u64(1);
            h.update_u64(2);
            h.finalize()
        };

        let hash2 = {
            let mut h = CommitHasher::new(b"test");
            h.update_u64(2);
            h.update_u64(1);
            h.finalize()
        };

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_domain_separation() {
        let data = [1u8, 2, 3, 4];

        let hash1 = hash_with_domain(b"DOMAIN_A", &data);
        let hash2 = hash_with_domain(b"DOMAIN_B", &data);

        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_word_is_big_endian_padded() {
        let mut a = CommitHasher::new(b"w");
        a.update_word(1);

        let mut raw = [0u8; 32];
        raw[31] = 1;
        let mut b = CommitHasher::new(b"w");
        b.update_bytes(&raw);

        assert_eq!(a.finalize(), b.finalize());
    }
}
