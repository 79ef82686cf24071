//! Audit Hashing
//!
//! Deterministic hashing of escrow records for:
//! - Comparing replayed executions of the same call sequence
//! - Publishing a compact commitment of a settled round

use sha2::{Digest, Sha256};

use super::address::Address;

/// Hash output type (256 bits / 32 bytes)
pub type AuditHash = [u8; 32];

/// Domain separator for round digests.
pub const ROUND_DOMAIN: &[u8] = b"BATTLE_ESCROW_ROUND_V1";

/// Deterministic hasher for escrow records.
///
/// Wraps SHA-256. Order of updates is critical for determinism.
pub struct AuditHasher {
    hasher: Sha256,
}

impl AuditHasher {
    /// Create a new hasher with domain separator.
    pub fn new(domain: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain);
        Self { hasher }
    }

    /// Create hasher for a round digest.
    pub fn for_round() -> Self {
        Self::new(ROUND_DOMAIN)
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a u64 value (little-endian).
    #[inline]
    pub fn update_u64(&mut self, value: u64) {
        self.hasher.update(value.to_le_bytes());
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.hasher.update([value as u8]);
    }

    /// Update with an address (20 bytes).
    #[inline]
    pub fn update_address(&mut self, address: &Address) {
        self.hasher.update(address.as_bytes());
    }

    /// Finalize and return the hash.
    pub fn finalize(self) -> AuditHash {
        self.hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        let mut h1 = AuditHasher::for_round();
        h1.update_u64(12345);
        h1.update_address(&Address::derive("a"));

        let mut h2 = AuditHasher::for_round();
        h2.update_u64(12345);
        h2.update_address(&Address::derive("a"));

        assert_eq!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_domain_separation() {
        let mut h1 = AuditHasher::new(b"DOMAIN_A");
        h1.update_u32(1);

        let mut h2 = AuditHasher::new(b"DOMAIN_B");
        h2.update_u32(1);

        assert_ne!(h1.finalize(), h2.finalize());
    }

    #[test]
    fn test_order_matters() {
        let mut h1 = AuditHasher::for_round();
        h1.update_u32(1);
        h1.update_bool(true);

        let mut h2 = AuditHasher::for_round();
        h2.update_bool(true);
        h2.update_u32(1);

        assert_ne!(h1.finalize(), h2.finalize());
    }
}
