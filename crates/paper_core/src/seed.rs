//! Deterministic random generators derived from string keys

use rand::rngs::StdRng;
use rand::SeedableRng;
use sha2::{Digest, Sha256};

/// Build a generator seeded from the SHA-256 of `key`.
///
/// The same key always yields the same stream, so callers thread the
/// generator explicitly instead of sharing one.
pub fn seeded_rng(key: &str) -> StdRng {
    StdRng::seed_from_u64(seed_from_key(key))
}

/// First eight digest bytes of `key`, big-endian
pub fn seed_from_key(key: &str) -> u64 {
    let digest = Sha256::digest(key.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
