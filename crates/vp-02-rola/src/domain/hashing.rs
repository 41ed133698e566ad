//! # Blake2b-256 Hashing
//!
//! The ledger hashes everything (key fingerprints, signed messages, address
//! node ids) with Blake2b truncated to a 32-byte output.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Blake2b with a 32-byte output.
pub type Blake2b256 = Blake2b<U32>;

/// Hash output length.
pub const HASH_LENGTH: usize = 32;

/// Length of a public key fingerprint (trailing bytes of the hash).
pub const PUBLIC_KEY_HASH_LENGTH: usize = 29;

/// Blake2b-256 digest of `data`.
pub fn blake2b_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Trailing 29 bytes of Blake2b-256(`public_key`).
pub fn public_key_hash_bytes(public_key: &[u8]) -> [u8; PUBLIC_KEY_HASH_LENGTH] {
    let hash = blake2b_256(public_key);
    let mut out = [0u8; PUBLIC_KEY_HASH_LENGTH];
    out.copy_from_slice(&hash[HASH_LENGTH - PUBLIC_KEY_HASH_LENGTH..]);
    out
}
