//! # Challenge Entities

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// An issued challenge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// Hex-encoded random token.
    pub value: String,
    /// Expiry, milliseconds since the Unix epoch.
    pub expires_at: Timestamp,
}

impl Challenge {
    /// Draw a fresh token of `token_bytes` random bytes from the OS RNG.
    pub fn generate(token_bytes: usize, expires_at: Timestamp) -> Self {
        let mut bytes = vec![0u8; token_bytes];
        OsRng.fill_bytes(&mut bytes);
        Self {
            value: hex::encode(bytes),
            expires_at,
        }
    }
}

/// Persisted form of a challenge (`{"expires": <ms>}` keyed by token).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
    #[serde(rename = "expires")]
    pub expires_at: Timestamp,
}

impl ChallengeRecord {
    /// Still valid at `now`.
    pub fn is_fresh(&self, now: Timestamp) -> bool {
        self.expires_at > now
    }
}
