//! # Challenge Store Configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Minimum entropy per challenge.
pub const MIN_TOKEN_BYTES: usize = 32;

/// Challenge store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ChallengeConfig {
    /// How long an issued challenge stays valid, in seconds.
    pub ttl_secs: u64,
    /// Random bytes per challenge (hex-encoded on the wire).
    pub token_bytes: usize,
    /// How often the background task drops expired challenges, in seconds.
    pub purge_interval_secs: u64,
}

impl Default for ChallengeConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 60,
            token_bytes: MIN_TOKEN_BYTES,
            purge_interval_secs: 300,
        }
    }
}

impl ChallengeConfig {
    /// Challenge lifetime.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Purge interval.
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs == 0 {
            return Err("challenge ttl_secs cannot be 0".into());
        }
        if self.token_bytes < MIN_TOKEN_BYTES {
            return Err(format!(
                "challenge token_bytes must be at least {}",
                MIN_TOKEN_BYTES
            ));
        }
        if self.purge_interval_secs == 0 {
            return Err("challenge purge_interval_secs cannot be 0".into());
        }
        Ok(())
    }
}
