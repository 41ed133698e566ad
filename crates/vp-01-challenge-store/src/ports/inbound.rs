//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::Challenge;
use async_trait::async_trait;

/// Challenge issuance and single-use validation.
#[async_trait]
pub trait ChallengeApi: Send + Sync {
    /// Issue and persist a fresh challenge.
    async fn create(&self) -> Challenge;

    /// Consume `token`. Returns `true` only if it was known and unexpired.
    ///
    /// The token is removed even when it has expired, so a second call for
    /// the same token always returns `false`.
    async fn verify(&self, token: &str) -> bool;
}
