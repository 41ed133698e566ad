//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::SignedChallenge;
use crate::domain::errors::RolaError;
use async_trait::async_trait;
use shared_types::Address;

/// Resolves a signed challenge to the address its key controls.
#[async_trait]
pub trait AuthenticationApi: Send + Sync {
    /// Verify the proof and ownership claim.
    ///
    /// Challenge freshness is not checked here; callers consume the
    /// challenge first.
    async fn authenticate(&self, signed: &SignedChallenge) -> Result<Address, RolaError>;
}
