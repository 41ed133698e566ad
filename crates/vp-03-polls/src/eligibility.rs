//! # Voter Eligibility Verifier
//!
//! Queries the ledger once for every distinct voter and keeps the votes
//! whose voter currently holds the poll's vote token.

use crate::domain::entities::Vote;
use crate::domain::filter::{distinct_voters, retain_eligible};
use crate::ports::outbound::LedgerHoldings;
use shared_types::{Address, LedgerError};
use std::sync::Arc;
use tracing::debug;

pub struct VoterEligibilityVerifier<L: LedgerHoldings + ?Sized> {
    ledger: Arc<L>,
}

impl<L: LedgerHoldings + ?Sized> VoterEligibilityVerifier<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Filter `votes` down to those whose voter holds `resource` now.
    pub async fn verify(&self, resource: &Address, votes: &[Vote]) -> Result<Vec<Vote>, LedgerError> {
        if votes.is_empty() {
            return Ok(Vec::new());
        }

        let voters = distinct_voters(votes);
        let holdings = self.ledger.fungible_holdings(&voters).await?;
        let eligible = retain_eligible(votes, &holdings, resource);

        debug!(
            resource = %resource,
            voters = voters.len(),
            cast = votes.len(),
            eligible = eligible.len(),
            "Voter eligibility checked"
        );
        Ok(eligible)
    }
}
