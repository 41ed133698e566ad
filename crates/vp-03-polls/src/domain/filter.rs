//! # Eligibility Filter
//!
//! Pure half of voter eligibility: given the ledger's holdings for each
//! voter, keep the votes whose voter holds the token.

use crate::domain::entities::Vote;
use shared_types::{Address, EntityHoldings};
use std::collections::{HashMap, HashSet};

/// Distinct voter addresses in first-vote order.
pub fn distinct_voters(votes: &[Vote]) -> Vec<Address> {
    let mut seen = HashSet::new();
    votes
        .iter()
        .filter(|vote| seen.insert(&vote.voter))
        .map(|vote| vote.voter.clone())
        .collect()
}

/// Keep votes whose voter holds a nonzero amount of `resource`.
///
/// `holdings` may be in any order; it is matched to votes by address. A voter
/// missing from `holdings` is treated as holding nothing.
pub fn retain_eligible(votes: &[Vote], holdings: &[EntityHoldings], resource: &Address) -> Vec<Vote> {
    let by_address: HashMap<&Address, &EntityHoldings> =
        holdings.iter().map(|h| (&h.address, h)).collect();

    votes
        .iter()
        .filter(|vote| {
            by_address
                .get(&vote.voter)
                .is_some_and(|holdings| holdings.holds(resource))
        })
        .cloned()
        .collect()
}
