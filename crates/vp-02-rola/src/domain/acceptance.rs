//! # Acceptance Rule
//!
//! Decides whether a verified key controls the claimed address.
//!
//! - If the ledger has `owner_keys` set for the claimed address, one of them
//!   must contain the key fingerprint.
//! - If not, the address is still virtual, so the address derived from the
//!   key must equal the claimed one.
//!
//! The derived address is returned either way.

use crate::domain::entities::{OwnerKeyHints, PublicKeyHash};
use crate::domain::errors::RolaError;
use shared_types::Address;

pub fn accept(
    fingerprint: &PublicKeyHash,
    hints: &OwnerKeyHints,
    derived: &Address,
    claimed: &Address,
) -> Result<Address, RolaError> {
    let authorised = if hints.is_set() {
        hints.contains_fingerprint(fingerprint)
    } else {
        derived == claimed
    };

    if authorised {
        Ok(derived.clone())
    } else {
        Err(RolaError::InvalidPublicKey)
    }
}
