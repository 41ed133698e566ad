//! # Core Entities
//!
//! Identity types shared by the authentication and polling subsystems.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// A bech32m-encoded ledger address (`account_...`, `identity_...`,
/// `resource_...`).
///
/// The string is kept verbatim; comparisons are exact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for Address {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

// =============================================================================
// LEDGER HOLDINGS
// =============================================================================

/// Balance of one vault. `amount` is the ledger's decimal string, kept
/// verbatim so no precision is lost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultBalance {
    pub vault_address: Address,
    pub amount: String,
}

impl VaultBalance {
    /// True if the amount is a positive decimal (`"0"`, `"0.000"` are zero).
    ///
    /// Anything that is not plain `digits[.digits]` (signs, exponents,
    /// whitespace, empty) counts as zero.
    pub fn is_nonzero(&self) -> bool {
        let (whole, fraction) = match self.amount.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (self.amount.as_str(), ""),
        };
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) {
            return false;
        }
        if self.amount.ends_with('.') {
            return false;
        }
        whole.bytes().chain(fraction.bytes()).any(|b| b != b'0')
    }
}

/// The vaults an entity keeps for one fungible resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHolding {
    pub resource_address: Address,
    pub vaults: Vec<VaultBalance>,
}

/// Fungible resources held by one ledger entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHoldings {
    pub address: Address,
    pub fungible: Vec<ResourceHolding>,
}

impl EntityHoldings {
    /// Whether some vault of `resource` holds a nonzero amount.
    pub fn holds(&self, resource: &Address) -> bool {
        self.fungible
            .iter()
            .filter(|holding| &holding.resource_address == resource)
            .any(|holding| holding.vaults.iter().any(VaultBalance::is_nonzero))
    }
}
