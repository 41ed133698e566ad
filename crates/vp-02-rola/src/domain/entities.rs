//! # ROLA Entities
//!
//! Wire types for a wallet's signed challenge and the small value types the
//! protocol steps pass between each other.

use crate::domain::errors::{AddressError, SignatureError};
use crate::domain::hashing::PUBLIC_KEY_HASH_LENGTH;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;
use std::str::FromStr;

/// Signature curve named in a proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    /// Ed25519 over Curve25519.
    Curve25519,
    /// ECDSA over secp256k1.
    Secp256k1,
}

impl Curve {
    pub fn as_str(&self) -> &'static str {
        match self {
            Curve::Curve25519 => "curve25519",
            Curve::Secp256k1 => "secp256k1",
        }
    }
}

impl FromStr for Curve {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "curve25519" => Ok(Curve::Curve25519),
            "secp256k1" => Ok(Curve::Secp256k1),
            other => Err(SignatureError::UnsupportedCurve(other.to_string())),
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What kind of ledger entity the wallet claims to control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    /// Identity (persona) entity.
    Persona,
    /// Account entity.
    Account,
}

impl IdentityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::Persona => "persona",
            IdentityKind::Account => "account",
        }
    }
}

impl FromStr for IdentityKind {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "persona" => Ok(IdentityKind::Persona),
            "account" => Ok(IdentityKind::Account),
            other => Err(AddressError::UnknownIdentityKind(other.to_string())),
        }
    }
}

/// Public key, signature and curve, all as the wallet sent them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    /// Hex-encoded public key.
    pub public_key: String,
    /// Hex-encoded signature.
    pub signature: String,
    /// `curve25519` or `secp256k1`.
    pub curve: String,
}

/// A wallet's response to a challenge.
///
/// Kind and address accept both the wallet SDK field names (`type`,
/// `address`) and the descriptive ones (`identityKind`, `claimedAddress`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedChallenge {
    /// Hex challenge the wallet signed.
    pub challenge: String,
    /// `persona` or `account`.
    #[serde(rename = "type", alias = "identityKind")]
    pub identity_kind: String,
    /// Address the wallet claims to control.
    #[serde(rename = "address", alias = "claimedAddress")]
    pub claimed_address: Address,
    pub proof: Proof,
}

/// Public key fingerprint: trailing 29 bytes of Blake2b-256(key).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKeyHash(pub [u8; PUBLIC_KEY_HASH_LENGTH]);

impl PublicKeyHash {
    /// Lowercase hex, the form the ledger embeds in owner-key metadata.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for PublicKeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Raw-hex encodings of the `owner_keys` metadata of an address.
///
/// Empty strings are dropped on construction, so an address with no
/// `owner_keys` entry reads as "not set".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OwnerKeyHints(Vec<String>);

impl OwnerKeyHints {
    pub fn new(hints: impl IntoIterator<Item = String>) -> Self {
        Self(hints.into_iter().filter(|h| !h.is_empty()).collect())
    }

    /// Whether the ledger reported any owner keys at all.
    pub fn is_set(&self) -> bool {
        !self.0.is_empty()
    }

    /// Case-insensitive substring match of the fingerprint in any hint.
    pub fn contains_fingerprint(&self, fingerprint: &PublicKeyHash) -> bool {
        let needle = fingerprint.to_hex().to_ascii_uppercase();
        self.0
            .iter()
            .any(|hint| hint.to_ascii_uppercase().contains(&needle))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
