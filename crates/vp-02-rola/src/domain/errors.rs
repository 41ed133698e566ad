//! # ROLA Errors
//!
//! Error types for each protocol step, plus the `RolaError` the service
//! returns. `RolaError::reason` is the stable kind string reported to HTTP
//! clients.

use shared_types::LedgerError;
use thiserror::Error;

/// Signature verification failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureError {
    /// Curve is not `curve25519` or `secp256k1`.
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// The signature does not verify over the message.
    #[error("Signature verification failed")]
    InvalidSignature,

    /// Key or signature bytes could not be parsed.
    #[error("Invalid key material: {0}")]
    InvalidPublicKeyEncoding(String),
}

/// Virtual address derivation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AddressError {
    /// Identity kind is neither `persona` nor `account`.
    #[error("Unknown identity kind: {0}")]
    UnknownIdentityKind(String),

    /// Key length does not match what the derivation scheme expects.
    #[error("Public key must be {expected} bytes for {scheme}, got {actual}")]
    InvalidPublicKeyLength {
        scheme: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Bech32m encoding failed.
    #[error("Address encoding failed: {0}")]
    Encoding(String),
}

/// Signature message reconstruction failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    /// Challenge is not valid hex.
    #[error("Challenge is not hex encoded")]
    InvalidChallengeEncoding,

    /// Address length does not fit the one-byte length prefix.
    #[error("dApp definition address is {0} bytes, maximum is 255")]
    DappDefinitionAddressTooLong(usize),
}

/// Authentication protocol failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RolaError {
    /// Public key is not hex; no fingerprint could be computed.
    #[error("Could not hash public key")]
    CouldNotHashPublicKey,

    /// The signature message could not be rebuilt.
    #[error("Could not hash signature message: {0}")]
    CouldNotHashMessage(MessageError),

    /// Proof names a curve we do not verify.
    #[error("Unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// Signature does not verify.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Key or signature material is malformed.
    #[error("Invalid public key in proof: {0}")]
    VerifyProofInvalidPublicKey(String),

    /// No virtual address could be derived for this key and identity kind.
    #[error("Could not derive address from public key: {0}")]
    CouldNotDeriveAddressFromPublicKey(AddressError),

    /// The ledger owner-key lookup failed.
    #[error("Could not verify public key on ledger: {0}")]
    CouldNotVerifyPublicKeyOnLedger(LedgerError),

    /// The key is not authorised for the claimed address.
    #[error("Public key does not control the claimed address")]
    InvalidPublicKey,

    /// Challenge unknown, already used, or expired.
    #[error("Invalid or expired challenge")]
    InvalidChallenge,
}

impl RolaError {
    /// Stable kind string surfaced to callers.
    pub fn reason(&self) -> &'static str {
        match self {
            RolaError::CouldNotHashPublicKey => "couldNotHashPublicKey",
            RolaError::CouldNotHashMessage(_) => "couldNotHashMessage",
            RolaError::UnsupportedCurve(_) => "unsupportedCurve",
            RolaError::InvalidSignature => "invalidSignature",
            RolaError::VerifyProofInvalidPublicKey(_) => "verifyProofInvalidPublicKey",
            RolaError::CouldNotDeriveAddressFromPublicKey(_) => {
                "couldNotDeriveAddressFromPublicKey"
            }
            RolaError::CouldNotVerifyPublicKeyOnLedger(_) => "couldNotVerifyPublicKeyOnLedger",
            RolaError::InvalidPublicKey => "invalidPublicKey",
            RolaError::InvalidChallenge => "invalidChallenge",
        }
    }
}

impl From<SignatureError> for RolaError {
    fn from(e: SignatureError) -> Self {
        match e {
            SignatureError::UnsupportedCurve(curve) => RolaError::UnsupportedCurve(curve),
            SignatureError::InvalidSignature => RolaError::InvalidSignature,
            SignatureError::InvalidPublicKeyEncoding(detail) => {
                RolaError::VerifyProofInvalidPublicKey(detail)
            }
        }
    }
}
