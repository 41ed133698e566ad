//! # Signature Verification
//!
//! Verifies a proof signature over the 32-byte message hash.
//!
//! ## Curves
//!
//! - **curve25519**: Ed25519 over the hash bytes; 32-byte key, 64-byte signature.
//! - **secp256k1**: ECDSA over the hash as a prehash; 33-byte compressed key,
//!   65-byte signature laid out `[v, r, s]`. The recovery byte is dropped and
//!   S is normalised to the low half before verification.

use crate::domain::entities::{Curve, Proof};
use crate::domain::errors::SignatureError;
use crate::domain::hashing::HASH_LENGTH;
use ed25519_dalek::Verifier;
use k256::ecdsa::signature::hazmat::PrehashVerifier;

/// Length of a `[v, r, s]` secp256k1 signature.
pub const SECP256K1_SIGNATURE_LENGTH: usize = 65;

// =============================================================================
// SIGNATURE VERIFIER
// =============================================================================

/// Stateless verifier for both supported curves.
#[derive(Debug, Clone, Default)]
pub struct SignatureVerifier;

impl SignatureVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Verify a wire proof: parses the curve and hex fields, then verifies.
    pub fn verify_proof(
        &self,
        proof: &Proof,
        message_hash: &[u8; HASH_LENGTH],
    ) -> Result<(), SignatureError> {
        let curve: Curve = proof.curve.parse()?;
        let public_key = decode_hex("public key", &proof.public_key)?;
        let signature = decode_hex("signature", &proof.signature)?;
        self.verify(curve, &public_key, &signature, message_hash)
    }

    /// Verify raw key and signature bytes on the given curve.
    pub fn verify(
        &self,
        curve: Curve,
        public_key: &[u8],
        signature: &[u8],
        message_hash: &[u8; HASH_LENGTH],
    ) -> Result<(), SignatureError> {
        match curve {
            Curve::Curve25519 => verify_ed25519(public_key, signature, message_hash),
            Curve::Secp256k1 => verify_secp256k1(public_key, signature, message_hash),
        }
    }
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>, SignatureError> {
    hex::decode(value)
        .map_err(|e| SignatureError::InvalidPublicKeyEncoding(format!("{field} is not hex: {e}")))
}

/// Ed25519 over the raw 32 hash bytes.
fn verify_ed25519(
    public_key: &[u8],
    signature: &[u8],
    message_hash: &[u8; HASH_LENGTH],
) -> Result<(), SignatureError> {
    let key_bytes: [u8; ed25519_dalek::PUBLIC_KEY_LENGTH] = public_key.try_into().map_err(|_| {
        SignatureError::InvalidPublicKeyEncoding(format!(
            "ed25519 public key must be 32 bytes, got {}",
            public_key.len()
        ))
    })?;
    let key = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
        .map_err(|e| SignatureError::InvalidPublicKeyEncoding(e.to_string()))?;
    let signature = ed25519_dalek::Signature::from_slice(signature)
        .map_err(|e| SignatureError::InvalidPublicKeyEncoding(e.to_string()))?;

    key.verify(message_hash, &signature)
        .map_err(|_| SignatureError::InvalidSignature)
}

/// ECDSA secp256k1 over the hash as a prehash.
fn verify_secp256k1(
    public_key: &[u8],
    signature: &[u8],
    message_hash: &[u8; HASH_LENGTH],
) -> Result<(), SignatureError> {
    if signature.len() != SECP256K1_SIGNATURE_LENGTH {
        return Err(SignatureError::InvalidPublicKeyEncoding(format!(
            "secp256k1 signature must be 65 bytes, got {}",
            signature.len()
        )));
    }
    let key = k256::ecdsa::VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| SignatureError::InvalidPublicKeyEncoding(e.to_string()))?;

    // Skip the recovery byte. r or s outside [1, n-1] cannot verify.
    let signature = k256::ecdsa::Signature::from_slice(&signature[1..])
        .map_err(|_| SignatureError::InvalidSignature)?;
    let signature = signature.normalize_s().unwrap_or(signature);

    key.verify_prehash(message_hash, &signature)
        .map_err(|_| SignatureError::InvalidSignature)
}
