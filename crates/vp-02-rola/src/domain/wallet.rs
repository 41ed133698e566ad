//! # Test Wallet
//!
//! Signs challenges the way a Radix wallet does, for tests in this crate and
//! downstream ones (enabled by the `test-utils` feature).

use crate::domain::address::derive_virtual_address;
use crate::domain::entities::{Curve, IdentityKind, Proof, SignedChallenge};
use crate::domain::hashing::HASH_LENGTH;
use crate::domain::message::signature_message_hash;
use ed25519_dalek::Signer;
use rand::rngs::OsRng;
use shared_types::Address;

enum Keys {
    Ed25519(ed25519_dalek::SigningKey),
    Secp256k1(k256::ecdsa::SigningKey),
}

/// A single-key wallet.
pub struct TestWallet {
    keys: Keys,
}

impl TestWallet {
    /// Random Ed25519 wallet.
    pub fn ed25519() -> Self {
        Self {
            keys: Keys::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng)),
        }
    }

    /// Deterministic Ed25519 wallet.
    pub fn ed25519_from_seed(seed: [u8; 32]) -> Self {
        Self {
            keys: Keys::Ed25519(ed25519_dalek::SigningKey::from_bytes(&seed)),
        }
    }

    /// Random secp256k1 wallet.
    pub fn secp256k1() -> Self {
        Self {
            keys: Keys::Secp256k1(k256::ecdsa::SigningKey::random(&mut OsRng)),
        }
    }

    pub fn curve(&self) -> Curve {
        match self.keys {
            Keys::Ed25519(_) => Curve::Curve25519,
            Keys::Secp256k1(_) => Curve::Secp256k1,
        }
    }

    /// Raw public key: 32 bytes for Ed25519, 33 compressed for secp256k1.
    pub fn public_key_bytes(&self) -> Vec<u8> {
        match &self.keys {
            Keys::Ed25519(key) => key.verifying_key().to_bytes().to_vec(),
            Keys::Secp256k1(key) => key
                .verifying_key()
                .to_encoded_point(true)
                .as_bytes()
                .to_vec(),
        }
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    /// Sign a message hash. secp256k1 signatures use the `[v, r, s]` layout.
    pub fn sign_hash(&self, hash: &[u8; HASH_LENGTH]) -> Vec<u8> {
        match &self.keys {
            Keys::Ed25519(key) => key.sign(hash).to_bytes().to_vec(),
            Keys::Secp256k1(key) => {
                let (signature, recovery_id) = key
                    .sign_prehash_recoverable(hash)
                    .expect("secp256k1 signing failed");
                let mut out = Vec::with_capacity(65);
                out.push(recovery_id.to_byte());
                out.extend_from_slice(&signature.to_bytes());
                out
            }
        }
    }

    /// Virtual address of this key for the given identity kind.
    pub fn virtual_address(&self, kind: IdentityKind, network_id: u8) -> Address {
        derive_virtual_address(kind, self.curve(), &self.public_key_bytes(), network_id)
            .expect("wallet key has no virtual address for this kind")
    }

    /// Build the signed challenge a wallet would send for `claimed_address`.
    pub fn sign_challenge(
        &self,
        challenge: &str,
        kind: IdentityKind,
        claimed_address: &Address,
        dapp_definition_address: &str,
        origin: &str,
    ) -> SignedChallenge {
        let hash = signature_message_hash(challenge, dapp_definition_address, origin)
            .expect("challenge must be hex");
        SignedChallenge {
            challenge: challenge.to_string(),
            identity_kind: kind.as_str().to_string(),
            claimed_address: claimed_address.clone(),
            proof: Proof {
                public_key: self.public_key_hex(),
                signature: hex::encode(self.sign_hash(&hash)),
                curve: self.curve().as_str().to_string(),
            },
        }
    }
}
