//! # Virtual Address Derivation
//!
//! A virtual address is the address an entity has before anything is ever
//! written to the ledger for it, computed purely from a public key:
//!
//! ```text
//! node_id = entity_type ‖ Blake2b-256(public_key)[3..32]
//! address = bech32m(hrp, node_id)
//! ```
//!
//! The HRP is `account_` or `identity_` followed by the network suffix
//! (`rdx`, `tdx_d_`, ...).

use crate::domain::entities::{Curve, IdentityKind};
use crate::domain::errors::AddressError;
use crate::domain::hashing::public_key_hash_bytes;
use bech32::{Bech32m, Hrp};
use shared_types::Address;

/// Entity type byte of a virtual Ed25519 account.
pub const ENTITY_ED25519_ACCOUNT: u8 = 0x51;
/// Entity type byte of a virtual secp256k1 account.
pub const ENTITY_SECP256K1_ACCOUNT: u8 = 0xD1;
/// Entity type byte of a virtual Ed25519 identity.
pub const ENTITY_ED25519_IDENTITY: u8 = 0x52;
/// Entity type byte of a virtual secp256k1 identity.
pub const ENTITY_SECP256K1_IDENTITY: u8 = 0xD2;

const ED25519_KEY_LENGTH: usize = 32;
const SECP256K1_COMPRESSED_KEY_LENGTH: usize = 33;

/// HRP suffix for a network id.
pub fn network_hrp_suffix(network_id: u8) -> String {
    match network_id {
        0x01 => "rdx".to_string(),
        0x02 => "tdx_2_".to_string(),
        0x0A..=0x0E => format!("tdx_{}_", (b'a' + network_id - 0x0A) as char),
        0xF0 => "loc".to_string(),
        0xF1 => "test".to_string(),
        0xF2 => "sim".to_string(),
        other => format!("tdx_{other:x}_"),
    }
}

/// Bech32m-encode an entity node id for the given network.
fn encode_address(
    entity_type: u8,
    hrp_prefix: &str,
    public_key: &[u8],
    network_id: u8,
) -> Result<Address, AddressError> {
    let mut node_id = Vec::with_capacity(30);
    node_id.push(entity_type);
    node_id.extend_from_slice(&public_key_hash_bytes(public_key));

    let hrp = Hrp::parse(&format!("{hrp_prefix}_{}", network_hrp_suffix(network_id)))
        .map_err(|e| AddressError::Encoding(e.to_string()))?;
    bech32::encode::<Bech32m>(hrp, &node_id)
        .map(Address::new)
        .map_err(|e| AddressError::Encoding(e.to_string()))
}

fn require_length(
    public_key: &[u8],
    scheme: &'static str,
    expected: usize,
) -> Result<(), AddressError> {
    if public_key.len() == expected {
        Ok(())
    } else {
        Err(AddressError::InvalidPublicKeyLength {
            scheme,
            expected,
            actual: public_key.len(),
        })
    }
}

/// Derive the virtual address for a key.
///
/// Personas always derive an Ed25519 identity; accounts follow the curve.
pub fn derive_virtual_address(
    kind: IdentityKind,
    curve: Curve,
    public_key: &[u8],
    network_id: u8,
) -> Result<Address, AddressError> {
    match (kind, curve) {
        (IdentityKind::Persona, _) => {
            require_length(public_key, "ed25519 identity", ED25519_KEY_LENGTH)?;
            encode_address(ENTITY_ED25519_IDENTITY, "identity", public_key, network_id)
        }
        (IdentityKind::Account, Curve::Curve25519) => {
            require_length(public_key, "ed25519 account", ED25519_KEY_LENGTH)?;
            encode_address(ENTITY_ED25519_ACCOUNT, "account", public_key, network_id)
        }
        (IdentityKind::Account, Curve::Secp256k1) => {
            require_length(
                public_key,
                "secp256k1 account",
                SECP256K1_COMPRESSED_KEY_LENGTH,
            )?;
            encode_address(ENTITY_SECP256K1_ACCOUNT, "account", public_key, network_id)
        }
    }
}

/// Derives virtual addresses on a fixed network.
#[derive(Debug, Clone, Copy)]
pub struct AddressDeriver {
    network_id: u8,
}

impl AddressDeriver {
    pub fn new(network_id: u8) -> Self {
        Self { network_id }
    }

    pub fn network_id(&self) -> u8 {
        self.network_id
    }

    /// Derive from the wire strings of a signed challenge.
    pub fn derive(
        &self,
        identity_kind: &str,
        curve: &str,
        public_key_hex: &str,
    ) -> Result<Address, AddressError> {
        let kind: IdentityKind = identity_kind.parse()?;
        let curve: Curve = curve
            .parse()
            .map_err(|_| AddressError::Encoding(format!("no address scheme for curve {curve}")))?;
        let public_key = hex::decode(public_key_hex)
            .map_err(|e| AddressError::Encoding(format!("public key is not hex: {e}")))?;
        derive_virtual_address(kind, curve, &public_key, self.network_id)
    }
}
