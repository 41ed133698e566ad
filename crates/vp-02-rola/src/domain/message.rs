//! # Signature Message
//!
//! The wallet signs Blake2b-256 of:
//!
//! ```text
//! 'R' (0x52) ‖ challenge bytes ‖ len(dapp address) ‖ dapp address ‖ origin
//! ```
//!
//! where the length is a single byte and both strings are UTF-8.

use crate::domain::errors::MessageError;
use crate::domain::hashing::{blake2b_256, HASH_LENGTH};

/// Leading byte of every ROLA message.
pub const ROLA_PREFIX: u8 = b'R';

/// Assemble the unhashed signature message.
pub fn signature_message(
    challenge_hex: &str,
    dapp_definition_address: &str,
    origin: &str,
) -> Result<Vec<u8>, MessageError> {
    let challenge = hex::decode(challenge_hex).map_err(|_| MessageError::InvalidChallengeEncoding)?;
    let dapp = dapp_definition_address.as_bytes();
    let dapp_len = u8::try_from(dapp.len())
        .map_err(|_| MessageError::DappDefinitionAddressTooLong(dapp.len()))?;

    let mut message = Vec::with_capacity(2 + challenge.len() + dapp.len() + origin.len());
    message.push(ROLA_PREFIX);
    message.extend_from_slice(&challenge);
    message.push(dapp_len);
    message.extend_from_slice(dapp);
    message.extend_from_slice(origin.as_bytes());
    Ok(message)
}

/// Blake2b-256 of [`signature_message`]; the value that is actually signed.
pub fn signature_message_hash(
    challenge_hex: &str,
    dapp_definition_address: &str,
    origin: &str,
) -> Result<[u8; HASH_LENGTH], MessageError> {
    signature_message(challenge_hex, dapp_definition_address, origin).map(|m| blake2b_256(&m))
}
