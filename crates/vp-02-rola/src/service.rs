//! # ROLA Service
//!
//! Implements `AuthenticationApi` by running the protocol steps in order.
//! The address derivation and the ledger lookup are independent, so they run
//! concurrently; if both fail, the derivation error is reported.

use crate::config::RolaConfig;
use crate::domain::acceptance::accept;
use crate::domain::address::AddressDeriver;
use crate::domain::entities::{OwnerKeyHints, PublicKeyHash, SignedChallenge};
use crate::domain::errors::RolaError;
use crate::domain::hashing::public_key_hash_bytes;
use crate::domain::message::signature_message_hash;
use crate::domain::signature::SignatureVerifier;
use crate::ports::inbound::AuthenticationApi;
use crate::ports::outbound::LedgerOwnerKeyOracle;
use async_trait::async_trait;
use shared_types::Address;
use std::sync::Arc;
use tracing::{debug, warn};

/// ROLA verifier bound to one dApp, origin and network.
pub struct RolaService<O: LedgerOwnerKeyOracle> {
    config: RolaConfig,
    oracle: Arc<O>,
    verifier: SignatureVerifier,
    deriver: AddressDeriver,
}

impl<O: LedgerOwnerKeyOracle> RolaService<O> {
    pub fn new(config: RolaConfig, oracle: Arc<O>) -> Self {
        let deriver = AddressDeriver::new(config.network_id);
        Self {
            config,
            oracle,
            verifier: SignatureVerifier::new(),
            deriver,
        }
    }

    pub fn config(&self) -> &RolaConfig {
        &self.config
    }

    /// Fingerprint of a hex public key.
    fn fingerprint(public_key_hex: &str) -> Result<PublicKeyHash, RolaError> {
        let public_key =
            hex::decode(public_key_hex).map_err(|_| RolaError::CouldNotHashPublicKey)?;
        Ok(PublicKeyHash(public_key_hash_bytes(&public_key)))
    }
}

#[async_trait]
impl<O: LedgerOwnerKeyOracle> AuthenticationApi for RolaService<O> {
    async fn authenticate(&self, signed: &SignedChallenge) -> Result<Address, RolaError> {
        let fingerprint = Self::fingerprint(&signed.proof.public_key)?;

        let message_hash = signature_message_hash(
            &signed.challenge,
            &self.config.dapp_definition_address,
            &self.config.expected_origin,
        )
        .map_err(RolaError::CouldNotHashMessage)?;

        self.verifier.verify_proof(&signed.proof, &message_hash)?;

        let derive = async {
            self.deriver.derive(
                &signed.identity_kind,
                &signed.proof.curve,
                &signed.proof.public_key,
            )
        };
        let (derived, hints) =
            tokio::join!(derive, self.oracle.owner_key_hints(&signed.claimed_address));

        let derived = derived.map_err(RolaError::CouldNotDeriveAddressFromPublicKey)?;
        let hints = hints.map_err(|e| {
            warn!(address = %signed.claimed_address, error = %e, "Owner key lookup failed");
            RolaError::CouldNotVerifyPublicKeyOnLedger(e)
        })?;
        let hints = OwnerKeyHints::new(hints);

        debug!(
            claimed = %signed.claimed_address,
            derived = %derived,
            owner_keys_set = hints.is_set(),
            "ROLA proof verified, checking ownership"
        );

        accept(&fingerprint, &hints, &derived, &signed.claimed_address)
    }
}
