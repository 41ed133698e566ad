//! # ROLA Subsystem (VP-02)
//!
//! Off-ledger authentication: resolves a wallet-signed challenge to the
//! ledger address that controls it.
//!
//! ## Architecture
//!
//! This subsystem follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): hashing, message reconstruction, signature
//!   verification, address derivation and the acceptance rule. No I/O.
//! - **Ports Layer** (`ports/`): `AuthenticationApi` (inbound) and
//!   `LedgerOwnerKeyOracle` (outbound).
//! - **Service Layer** (`service.rs`): runs the protocol steps in order.
//!
//! ## Protocol
//!
//! 1. Fingerprint the public key: trailing 29 bytes of Blake2b-256.
//! 2. Rebuild the signed message: `'R' ‖ challenge ‖ len(dapp) ‖ dapp ‖ origin`,
//!    hashed with Blake2b-256.
//! 3. Verify the signature (Ed25519 or secp256k1) over that hash.
//! 4. Concurrently derive the virtual address and fetch the claimed
//!    address's owner-key hints from the ledger.
//! 5. Accept if a hint contains the fingerprint, or if no hints are set and
//!    the derived address equals the claimed one.
//!
//! ## Security Notes
//!
//! - Challenge single-use is enforced by the challenge store, not here.
//! - Both acceptance paths are required: key-rotated accounts only pass via
//!   ledger hints, never-used accounts only via derived-address equality.

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::RolaConfig;
pub use domain::acceptance::accept;
pub use domain::address::{derive_virtual_address, network_hrp_suffix, AddressDeriver};
pub use domain::entities::{Curve, IdentityKind, OwnerKeyHints, Proof, PublicKeyHash, SignedChallenge};
pub use domain::errors::{AddressError, MessageError, RolaError, SignatureError};
pub use domain::hashing::blake2b_256;
pub use domain::message::{signature_message, signature_message_hash};
pub use domain::signature::SignatureVerifier;
#[cfg(any(test, feature = "test-utils"))]
pub use domain::wallet::TestWallet;
pub use ports::inbound::AuthenticationApi;
pub use ports::outbound::{LedgerOwnerKeyOracle, MockOwnerKeyOracle};
pub use service::RolaService;
