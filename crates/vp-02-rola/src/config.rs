//! # ROLA Configuration
//!
//! The three values the wallet bakes into every signed message: the dApp
//! definition address, the origin the dApp is served from, and the network
//! the addresses live on.

use serde::{Deserialize, Serialize};

/// Default network: Ansharnet (0x0d).
pub const DEFAULT_NETWORK_ID: u8 = 0x0d;

/// ROLA verifier configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RolaConfig {
    /// Origin the wallet saw the dApp running at (e.g. `https://dapp.example`).
    pub expected_origin: String,
    /// The dApp definition account address.
    pub dapp_definition_address: String,
    /// Network id used for virtual address derivation.
    pub network_id: u8,
}

impl Default for RolaConfig {
    fn default() -> Self {
        Self {
            expected_origin: "http://localhost:3000".to_string(),
            dapp_definition_address:
                "account_tdx_d_128656c7vqkww07ytfudjacjh2snf9z8t6slfrz2n7p9kwaz2ewnjyv"
                    .to_string(),
            network_id: DEFAULT_NETWORK_ID,
        }
    }
}

impl RolaConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.expected_origin.is_empty() {
            return Err("expected_origin cannot be empty".into());
        }
        if self.dapp_definition_address.is_empty() {
            return Err("dapp_definition_address cannot be empty".into());
        }
        // The signed message carries the address length in a single byte.
        if self.dapp_definition_address.len() > u8::MAX as usize {
            return Err(format!(
                "dapp_definition_address is {} bytes, maximum is 255",
                self.dapp_definition_address.len()
            ));
        }
        Ok(())
    }
}
