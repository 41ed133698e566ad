//! # Gateway Client Configuration

use serde::{Deserialize, Serialize};

/// Most addresses the Gateway accepts in one entity-details request.
pub const MAX_ADDRESSES_PER_REQUEST: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayClientConfig {
    /// Gateway base URL, without trailing slash.
    pub base_url: String,
    /// Sent as `RDX-App-Name`.
    pub app_name: String,
    /// Sent as `RDX-App-Dapp-Definition`.
    pub dapp_definition_address: String,
    /// Chunk size for entity-details requests.
    pub max_addresses_per_request: usize,
    /// Per-request timeout in seconds. `None` waits for the Gateway
    /// indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GatewayClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://rcnet-v2.radixdlt.com".to_string(),
            app_name: "snapshot polling".to_string(),
            dapp_definition_address:
                "account_tdx_d_128656c7vqkww07ytfudjacjh2snf9z8t6slfrz2n7p9kwaz2ewnjyv"
                    .to_string(),
            max_addresses_per_request: MAX_ADDRESSES_PER_REQUEST,
            request_timeout_secs: None,
        }
    }
}

impl GatewayClientConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("base_url must be an http(s) URL, got '{}'", self.base_url));
        }
        if self.max_addresses_per_request == 0
            || self.max_addresses_per_request > MAX_ADDRESSES_PER_REQUEST
        {
            return Err(format!(
                "max_addresses_per_request must be 1..={MAX_ADDRESSES_PER_REQUEST}"
            ));
        }
        Ok(())
    }

    /// Full URL of the entity-details endpoint.
    pub fn entity_details_url(&self) -> String {
        format!("{}/state/entity/details", self.base_url.trim_end_matches('/'))
    }
}
