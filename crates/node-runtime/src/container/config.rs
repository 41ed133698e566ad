//! # Node Configuration
//!
//! Unified configuration for all subsystems, built from defaults overridden
//! by `VP_*` environment variables.

use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, warn};
use vp_01_challenge_store::ChallengeConfig;
use vp_02_rola::RolaConfig;
use vp_04_gateway_client::GatewayClientConfig;
use vp_05_api_gateway::ApiConfig;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// HTTP API configuration.
    pub api: ApiConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Ledger Gateway client configuration.
    pub gateway: GatewayClientConfig,
    /// ROLA configuration.
    pub rola: RolaConfig,
    /// Challenge store configuration.
    pub challenges: ChallengeConfig,
}

impl NodeConfig {
    /// Validate every subsystem section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api
            .validate()
            .map_err(|e| ConfigError::Invalid("api", e.to_string()))?;
        self.gateway
            .validate()
            .map_err(|e| ConfigError::Invalid("gateway", e))?;
        self.rola
            .validate()
            .map_err(|e| ConfigError::Invalid("rola", e))?;
        self.challenges
            .validate()
            .map_err(|e| ConfigError::Invalid("challenges", e))?;
        Ok(())
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by `lookup`, which maps a variable name to its value.
    ///
    /// Unparsable numeric or address values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(host) = lookup("VP_HTTP_HOST") {
            match host.parse::<IpAddr>() {
                Ok(ip) => config.api.http.host = ip,
                Err(_) => warn!(value = %host, "VP_HTTP_HOST is not an IP address"),
            }
        }
        if let Some(port) = parse_var(&lookup, "VP_HTTP_PORT") {
            config.api.http.port = port;
        }

        if let Some(path) = lookup("VP_DB_PATH") {
            config.storage.db_path = PathBuf::from(path);
        }

        if let Some(url) = lookup("VP_GATEWAY_URL") {
            config.gateway.base_url = url;
        }

        if let Some(origin) = lookup("VP_EXPECTED_ORIGIN") {
            config.rola.expected_origin = origin;
        }
        if let Some(address) = lookup("VP_DAPP_DEFINITION_ADDRESS") {
            info!(address = %address, "Using dApp definition address from environment");
            config.rola.dapp_definition_address = address.clone();
            config.gateway.dapp_definition_address = address;
        }
        if let Some(network_id) = parse_var(&lookup, "VP_NETWORK_ID") {
            config.rola.network_id = network_id;
        }

        if let Some(ttl) = parse_var(&lookup, "VP_CHALLENGE_TTL_SECS") {
            config.challenges.ttl_secs = ttl;
        }

        if let Some(origins) = lookup("VP_CORS_ORIGINS") {
            config.api.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect();
        }

        config
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key = key, value = %raw, "Ignoring unparsable environment value");
            None
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A subsystem section failed validation.
    #[error("invalid {0} configuration: {1}")]
    Invalid(&'static str, String),
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Path of the JSON document holding polls and challenges.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./db.json"),
        }
    }
}
