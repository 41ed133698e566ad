//! # Entity Details Models
//!
//! The subset of the Gateway's `/state/entity/details` request and response
//! this client reads. Unknown fields are ignored and missing collections
//! default to empty.

use serde::{Deserialize, Serialize};
use shared_types::{Address, EntityHoldings, ResourceHolding, VaultBalance};

/// Metadata key holding an entity's owner public-key hashes.
pub const OWNER_KEYS_METADATA_KEY: &str = "owner_keys";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDetailsRequest {
    pub addresses: Vec<Address>,
    /// Always `"Vault"`: balances broken down per vault.
    pub aggregation_level: String,
}

impl EntityDetailsRequest {
    pub fn vault_aggregated(addresses: Vec<Address>) -> Self {
        Self {
            addresses,
            aggregation_level: "Vault".to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EntityDetailsResponse {
    #[serde(default)]
    pub items: Vec<EntityDetailsItem>,
}

/// Generic paged collection (`{ total_count, items }`).
#[derive(Clone, Debug, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct EntityDetailsItem {
    pub address: Address,
    #[serde(default)]
    pub fungible_resources: Collection<FungibleResourceItem>,
    #[serde(default)]
    pub metadata: Collection<MetadataItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FungibleResourceItem {
    pub resource_address: Address,
    #[serde(default)]
    pub vaults: Collection<VaultItem>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VaultItem {
    pub vault_address: Address,
    pub amount: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: MetadataValue,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetadataValue {
    /// SBOR-encoded value as hex.
    #[serde(default)]
    pub raw_hex: String,
}

impl EntityDetailsItem {
    /// Raw hex of the `owner_keys` metadata entry, or `""` if unset.
    pub fn owner_keys_hex(&self) -> String {
        self.metadata
            .items
            .iter()
            .find(|item| item.key == OWNER_KEYS_METADATA_KEY)
            .map(|item| item.value.raw_hex.clone())
            .unwrap_or_default()
    }

    pub fn into_holdings(self) -> EntityHoldings {
        EntityHoldings {
            address: self.address,
            fungible: self
                .fungible_resources
                .items
                .into_iter()
                .map(|resource| ResourceHolding {
                    resource_address: resource.resource_address,
                    vaults: resource
                        .vaults
                        .items
                        .into_iter()
                        .map(|vault| VaultBalance {
                            vault_address: vault.vault_address,
                            amount: vault.amount,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
