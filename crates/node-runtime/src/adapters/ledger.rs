//! Ledger adapter: serves the ROLA owner-key port and the poll holdings port
//! from one Gateway client.

use async_trait::async_trait;
use shared_types::{Address, EntityHoldings, LedgerError};
use tracing::warn;
use vp_02_rola::LedgerOwnerKeyOracle;
use vp_03_polls::LedgerHoldings;
use vp_04_gateway_client::GatewayClient;

/// Gateway-backed implementation of the outbound ledger ports.
#[derive(Clone)]
pub struct GatewayLedgerAdapter {
    client: GatewayClient,
}

impl GatewayLedgerAdapter {
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LedgerOwnerKeyOracle for GatewayLedgerAdapter {
    async fn owner_key_hints(&self, address: &Address) -> Result<Vec<String>, LedgerError> {
        self.client.owner_key_hints(address).await.map_err(|e| {
            warn!(address = %address, error = %e, "Owner key lookup failed");
            LedgerError::from(e)
        })
    }
}

#[async_trait]
impl LedgerHoldings for GatewayLedgerAdapter {
    async fn fungible_holdings(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<EntityHoldings>, LedgerError> {
        self.client.fungible_holdings(addresses).await.map_err(|e| {
            warn!(addresses = addresses.len(), error = %e, "Holdings lookup failed");
            LedgerError::from(e)
        })
    }
}
