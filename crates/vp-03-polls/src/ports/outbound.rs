//! # Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, EntityHoldings, LedgerError, ResourceHolding, VaultBalance};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

/// Reads current fungible holdings from the ledger.
#[async_trait]
pub trait LedgerHoldings: Send + Sync {
    /// Holdings for each address, in no particular order.
    ///
    /// Addresses the ledger knows nothing about may be missing from the
    /// result or present with no resources.
    async fn fungible_holdings(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<EntityHoldings>, LedgerError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory ledger holdings.
///
/// Answers in reverse request order, so callers that zip by position fail.
#[derive(Default)]
pub struct MockLedgerHoldings {
    balances: RwLock<HashMap<Address, Vec<ResourceHolding>>>,
    should_fail: AtomicBool,
    calls: AtomicUsize,
    last_request: RwLock<Vec<Address>>,
    delay: RwLock<Duration>,
}

impl MockLedgerHoldings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give `address` a single vault of `resource` holding `amount`.
    pub fn set_balance(&self, address: Address, resource: Address, amount: &str) {
        let mut balances = self.balances.write();
        let holdings = balances.entry(address).or_default();
        holdings.retain(|h| h.resource_address != resource);
        holdings.push(ResourceHolding {
            resource_address: resource,
            vaults: vec![VaultBalance {
                vault_address: Address::new("internal_vault_mock"),
                amount: amount.to_string(),
            }],
        });
    }

    /// Make subsequent queries fail with `LedgerError::Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Sleep for `delay` before answering, so other tasks run mid-query.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.write() = delay;
    }

    /// Number of queries served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Addresses of the most recent query.
    pub fn last_request(&self) -> Vec<Address> {
        self.last_request.read().clone()
    }
}

#[async_trait]
impl LedgerHoldings for MockLedgerHoldings {
    async fn fungible_holdings(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<EntityHoldings>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.write() = addresses.to_vec();
        let delay = *self.delay.read();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(LedgerError::Unavailable("Mock failure".to_string()));
        }

        let balances = self.balances.read();
        Ok(addresses
            .iter()
            .rev()
            .map(|address| EntityHoldings {
                address: address.clone(),
                fungible: balances.get(address).cloned().unwrap_or_default(),
            })
            .collect())
    }
}
