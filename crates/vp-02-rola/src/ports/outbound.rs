//! # Outbound Ports (Driven Ports / SPI)

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, LedgerError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Reads the `owner_keys` metadata of an address from the ledger.
#[async_trait]
pub trait LedgerOwnerKeyOracle: Send + Sync {
    /// Raw-hex `owner_keys` entries for `address`.
    ///
    /// Returns an empty list (or empty strings) when the address has no
    /// owner keys set.
    async fn owner_key_hints(&self, address: &Address) -> Result<Vec<String>, LedgerError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// In-memory owner-key oracle.
#[derive(Default)]
pub struct MockOwnerKeyOracle {
    hints: RwLock<HashMap<Address, Vec<String>>>,
    /// Fail every lookup with `LedgerError::Unavailable`.
    pub should_fail: bool,
    calls: AtomicUsize,
}

impl MockOwnerKeyOracle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Default::default()
        }
    }

    /// Set the owner-key hints the ledger reports for `address`.
    pub fn set_hints(&self, address: Address, hints: Vec<String>) {
        self.hints.write().insert(address, hints);
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerOwnerKeyOracle for MockOwnerKeyOracle {
    async fn owner_key_hints(&self, address: &Address) -> Result<Vec<String>, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail {
            return Err(LedgerError::Unavailable("Mock failure".to_string()));
        }
        Ok(self.hints.read().get(address).cloned().unwrap_or_default())
    }
}
