//! # Subsystem Container
//!
//! Holds every subsystem instance, wired to its adapters.
//!
//! ## Initialization Order
//!
//! ```text
//! Level 0: KeyValueStore, TimeSource, GatewayClient
//! Level 1: ChallengeStore (restored from the store), GatewayLedgerAdapter
//! Level 2: RolaService, PollStore (both read the ledger through the adapter)
//! Level 3: AppState for the HTTP API
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use shared_types::{KeyValueStore, TimeSource};
use tracing::info;
use vp_01_challenge_store::ChallengeStore;
use vp_02_rola::RolaService;
use vp_03_polls::PollStore;
use vp_04_gateway_client::GatewayClient;
use vp_05_api_gateway::AppState;

use crate::adapters::GatewayLedgerAdapter;
use crate::container::config::NodeConfig;

/// ROLA service reading owner keys from the Gateway.
pub type ConcreteRolaService = RolaService<GatewayLedgerAdapter>;

/// Poll store reading holdings from the Gateway.
pub type ConcretePollStore = PollStore<GatewayLedgerAdapter>;

/// Central container holding all subsystem instances.
pub struct SubsystemContainer {
    /// Node configuration the container was built from.
    pub config: NodeConfig,
    /// Challenge Store (Subsystem 1)
    pub challenges: Arc<ChallengeStore>,
    /// ROLA (Subsystem 2)
    pub rola: Arc<ConcreteRolaService>,
    /// Polls (Subsystem 3)
    pub polls: Arc<ConcretePollStore>,
}

impl SubsystemContainer {
    /// Build all subsystems over `store` and `clock`.
    pub async fn build(
        config: NodeConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self> {
        let gateway =
            GatewayClient::new(config.gateway.clone()).context("Failed to build Gateway client")?;
        let ledger = Arc::new(GatewayLedgerAdapter::new(gateway));
        info!(gateway = %config.gateway.base_url, "[vp-04] Gateway client ready");

        let challenges = Arc::new(
            ChallengeStore::restore(config.challenges.clone(), store.clone(), clock.clone())
                .await
                .context("Failed to restore challenges")?,
        );
        info!("[vp-01] Challenge store ready");

        let rola = Arc::new(RolaService::new(config.rola.clone(), ledger.clone()));
        info!(
            origin = %config.rola.expected_origin,
            network_id = config.rola.network_id,
            "[vp-02] ROLA ready"
        );

        let polls = Arc::new(PollStore::new(store, clock, ledger));
        info!("[vp-03] Poll store ready");

        Ok(Self {
            config,
            challenges,
            rola,
            polls,
        })
    }

    /// Handler state for the HTTP API.
    pub fn app_state(&self) -> AppState {
        AppState::new(
            self.challenges.clone(),
            self.rola.clone(),
            self.polls.clone(),
        )
    }
}
