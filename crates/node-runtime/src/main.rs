//! # Poll Node
//!
//! Entry point of the token-gated poll backend.
//!
//! ## Request Flow
//!
//! ```text
//! Wallet ──GET /create-challenge──→ ChallengeStore(1)
//!        ──POST /vote─────────────→ ChallengeStore(1) consume
//!                                        │
//!                                        ↓
//!                                   ROLA(2) ──owner_keys──→ Gateway(4)
//!                                        │
//!                                        ↓
//!                                   PollStore(3) record vote
//!
//! Admin  ──GET /close-poll/:id────→ PollStore(3) ──holdings──→ Gateway(4)
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Initialise logging (`RUST_LOG`, default `info`)
//! 2. Load configuration from `VP_*` environment variables and validate it
//! 3. Open the JSON store (exclusive lock)
//! 4. Build subsystems, restoring outstanding challenges
//! 5. Start the challenge purge task and the HTTP API
//! 6. Wait for Ctrl+C, then shut down gracefully

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::container::{NodeConfig, SubsystemContainer};
use shared_types::{JsonFileStore, KeyValueStore, SystemTimeSource, TimeSource};
use vp_01_challenge_store::purge_task;
use vp_05_api_gateway::ApiGatewayService;

/// The node runtime owning all long-running tasks.
struct NodeRuntime {
    container: SubsystemContainer,
    api: ApiGatewayService,
    purge_handle: Option<JoinHandle<()>>,
}

impl NodeRuntime {
    async fn new(config: NodeConfig) -> Result<Self> {
        config.validate().context("Invalid configuration")?;

        let store: Arc<dyn KeyValueStore> = Arc::new(
            JsonFileStore::open(&config.storage.db_path).with_context(|| {
                format!("Failed to open store at {}", config.storage.db_path.display())
            })?,
        );
        let clock: Arc<dyn TimeSource> = Arc::new(SystemTimeSource);

        let api_config = config.api.clone();
        let container = SubsystemContainer::build(config, store, clock).await?;
        let api = ApiGatewayService::new(api_config, container.app_state())
            .context("Failed to create API gateway")?;

        Ok(Self {
            container,
            api,
            purge_handle: None,
        })
    }

    async fn start(&mut self) -> Result<()> {
        info!("===========================================");
        info!("  Poll Node v{}", env!("CARGO_PKG_VERSION"));
        info!("===========================================");

        let interval = self.container.config.challenges.purge_interval();
        self.purge_handle = Some(tokio::spawn(purge_task(
            Arc::clone(&self.container.challenges),
            interval,
        )));

        let addr = self.api.start().await.context("Failed to start HTTP API")?;

        info!("HTTP API: http://{}", addr);
        info!("Store: {}", self.container.config.storage.db_path.display());
        info!("Gateway: {}", self.container.config.gateway.base_url);
        Ok(())
    }

    /// Stop accepting requests, drain in-flight ones, stop background tasks.
    async fn shutdown(&mut self) {
        info!("Initiating graceful shutdown...");
        self.api.shutdown().await;
        if let Some(handle) = self.purge_handle.take() {
            handle.abort();
        }
        info!("Shutdown complete");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = NodeConfig::from_env();

    let mut runtime = NodeRuntime::new(config).await?;
    runtime.start().await?;

    info!("Node is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    runtime.shutdown().await;

    Ok(())
}
