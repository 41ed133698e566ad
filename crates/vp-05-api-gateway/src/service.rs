//! API Gateway service - owns the HTTP server lifecycle.

use crate::domain::config::ApiConfig;
use crate::domain::error::GatewayError;
use crate::router::{build_router, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// API Gateway service state
pub struct ApiGatewayService {
    config: ApiConfig,
    state: AppState,
    shutdown_tx: Option<oneshot::Sender<()>>,
    server: Option<JoinHandle<()>>,
}

impl ApiGatewayService {
    /// Create a new API Gateway service
    pub fn new(config: ApiConfig, state: AppState) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        Ok(Self {
            config,
            state,
            shutdown_tx: None,
            server: None,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Bind the listener and serve in the background.
    ///
    /// Returns the bound address, which differs from the configured one
    /// when the configured port is ephemeral.
    pub async fn start(&mut self) -> Result<SocketAddr, GatewayError> {
        if self.server.is_some() {
            return Err(GatewayError::AlreadyStarted);
        }

        let listener = TcpListener::bind(self.config.http_addr())
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;

        let router = build_router(self.state.clone(), &self.config.cors);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = tokio::spawn(async move {
            let result = axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                error!(error = %e, "HTTP server error");
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server = Some(server);
        info!(addr = %addr, "HTTP server listening");
        Ok(addr)
    }

    /// Trigger graceful shutdown and wait for in-flight requests to finish.
    pub async fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(server) = self.server.take() {
            if let Err(e) = server.await {
                error!(error = %e, "HTTP server task failed");
            }
            info!("API Gateway stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{KeyValueStore, ManualTimeSource, MemoryStore, TimeSource};
    use std::net::{IpAddr, Ipv4Addr};
    use std::sync::Arc;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;
    use vp_01_challenge_store::{ChallengeConfig, ChallengeStore};
    use vp_02_rola::{MockOwnerKeyOracle, RolaConfig, RolaService};
    use vp_03_polls::{MockLedgerHoldings, PollStore};

    fn state() -> AppState {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let time: Arc<dyn TimeSource> = Arc::new(ManualTimeSource::new(0));
        AppState::new(
            Arc::new(ChallengeStore::new(
                ChallengeConfig::default(),
                store.clone(),
                time.clone(),
            )),
            Arc::new(RolaService::new(
                RolaConfig::default(),
                Arc::new(MockOwnerKeyOracle::new()),
            )),
            Arc::new(PollStore::new(
                store,
                time,
                Arc::new(MockLedgerHoldings::new()),
            )),
        )
    }

    fn loopback_config() -> ApiConfig {
        let mut config = ApiConfig::default();
        config.http.host = IpAddr::V4(Ipv4Addr::LOCALHOST);
        config.http.port = 0;
        config
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = ApiGatewayService::new(loopback_config(), state());
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }

    #[tokio::test]
    async fn test_start_serve_shutdown() {
        // Reserve a free port, then hand it to the service.
        let probe = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = probe.local_addr().unwrap().port();
        drop(probe);

        let mut config = loopback_config();
        config.http.port = port;
        let mut service = ApiGatewayService::new(config, state()).unwrap();
        let addr = service.start().await.unwrap();
        assert_eq!(addr.port(), port);
        assert!(matches!(
            service.start().await,
            Err(GatewayError::AlreadyStarted)
        ));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /status HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.ends_with(r#"{"status":"up"}"#));

        service.shutdown().await;
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
