//! # Gateway HTTP Client

use crate::config::GatewayClientConfig;
use crate::errors::GatewayClientError;
use crate::models::{EntityDetailsItem, EntityDetailsRequest, EntityDetailsResponse};
use futures::future::try_join_all;
use reqwest::Client;
use shared_types::{Address, EntityHoldings};
use std::time::Duration;
use tracing::debug;

const APP_NAME_HEADER: &str = "RDX-App-Name";
const DAPP_DEFINITION_HEADER: &str = "RDX-App-Dapp-Definition";

/// Ledger Gateway API client.
#[derive(Clone)]
pub struct GatewayClient {
    config: GatewayClientConfig,
    client: Client,
}

impl GatewayClient {
    pub fn new(config: GatewayClientConfig) -> Result<Self, GatewayClientError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &GatewayClientConfig {
        &self.config
    }

    /// Vault-aggregated entity details for `addresses`.
    ///
    /// Requests are split into chunks of at most
    /// `max_addresses_per_request`, sent concurrently. The result order is
    /// whatever the Gateway returned; match items by `address`.
    pub async fn entity_details(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<EntityDetailsItem>, GatewayClientError> {
        if addresses.is_empty() {
            return Ok(Vec::new());
        }

        let chunk_size = self.config.max_addresses_per_request.max(1);
        let requests = addresses
            .chunks(chunk_size)
            .map(|chunk| self.entity_details_page(chunk));
        let pages = try_join_all(requests).await?;

        Ok(pages.into_iter().flatten().collect())
    }

    async fn entity_details_page(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<EntityDetailsItem>, GatewayClientError> {
        let url = self.config.entity_details_url();
        let body = EntityDetailsRequest::vault_aggregated(addresses.to_vec());

        let resp = self
            .client
            .post(&url)
            .header(APP_NAME_HEADER, &self.config.app_name)
            .header(DAPP_DEFINITION_HEADER, &self.config.dapp_definition_address)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(GatewayClientError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let response: EntityDetailsResponse = serde_json::from_str(&text)?;
        debug!(
            requested = addresses.len(),
            returned = response.items.len(),
            "Entity details fetched"
        );
        Ok(response.items)
    }

    /// Raw-hex `owner_keys` metadata for `address`; `""` entries mean unset.
    pub async fn owner_key_hints(&self, address: &Address) -> Result<Vec<String>, GatewayClientError> {
        let items = self.entity_details(std::slice::from_ref(address)).await?;
        Ok(items.iter().map(EntityDetailsItem::owner_keys_hex).collect())
    }

    /// Fungible holdings for each address, in Gateway order.
    pub async fn fungible_holdings(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<EntityHoldings>, GatewayClientError> {
        let items = self.entity_details(addresses).await?;
        Ok(items.into_iter().map(EntityDetailsItem::into_holdings).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::entity_details_json;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorded {
        calls: AtomicUsize,
        batch_sizes: Mutex<Vec<usize>>,
        headers: Mutex<Vec<(String, String)>>,
    }

    /// Echoes every requested address back, in reverse order, with one vault
    /// of `resource_vote` for addresses ending in `_rich`.
    async fn echo_details(
        State(recorded): State<Arc<Recorded>>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        recorded.calls.fetch_add(1, Ordering::SeqCst);
        let addresses: Vec<String> = serde_json::from_value(body["addresses"].clone()).unwrap();
        recorded.batch_sizes.lock().unwrap().push(addresses.len());
        for name in [APP_NAME_HEADER, DAPP_DEFINITION_HEADER] {
            let value = headers.get(name).unwrap().to_str().unwrap().to_string();
            recorded.headers.lock().unwrap().push((name.to_string(), value));
        }
        assert_eq!(body["aggregation_level"], "Vault");

        let items: Vec<Value> = addresses
            .iter()
            .rev()
            .map(|address| {
                let resources = if address.ends_with("_rich") {
                    json!([{
                        "resource_address": "resource_vote",
                        "vaults": {"items": [{"vault_address": "internal_vault_1", "amount": "1"}]}
                    }])
                } else {
                    json!([])
                };
                json!({
                    "address": address,
                    "fungible_resources": {"items": resources},
                    "metadata": {"items": []}
                })
            })
            .collect();
        Json(json!({ "items": items }))
    }

    async fn spawn(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> GatewayClient {
        GatewayClient::new(GatewayClientConfig {
            base_url,
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_large_requests_are_chunked() {
        let recorded = Arc::new(Recorded::default());
        let router = Router::new()
            .route("/state/entity/details", post(echo_details))
            .with_state(recorded.clone());
        let gateway = client(spawn(router).await);

        let addresses: Vec<Address> = (0..45)
            .map(|i| {
                if i % 2 == 0 {
                    Address::new(format!("account_{i}_rich"))
                } else {
                    Address::new(format!("account_{i}"))
                }
            })
            .collect();
        let holdings = gateway.fungible_holdings(&addresses).await.unwrap();

        assert_eq!(holdings.len(), 45);
        assert_eq!(recorded.calls.load(Ordering::SeqCst), 3);
        let mut sizes = recorded.batch_sizes.lock().unwrap().clone();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![5, 20, 20]);

        let rich = holdings
            .iter()
            .filter(|h| h.holds(&Address::new("resource_vote")))
            .count();
        assert_eq!(rich, 23);
    }

    #[tokio::test]
    async fn test_sends_application_headers() {
        let recorded = Arc::new(Recorded::default());
        let router = Router::new()
            .route("/state/entity/details", post(echo_details))
            .with_state(recorded.clone());
        let gateway = client(spawn(router).await);

        gateway.fungible_holdings(&[Address::new("account_a")]).await.unwrap();

        let headers = recorded.headers.lock().unwrap().clone();
        assert!(headers.contains(&(APP_NAME_HEADER.to_string(), "snapshot polling".to_string())));
        assert!(headers.iter().any(|(name, value)| {
            name == DAPP_DEFINITION_HEADER && value.starts_with("account_tdx_d_")
        }));
    }

    #[tokio::test]
    async fn test_owner_key_hints() {
        let router = Router::new().route(
            "/state/entity/details",
            post(|| async { Json(entity_details_json()) }),
        );
        let gateway = client(spawn(router).await);

        let hints = gateway.owner_key_hints(&Address::new("account_a")).await.unwrap();
        assert_eq!(hints, vec!["".to_string(), "5c2102220001c0a1b2c3".to_string()]);
    }

    #[tokio::test]
    async fn test_error_status() {
        let router = Router::new().route(
            "/state/entity/details",
            post(|| async { (StatusCode::BAD_REQUEST, "bad address") }),
        );
        let gateway = client(spawn(router).await);

        let err = gateway
            .fungible_holdings(&[Address::new("nope")])
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GatewayClientError::Status { status: 400, ref body } if body == "bad address"
        ));
    }

    #[tokio::test]
    async fn test_empty_request_skips_network() {
        let gateway = client("http://127.0.0.1:9".to_string());
        assert!(gateway.fungible_holdings(&[]).await.unwrap().is_empty());
    }

    async fn slow_details() -> Json<Value> {
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        Json(json!({ "items": [] }))
    }

    #[tokio::test]
    async fn test_slow_gateway_waited_for_without_timeout() {
        let router = Router::new().route("/state/entity/details", post(slow_details));
        let gateway = client(spawn(router).await);
        assert!(gateway
            .fungible_holdings(&[Address::new("account_a")])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        let router = Router::new().route("/state/entity/details", post(slow_details));
        let gateway = GatewayClient::new(GatewayClientConfig {
            base_url: spawn(router).await,
            request_timeout_secs: Some(1),
            ..Default::default()
        })
        .unwrap();
        assert!(gateway
            .fungible_holdings(&[Address::new("account_a")])
            .await
            .is_err());
    }
}
