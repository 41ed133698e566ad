//! # HTTP End-to-End
//!
//! The node's HTTP API (vp-05) over the real subsystem container, with the
//! ledger Gateway (vp-04) replaced by a local axum server.
//!
//! ## Flow Tested:
//!
//! 1. `GET /create-challenge` → wallet signs → `POST /vote`
//! 2. ROLA reads `owner_keys` through the Gateway client
//! 3. `GET /close-poll/:id` filters votes through Gateway holdings

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::extract::State;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use node_runtime::{NodeConfig, SubsystemContainer};
    use shared_types::{KeyValueStore, ManualTimeSource, MemoryStore, TimeSource};
    use vp_02_rola::{IdentityKind, TestWallet};
    use vp_05_api_gateway::{build_router, CorsConfig};

    // =============================================================================
    // FAKE GATEWAY
    // =============================================================================

    const NOW: u64 = 1_700_000_000_000;
    const RESOURCE: &str = "resource_tdx_d_1vote";

    #[derive(Default)]
    struct FakeLedger {
        /// address → (resource, amount)
        balances: Mutex<HashMap<String, (String, String)>>,
        /// address → owner_keys raw hex
        owner_keys: Mutex<HashMap<String, String>>,
    }

    async fn entity_details(
        State(ledger): State<Arc<FakeLedger>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let balances = ledger.balances.lock().unwrap();
        let owner_keys = ledger.owner_keys.lock().unwrap();
        let items: Vec<Value> = body["addresses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|address| {
                let address = address.as_str().unwrap();
                let resources = match balances.get(address) {
                    Some((resource, amount)) => json!([{
                        "aggregation_level": "Vault",
                        "resource_address": resource,
                        "vaults": {"items": [{"vault_address": "internal_vault_1", "amount": amount}]}
                    }]),
                    None => json!([]),
                };
                let metadata = match owner_keys.get(address) {
                    Some(raw_hex) => json!([{"key": "owner_keys", "value": {"raw_hex": raw_hex}}]),
                    None => json!([]),
                };
                json!({
                    "address": address,
                    "fungible_resources": {"items": resources},
                    "metadata": {"items": metadata}
                })
            })
            .collect();
        Json(json!({ "items": items }))
    }

    async fn spawn_gateway(ledger: Arc<FakeLedger>) -> String {
        let router = Router::new()
            .route("/state/entity/details", post(entity_details))
            .with_state(ledger);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Node {
        router: Router,
        clock: Arc<ManualTimeSource>,
        ledger: Arc<FakeLedger>,
        config: NodeConfig,
    }

    async fn node() -> Node {
        let ledger = Arc::new(FakeLedger::default());
        let mut config = NodeConfig::default();
        config.gateway.base_url = spawn_gateway(ledger.clone()).await;

        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualTimeSource::new(NOW));
        let time: Arc<dyn TimeSource> = clock.clone();
        let container = SubsystemContainer::build(config.clone(), store, time)
            .await
            .unwrap();

        Node {
            router: build_router(container.app_state(), &CorsConfig::default()),
            clock,
            ledger,
            config,
        }
    }

    impl Node {
        async fn call(
            &self,
            method: Method,
            uri: &str,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };
            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        async fn signed_challenge(&self, wallet: &TestWallet) -> Value {
            let (_, body) = self.call(Method::GET, "/create-challenge", None).await;
            let challenge = body["challenge"].as_str().unwrap();
            let network_id = self.config.rola.network_id;
            let address = wallet.virtual_address(IdentityKind::Account, network_id);
            let signed = wallet.sign_challenge(
                challenge,
                IdentityKind::Account,
                &address,
                &self.config.rola.dapp_definition_address,
                &self.config.rola.expected_origin,
            );
            serde_json::to_value(signed).unwrap()
        }

        async fn vote(&self, poll_id: &str, wallet: &TestWallet, choice: &str) -> Value {
            let request = json!({
                "pollId": poll_id,
                "vote": choice,
                "signedChallenge": self.signed_challenge(wallet).await
            });
            self.call(Method::POST, "/vote", Some(request)).await.1
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_vote_and_close_over_http() {
        let node = node().await;
        let (status, poll) = node
            .call(
                Method::POST,
                "/create-poll",
                Some(json!({
                    "orgName": "Org",
                    "title": "T",
                    "description": "D",
                    "voteTokenResource": RESOURCE,
                    "closes": NOW + 1_000
                })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let poll_id = poll["id"].as_str().unwrap().to_string();

        let holder = TestWallet::ed25519();
        let outsider = TestWallet::secp256k1();
        let network_id = node.config.rola.network_id;
        let holder_address = holder.virtual_address(IdentityKind::Account, network_id);
        node.ledger.balances.lock().unwrap().insert(
            holder_address.as_str().to_string(),
            (RESOURCE.to_string(), "100".to_string()),
        );

        assert_eq!(node.vote(&poll_id, &holder, "yes").await, json!({"success": true}));
        assert_eq!(node.vote(&poll_id, &outsider, "no").await, json!({"success": true}));
        assert_eq!(
            node.vote(&poll_id, &holder, "no").await,
            json!({"success": false, "message": "alreadyVoted"})
        );

        let close_uri = format!("/close-poll/{poll_id}");
        let (_, early) = node.call(Method::GET, &close_uri, None).await;
        assert_eq!(early, json!({"success": false, "message": "pollNotClosable"}));

        node.clock.advance(Duration::from_millis(1_000));
        let (_, closed) = node.call(Method::GET, &close_uri, None).await;
        assert_eq!(closed, json!({"success": true}));

        let (_, again) = node.call(Method::GET, &close_uri, None).await;
        assert_eq!(again, json!({"success": false, "message": "pollClosed"}));

        let (_, polls) = node.call(Method::GET, "/polls", None).await;
        let poll = &polls[0];
        assert_eq!(poll["closed"], true);
        assert_eq!(poll["votes"], json!([{
            "id": poll["votes"][0]["id"],
            "voter": holder_address.as_str(),
            "vote": "yes"
        }]));
        assert_eq!(poll["unverifiedVotes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_owner_keys_without_fingerprint_reject_login() {
        let node = node().await;
        let wallet = TestWallet::ed25519();
        let address = wallet.virtual_address(IdentityKind::Account, node.config.rola.network_id);
        node.ledger
            .owner_keys
            .lock()
            .unwrap()
            .insert(address.as_str().to_string(), "5c2102220101deadbeef".to_string());

        let body = node.signed_challenge(&wallet).await;
        let (status, response) = node.call(Method::POST, "/verify-challenge", Some(body)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response, json!({"success": false, "message": "invalidPublicKey"}));
    }

    #[tokio::test]
    async fn test_unreachable_gateway_surfaces_ledger_error() {
        let ledger = Arc::new(FakeLedger::default());
        let mut config = NodeConfig::default();
        config.gateway.base_url = "http://127.0.0.1:9".to_string();
        config.gateway.request_timeout_secs = Some(2);
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualTimeSource::new(NOW));
        let time: Arc<dyn TimeSource> = clock.clone();
        let container = SubsystemContainer::build(config.clone(), store, time)
            .await
            .unwrap();
        let node = Node {
            router: build_router(container.app_state(), &CorsConfig::default()),
            clock,
            ledger,
            config,
        };

        let body = node.signed_challenge(&TestWallet::ed25519()).await;
        let (_, response) = node.call(Method::POST, "/verify-challenge", Some(body)).await;
        assert_eq!(
            response,
            json!({"success": false, "message": "couldNotVerifyPublicKeyOnLedger"})
        );
    }
}
