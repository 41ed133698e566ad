//! # Challenge Store Service
//!
//! Implements `ChallengeApi` over a `KeyValueStore` and a `TimeSource`.
//!
//! The in-memory map is the source of truth; the persisted `challenges`
//! table is rewritten after each mutation while the map lock is still held,
//! so snapshots reach the store in mutation order.

use crate::config::ChallengeConfig;
use crate::domain::entities::{Challenge, ChallengeRecord};
use crate::ports::inbound::ChallengeApi;
use async_trait::async_trait;
use shared_types::{load, save, DbKey, KeyValueStore, StoreError, TimeSource};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Single-use challenge store.
pub struct ChallengeStore {
    config: ChallengeConfig,
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn TimeSource>,
    challenges: Mutex<HashMap<String, ChallengeRecord>>,
}

impl ChallengeStore {
    /// Create an empty challenge store.
    pub fn new(
        config: ChallengeConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            config,
            store,
            clock,
            challenges: Mutex::new(HashMap::new()),
        }
    }

    /// Create a challenge store seeded from the persisted `challenges` table.
    ///
    /// Already-expired entries are dropped on load.
    pub async fn restore(
        config: ChallengeConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn TimeSource>,
    ) -> Result<Self, StoreError> {
        let persisted: HashMap<String, ChallengeRecord> =
            load(&*store, DbKey::Challenges).await?.unwrap_or_default();

        let now = clock.now_millis();
        let total = persisted.len();
        let fresh: HashMap<_, _> = persisted
            .into_iter()
            .filter(|(_, record)| record.is_fresh(now))
            .collect();
        info!(restored = fresh.len(), dropped = total - fresh.len(), "Challenges restored");

        Ok(Self {
            config,
            store,
            clock,
            challenges: Mutex::new(fresh),
        })
    }

    /// Number of outstanding (unconsumed) challenges, expired or not.
    pub async fn outstanding(&self) -> usize {
        self.challenges.lock().await.len()
    }

    /// Drop every expired challenge. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_millis();
        let mut challenges = self.challenges.lock().await;
        let before = challenges.len();
        challenges.retain(|_, record| record.is_fresh(now));
        let removed = before - challenges.len();
        if removed > 0 {
            self.persist(&challenges).await;
        }
        removed
    }

    async fn persist(&self, challenges: &HashMap<String, ChallengeRecord>) {
        if let Err(e) = save(&*self.store, DbKey::Challenges, challenges).await {
            warn!(key = DbKey::Challenges.as_str(), error = %e, "Failed to persist challenges");
        }
    }
}

#[async_trait]
impl ChallengeApi for ChallengeStore {
    async fn create(&self) -> Challenge {
        let expires_at = self
            .clock
            .now_millis()
            .saturating_add(self.config.ttl().as_millis() as u64);
        let challenge = Challenge::generate(self.config.token_bytes, expires_at);

        let mut challenges = self.challenges.lock().await;
        challenges.insert(challenge.value.clone(), ChallengeRecord { expires_at });
        self.persist(&challenges).await;

        debug!(expires_at, "Challenge issued");
        challenge
    }

    async fn verify(&self, token: &str) -> bool {
        let mut challenges = self.challenges.lock().await;
        let Some(record) = challenges.remove(token) else {
            return false;
        };
        self.persist(&challenges).await;

        let fresh = record.is_fresh(self.clock.now_millis());
        if !fresh {
            debug!("Expired challenge presented");
        }
        fresh
    }
}

/// Background task that periodically drops expired challenges.
pub async fn purge_task(store: Arc<ChallengeStore>, interval: Duration) {
    let mut purge_interval = tokio::time::interval(interval);
    purge_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        purge_interval.tick().await;
        let removed = store.purge_expired().await;
        if removed > 0 {
            debug!(removed = removed, "Purged expired challenges");
        }
    }
}
