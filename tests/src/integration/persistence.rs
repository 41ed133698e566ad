//! # Persistence Across Restarts
//!
//! The node's subsystems sharing one `JsonFileStore`: outstanding challenges
//! and polls with their votes survive a restart, and the file keeps the
//! documented `challenges` / `polls` layout.

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use node_runtime::{NodeConfig, SubsystemContainer};
    use shared_types::{Address, JsonFileStore, KeyValueStore, ManualTimeSource, TimeSource};
    use vp_01_challenge_store::ChallengeApi;
    use vp_03_polls::{NewPoll, PollApi, VoteChoice};

    const NOW: u64 = 1_700_000_000_000;

    async fn boot(path: &Path, clock: Arc<ManualTimeSource>) -> SubsystemContainer {
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(path).unwrap());
        let clock: Arc<dyn TimeSource> = clock;
        SubsystemContainer::build(NodeConfig::default(), store, clock)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_state_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let clock = Arc::new(ManualTimeSource::new(NOW));

        let (poll_id, pending, used) = {
            let node = boot(&path, clock.clone()).await;
            let poll = node
                .polls
                .create(NewPoll {
                    org_name: "Org".to_string(),
                    title: "Persist".to_string(),
                    description: "Survives restarts".to_string(),
                    vote_token_resource: Address::new("resource_tdx_d_1vote"),
                    closes: NOW + 60_000,
                })
                .await
                .unwrap();

            let used = node.challenges.create().await;
            assert!(node.challenges.verify(&used.value).await);
            node.polls
                .record_vote(
                    &poll.id,
                    &Address::new("account_tdx_d_1voter"),
                    VoteChoice::Yes,
                    &used.value,
                )
                .await
                .unwrap();

            let pending = node.challenges.create().await;
            (poll.id, pending.value, used.value)
        };

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(raw["challenges"][&pending]["expires"].is_u64());
        assert!(raw["challenges"].get(&used).is_none());
        assert_eq!(raw["polls"][0]["id"], poll_id.as_str());
        assert_eq!(raw["polls"][0]["votes"][0]["vote"], "yes");
        assert_eq!(raw["polls"][0]["votes"][0]["id"], used.as_str());

        let node = boot(&path, clock).await;
        let polls = node.polls.list().await.unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].votes.len(), 1);
        assert!(polls[0].has_voted(&Address::new("account_tdx_d_1voter")));

        assert!(node.challenges.verify(&pending).await);
        assert!(!node.challenges.verify(&used).await);
    }

    #[tokio::test]
    async fn test_challenges_expiring_while_down_are_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let clock = Arc::new(ManualTimeSource::new(NOW));

        let challenge = {
            let node = boot(&path, clock.clone()).await;
            node.challenges.create().await.value
        };

        clock.advance(std::time::Duration::from_secs(120));
        let node = boot(&path, clock).await;
        assert_eq!(node.challenges.outstanding().await, 0);
        assert!(!node.challenges.verify(&challenge).await);
    }
}
