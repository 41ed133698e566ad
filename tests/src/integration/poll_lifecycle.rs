//! # Poll Lifecycle Flows
//!
//! Challenge issuance (vp-01), ROLA (vp-02) and polls with eligibility
//! re-verification (vp-03) working together, without the HTTP layer.
//!
//! ## Flow Tested:
//!
//! 1. **Challenge → ROLA**: a consumed challenge authenticates a wallet address
//! 2. **ROLA → Polls**: the authenticated address is the recorded voter
//! 3. **Polls → Ledger**: closing keeps only votes of current token holders

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use shared_types::{Address, KeyValueStore, ManualTimeSource, MemoryStore, TimeSource};
    use vp_01_challenge_store::{ChallengeApi, ChallengeConfig, ChallengeStore};
    use vp_02_rola::domain::hashing::public_key_hash_bytes;
    use vp_02_rola::{
        AuthenticationApi, IdentityKind, MockOwnerKeyOracle, RolaConfig, RolaError, RolaService,
        TestWallet,
    };
    use vp_03_polls::{MockLedgerHoldings, NewPoll, PollApi, PollError, PollStore, VoteChoice};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NOW: u64 = 1_700_000_000_000;
    const RESOURCE: &str = "resource_tdx_d_1vote";

    struct Node {
        clock: Arc<ManualTimeSource>,
        challenges: ChallengeStore,
        oracle: Arc<MockOwnerKeyOracle>,
        rola: RolaService<MockOwnerKeyOracle>,
        ledger: Arc<MockLedgerHoldings>,
        polls: PollStore<MockLedgerHoldings>,
        config: RolaConfig,
    }

    fn node() -> Node {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let clock = Arc::new(ManualTimeSource::new(NOW));
        let time: Arc<dyn TimeSource> = clock.clone();
        let oracle = Arc::new(MockOwnerKeyOracle::new());
        let ledger = Arc::new(MockLedgerHoldings::new());
        let config = RolaConfig::default();

        Node {
            challenges: ChallengeStore::new(ChallengeConfig::default(), store.clone(), time.clone()),
            rola: RolaService::new(config.clone(), oracle.clone()),
            polls: PollStore::new(store, time, ledger.clone()),
            clock,
            oracle,
            ledger,
            config,
        }
    }

    impl Node {
        /// Issue a challenge, have `wallet` sign it for `claimed`, consume it
        /// and run ROLA.
        async fn login(
            &self,
            wallet: &TestWallet,
            claimed: &Address,
        ) -> Result<(Address, String), RolaError> {
            let challenge = self.challenges.create().await;
            let signed = wallet.sign_challenge(
                &challenge.value,
                IdentityKind::Account,
                claimed,
                &self.config.dapp_definition_address,
                &self.config.expected_origin,
            );
            if !self.challenges.verify(&signed.challenge).await {
                return Err(RolaError::InvalidChallenge);
            }
            let address = self.rola.authenticate(&signed).await?;
            Ok((address, challenge.value))
        }

        async fn vote(&self, poll_id: &str, wallet: &TestWallet, choice: VoteChoice) -> Address {
            let claimed = wallet.virtual_address(IdentityKind::Account, self.config.network_id);
            let (voter, challenge) = self.login(wallet, &claimed).await.unwrap();
            self.polls
                .record_vote(poll_id, &voter, choice, &challenge)
                .await
                .unwrap();
            voter
        }

        async fn open_poll(&self, closes_in_ms: u64) -> String {
            self.polls
                .create(NewPoll {
                    org_name: "Org".to_string(),
                    title: "T".to_string(),
                    description: "Should we?".to_string(),
                    vote_token_resource: Address::new(RESOURCE),
                    closes: NOW + closes_in_ms,
                })
                .await
                .unwrap()
                .id
        }
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    /// Holder A and non-holder B vote; only A survives the close.
    #[tokio::test]
    async fn test_token_gated_poll_scenario() {
        let node = node();
        let poll_id = node.open_poll(1_000).await;

        let wallet_a = TestWallet::ed25519();
        let wallet_b = TestWallet::secp256k1();
        let a = node.vote(&poll_id, &wallet_a, VoteChoice::Yes).await;
        let b = node.vote(&poll_id, &wallet_b, VoteChoice::No).await;
        node.ledger.set_balance(a.clone(), Address::new(RESOURCE), "1");

        assert!(matches!(
            node.polls.close(&poll_id).await,
            Err(PollError::PollNotClosable)
        ));

        node.clock.advance(Duration::from_millis(1_000));
        let closed = node.polls.close(&poll_id).await.unwrap();

        assert!(closed.closed);
        assert_eq!(closed.votes.len(), 1);
        assert_eq!(closed.votes[0].voter, a);
        assert_eq!(closed.votes[0].choice, VoteChoice::Yes);

        let unverified: Vec<_> = closed
            .unverified_votes
            .unwrap()
            .into_iter()
            .map(|v| v.voter)
            .collect();
        assert_eq!(unverified, vec![a, b]);

        // Closed polls accept no further votes.
        let late = TestWallet::ed25519();
        let claimed = late.virtual_address(IdentityKind::Account, node.config.network_id);
        let (voter, challenge) = node.login(&late, &claimed).await.unwrap();
        assert!(matches!(
            node.polls
                .record_vote(&poll_id, &voter, VoteChoice::Yes, &challenge)
                .await,
            Err(PollError::PollClosed)
        ));
    }

    #[tokio::test]
    async fn test_second_vote_from_same_wallet_rejected() {
        let node = node();
        let poll_id = node.open_poll(1_000).await;
        let wallet = TestWallet::ed25519();
        let voter = node.vote(&poll_id, &wallet, VoteChoice::Yes).await;

        let (again, challenge) = node.login(&wallet, &voter).await.unwrap();
        assert_eq!(again, voter);
        assert!(matches!(
            node.polls
                .record_vote(&poll_id, &again, VoteChoice::No, &challenge)
                .await,
            Err(PollError::AlreadyVoted)
        ));
    }

    /// Eligibility is judged on holdings at close time, not at vote time.
    #[tokio::test]
    async fn test_eligibility_uses_holdings_at_close() {
        let node = node();
        let poll_id = node.open_poll(500).await;
        let seller = node.vote(&poll_id, &TestWallet::ed25519(), VoteChoice::Yes).await;
        let buyer = node.vote(&poll_id, &TestWallet::ed25519(), VoteChoice::No).await;

        node.ledger.set_balance(seller.clone(), Address::new(RESOURCE), "5");
        // Sold before close.
        node.ledger.set_balance(seller, Address::new(RESOURCE), "0");
        // Bought after voting.
        node.ledger.set_balance(buyer.clone(), Address::new(RESOURCE), "0.5");

        node.clock.advance(Duration::from_millis(500));
        let closed = node.polls.close(&poll_id).await.unwrap();
        let voters: Vec<_> = closed.votes.iter().map(|v| v.voter.clone()).collect();
        assert_eq!(voters, vec![buyer]);
    }

    /// A rotated key authenticates through the ledger's owner-key hints even
    /// though its own virtual address differs from the claimed account.
    #[tokio::test]
    async fn test_rotated_key_authenticates_via_owner_keys() {
        let node = node();
        let original = TestWallet::ed25519();
        let rotated = TestWallet::ed25519();
        let account = original.virtual_address(IdentityKind::Account, node.config.network_id);

        // No owner keys yet: the rotated key does not derive the account.
        assert_eq!(
            node.login(&rotated, &account).await.unwrap_err(),
            RolaError::InvalidPublicKey
        );

        let fingerprint = hex_upper(&public_key_hash_bytes(&rotated.public_key_bytes()));
        node.oracle
            .set_hints(account.clone(), vec![format!("5c2102220101{fingerprint}")]);
        assert!(node.login(&rotated, &account).await.is_ok());

        // Once owner keys are set, the original key is no longer accepted.
        assert_eq!(
            node.login(&original, &account).await.unwrap_err(),
            RolaError::InvalidPublicKey
        );
    }

    #[tokio::test]
    async fn test_expired_challenge_never_reaches_rola() {
        let node = node();
        let wallet = TestWallet::ed25519();
        let challenge = node.challenges.create().await;
        node.clock.advance(Duration::from_secs(61));

        assert!(!node.challenges.verify(&challenge.value).await);
        assert_eq!(node.oracle.calls(), 0);
        let claimed = wallet.virtual_address(IdentityKind::Account, node.config.network_id);
        let signed = wallet.sign_challenge(
            &challenge.value,
            IdentityKind::Account,
            &claimed,
            &node.config.dapp_definition_address,
            &node.config.expected_origin,
        );
        // The proof itself is still valid; only the challenge gate rejects it.
        assert_eq!(node.rola.authenticate(&signed).await.unwrap(), claimed);
    }

    fn hex_upper(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02X}")).collect()
    }
}
