//! # Poll Store Service
//!
//! Implements `PollApi` over the `polls` table of a `KeyValueStore`.
//!
//! The table is the source of truth and is rewritten in full on every
//! mutation. Two lock levels keep concurrent requests from losing writes:
//!
//! - a per-poll lock, held for a whole vote or close (including the ledger
//!   query), so votes cannot land while a close is filtering;
//! - a table lock, held only for each load-modify-save of the `polls` array.
//!
//! Locks are always taken in that order.

use crate::domain::entities::{NewPoll, Poll, Vote, VoteChoice};
use crate::domain::errors::PollError;
use crate::eligibility::VoterEligibilityVerifier;
use crate::ports::inbound::PollApi;
use crate::ports::outbound::LedgerHoldings;
use async_trait::async_trait;
use dashmap::DashMap;
use shared_types::{load, save, Address, DbKey, KeyValueStore, TimeSource};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// Persistent poll store.
pub struct PollStore<L: LedgerHoldings> {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn TimeSource>,
    eligibility: VoterEligibilityVerifier<L>,
    poll_locks: DashMap<String, Arc<Mutex<()>>>,
    table: Mutex<()>,
}

impl<L: LedgerHoldings> PollStore<L> {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn TimeSource>, ledger: Arc<L>) -> Self {
        Self {
            store,
            clock,
            eligibility: VoterEligibilityVerifier::new(ledger),
            poll_locks: DashMap::new(),
            table: Mutex::new(()),
        }
    }

    fn poll_lock(&self, poll_id: &str) -> Arc<Mutex<()>> {
        Arc::clone(&self.poll_locks.entry(poll_id.to_string()).or_default())
    }

    async fn load_polls(&self) -> Result<Vec<Poll>, PollError> {
        load::<Vec<Poll>>(&*self.store, DbKey::Polls)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                error!(key = DbKey::Polls.as_str(), error = %e, "Failed to load polls");
                PollError::Storage(e)
            })
    }

    /// Load, modify and save the `polls` table under the table lock.
    ///
    /// Nothing is written if `modify` fails.
    async fn update<T, F>(&self, modify: F) -> Result<T, PollError>
    where
        F: FnOnce(&mut Vec<Poll>) -> Result<T, PollError> + Send,
        T: Send,
    {
        let _table = self.table.lock().await;
        let mut polls = self.load_polls().await?;
        let out = modify(&mut polls)?;

        save(&*self.store, DbKey::Polls, &polls).await.map_err(|e| {
            error!(key = DbKey::Polls.as_str(), error = %e, "Failed to persist polls");
            PollError::Storage(e)
        })?;
        Ok(out)
    }

    async fn find(&self, poll_id: &str) -> Result<Poll, PollError> {
        let _table = self.table.lock().await;
        self.load_polls()
            .await?
            .into_iter()
            .find(|poll| poll.id == poll_id)
            .ok_or_else(|| PollError::PollNotFound(poll_id.to_string()))
    }
}

fn find_mut<'a>(polls: &'a mut [Poll], poll_id: &str) -> Result<&'a mut Poll, PollError> {
    polls
        .iter_mut()
        .find(|poll| poll.id == poll_id)
        .ok_or_else(|| PollError::PollNotFound(poll_id.to_string()))
}

#[async_trait]
impl<L: LedgerHoldings> PollApi for PollStore<L> {
    async fn create(&self, input: NewPoll) -> Result<Poll, PollError> {
        let poll = Poll::open(Poll::generate_id(), input);
        let created = poll.clone();
        self.update(move |polls| {
            polls.push(poll);
            Ok(())
        })
        .await?;

        info!(poll_id = %created.id, closes = created.closes, "Poll created");
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<Poll>, PollError> {
        let _table = self.table.lock().await;
        self.load_polls().await
    }

    async fn get(&self, poll_id: &str) -> Result<Poll, PollError> {
        self.find(poll_id).await
    }

    async fn record_vote(
        &self,
        poll_id: &str,
        voter: &Address,
        choice: VoteChoice,
        challenge_id: &str,
    ) -> Result<(), PollError> {
        // Polls are never deleted, so one that exists now exists under the lock.
        self.find(poll_id).await?;
        let lock = self.poll_lock(poll_id);
        let _poll = lock.lock().await;

        let vote = Vote {
            id: challenge_id.to_string(),
            voter: voter.clone(),
            choice,
        };
        self.update(|polls| {
            let poll = find_mut(polls, poll_id)?;
            if poll.closed {
                return Err(PollError::PollClosed);
            }
            if poll.has_voted(&vote.voter) {
                return Err(PollError::AlreadyVoted);
            }
            poll.votes.push(vote);
            Ok(())
        })
        .await?;

        debug!(poll_id = %poll_id, voter = %voter, choice = %choice, "Vote recorded");
        Ok(())
    }

    async fn close(&self, poll_id: &str) -> Result<Poll, PollError> {
        self.find(poll_id).await?;
        let lock = self.poll_lock(poll_id);
        let _poll = lock.lock().await;

        // Re-read under the poll lock: a concurrent close may have finished.
        let poll = self.find(poll_id).await?;
        if poll.closed {
            return Err(PollError::PollClosed);
        }
        if !poll.is_closable_at(self.clock.now_millis()) {
            return Err(PollError::PollNotClosable);
        }

        let eligible = self
            .eligibility
            .verify(&poll.vote_token_resource, &poll.votes)
            .await
            .map_err(|e| {
                warn!(poll_id = %poll_id, error = %e, "Voter verification failed, poll left open");
                PollError::CouldNotVerifyVotersOnLedger(e)
            })?;

        let closed = self
            .update(|polls| {
                let stored = find_mut(polls, poll_id)?;
                stored.close_with(eligible);
                Ok(stored.clone())
            })
            .await?;

        info!(
            poll_id = %poll_id,
            cast = closed.unverified_votes.as_ref().map_or(0, Vec::len),
            counted = closed.votes.len(),
            "Poll closed"
        );
        Ok(closed)
    }
}
