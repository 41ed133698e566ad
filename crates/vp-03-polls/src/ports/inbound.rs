//! # Inbound Ports (Driving Ports / API)

use crate::domain::entities::{NewPoll, Poll, VoteChoice};
use crate::domain::errors::PollError;
use async_trait::async_trait;
use shared_types::Address;

/// Poll lifecycle operations.
#[async_trait]
pub trait PollApi: Send + Sync {
    /// Create an open poll with a fresh random id.
    async fn create(&self, input: NewPoll) -> Result<Poll, PollError>;

    /// All polls, in creation order.
    async fn list(&self) -> Result<Vec<Poll>, PollError>;

    /// One poll by id.
    async fn get(&self, poll_id: &str) -> Result<Poll, PollError>;

    /// Record `voter`'s choice. `challenge_id` becomes the vote id.
    async fn record_vote(
        &self,
        poll_id: &str,
        voter: &Address,
        choice: VoteChoice,
        challenge_id: &str,
    ) -> Result<(), PollError>;

    /// Close the poll, keeping only votes from current token holders.
    ///
    /// On any failure the poll is left unchanged, so a close can be retried.
    async fn close(&self, poll_id: &str) -> Result<Poll, PollError>;
}
