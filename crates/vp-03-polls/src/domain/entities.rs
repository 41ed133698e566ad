//! # Poll Entities
//!
//! Persisted in the `polls` table as camelCase JSON; votes are stored as
//! `{id, voter, vote}`.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp};
use std::fmt;

/// Random bytes in a poll id.
pub const POLL_ID_BYTES: usize = 32;

/// A yes/no ballot choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Yes,
    No,
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteChoice::Yes => f.write_str("yes"),
            VoteChoice::No => f.write_str("no"),
        }
    }
}

/// One recorded vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// The challenge the vote was authenticated with.
    pub id: String,
    /// Authenticated voter address.
    pub voter: Address,
    #[serde(rename = "vote")]
    pub choice: VoteChoice,
}

/// Input for creating a poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPoll {
    pub org_name: String,
    pub title: String,
    pub description: String,
    /// Resource a voter must hold at close time.
    pub vote_token_resource: Address,
    /// Close time in milliseconds since the epoch.
    pub closes: Timestamp,
}

/// A poll and its votes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poll {
    pub id: String,
    pub org_name: String,
    pub title: String,
    pub description: String,
    pub vote_token_resource: Address,
    pub closes: Timestamp,
    pub closed: bool,
    /// While open: every vote cast. After close: the eligible subset.
    pub votes: Vec<Vote>,
    /// The votes as they stood before the close-time filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unverified_votes: Option<Vec<Vote>>,
}

impl Poll {
    /// Fresh hex-encoded random poll id.
    pub fn generate_id() -> String {
        let mut bytes = [0u8; POLL_ID_BYTES];
        OsRng.fill_bytes(&mut bytes);
        hex::encode(bytes)
    }

    /// A fresh, open poll with no votes.
    pub fn open(id: String, input: NewPoll) -> Self {
        Self {
            id,
            org_name: input.org_name,
            title: input.title,
            description: input.description,
            vote_token_resource: input.vote_token_resource,
            closes: input.closes,
            closed: false,
            votes: Vec::new(),
            unverified_votes: None,
        }
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.votes.iter().any(|vote| &vote.voter == voter)
    }

    /// Whether the close time has been reached.
    pub fn is_closable_at(&self, now: Timestamp) -> bool {
        now >= self.closes
    }

    /// Mark closed, keeping `eligible` as the votes and the prior list as
    /// `unverified_votes`.
    pub fn close_with(&mut self, eligible: Vec<Vote>) {
        let cast = std::mem::replace(&mut self.votes, eligible);
        self.unverified_votes = Some(cast);
        self.closed = true;
    }
}
