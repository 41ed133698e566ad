//! # Poll Errors

use shared_types::{LedgerError, StoreError};
use thiserror::Error;

/// Vote and close failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PollError {
    #[error("Poll not found: {0}")]
    PollNotFound(String),

    /// The poll no longer accepts votes or closes.
    #[error("Poll is closed")]
    PollClosed,

    /// This address already has a vote on the poll.
    #[error("Already voted")]
    AlreadyVoted,

    /// The poll's close time has not been reached.
    #[error("Poll can't be closed yet")]
    PollNotClosable,

    /// The holdings query failed; the poll was left unchanged.
    #[error("Could not verify voters on ledger: {0}")]
    CouldNotVerifyVotersOnLedger(LedgerError),

    /// Reading or writing the `polls` table failed.
    #[error("Poll storage failed: {0}")]
    Storage(#[from] StoreError),
}

impl PollError {
    /// Stable kind string surfaced to callers.
    pub fn reason(&self) -> &'static str {
        match self {
            PollError::PollNotFound(_) => "pollNotFound",
            PollError::PollClosed => "pollClosed",
            PollError::AlreadyVoted => "alreadyVoted",
            PollError::PollNotClosable => "pollNotClosable",
            PollError::CouldNotVerifyVotersOnLedger(_) => "couldNotVerifyVotersOnLedger",
            PollError::Storage(_) => "couldNotPersist",
        }
    }
}
