//! # Polls Subsystem (VP-03)
//!
//! Token-gated yes/no polls. Votes are recorded against authenticated ledger
//! addresses while a poll is open; closing a poll keeps only the votes whose
//! voter still holds the poll's vote token.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): poll and vote entities, the eligibility
//!   filter, errors.
//! - **Ports Layer** (`ports/`): `PollApi` (inbound), `LedgerHoldings`
//!   (outbound).
//! - **Service Layer**: `VoterEligibilityVerifier` (`eligibility.rs`) and
//!   `PollStore` (`service.rs`).
//!
//! ## Eligibility Semantics
//!
//! Holdings are checked when the poll is closed, not when the vote is cast.
//! A voter who sells the token before close loses their vote; one who buys it
//! after voting keeps it.
//!
//! ## Concurrency
//!
//! Mutations of one poll are serialised by a per-poll async lock held across
//! the whole vote or close operation, including the ledger query of a close.
//! The read-modify-write of the `polls` table is serialised separately, so
//! different polls can be voted on and closed concurrently without losing
//! writes.

pub mod domain;
pub mod eligibility;
pub mod ports;
pub mod service;

// Re-export public API
pub use domain::entities::{NewPoll, Poll, Vote, VoteChoice};
pub use domain::errors::PollError;
pub use eligibility::VoterEligibilityVerifier;
pub use ports::inbound::PollApi;
pub use ports::outbound::{LedgerHoldings, MockLedgerHoldings};
pub use service::PollStore;
