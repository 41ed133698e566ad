//! # Challenge Store (VP-01)
//!
//! Issues the random challenges that wallets sign during off-ledger
//! authentication, and consumes them exactly once.
//!
//! ## Invariants
//!
//! - A challenge is validated at most once: `verify` removes it whether or
//!   not it is still fresh.
//! - A challenge never validates after its TTL has elapsed.
//! - Every mutation rewrites the persisted `challenges` table. Persistence
//!   failures are logged, not surfaced.

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use config::ChallengeConfig;
pub use domain::entities::{Challenge, ChallengeRecord};
pub use ports::inbound::ChallengeApi;
pub use service::{purge_task, ChallengeStore};
