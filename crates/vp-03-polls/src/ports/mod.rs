//! # Ports Layer
//!
//! - **Inbound (Driving)**: `PollApi`
//! - **Outbound (Driven)**: `LedgerHoldings`
//!
//! Persistence (`KeyValueStore`) and the clock (`TimeSource`) come from
//! `shared-types`.

pub mod inbound;
pub mod outbound;
