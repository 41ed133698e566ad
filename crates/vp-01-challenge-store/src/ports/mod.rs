//! # Ports Layer
//!
//! - **Inbound (Driving)**: `ChallengeApi`
//!
//! Outbound dependencies (`KeyValueStore`, `TimeSource`) come from
//! `shared-types`.

pub mod inbound;
