//! # Ports Layer
//!
//! - **Inbound (Driving)**: `AuthenticationApi`
//! - **Outbound (Driven)**: `LedgerOwnerKeyOracle`

pub mod inbound;
pub mod outbound;
