//! # Gateway Client (VP-04)
//!
//! Thin client for the ledger Gateway API's `/state/entity/details`
//! endpoint, the only ledger read the poll backend needs:
//!
//! - `owner_key_hints`: raw-hex `owner_keys` metadata of one address (ROLA)
//! - `fungible_holdings`: vault-aggregated fungible balances (poll close)
//!
//! The Gateway accepts a bounded number of addresses per request and may
//! answer in any order. Larger lists are split into chunks sent
//! concurrently, and results are always matched by address.

pub mod client;
pub mod config;
pub mod errors;
pub mod models;

pub use client::GatewayClient;
pub use config::GatewayClientConfig;
pub use errors::GatewayClientError;
pub use models::{EntityDetailsItem, EntityDetailsRequest, EntityDetailsResponse};
