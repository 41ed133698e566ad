//! # Adapters
//!
//! Implementations of the subsystems' outbound ports.

pub mod ledger;

pub use ledger::GatewayLedgerAdapter;
