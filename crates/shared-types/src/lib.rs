//! # Shared Types Crate
//!
//! Types and ports that more than one subsystem needs.
//!
//! ## Contents
//!
//! - `entities`: ledger `Address`, millisecond `Timestamp`, fungible holdings
//! - `errors`: `LedgerError` (ledger gateway failures) and `StoreError`
//! - `time`: the `TimeSource` clock port with system and manual implementations
//! - `store`: the `KeyValueStore` persistence port, `MemoryStore`, `JsonFileStore`
//!
//! Subsystems never read the wall clock or touch the filesystem directly; they
//! receive a `TimeSource` and a `KeyValueStore` at construction.

pub mod entities;
pub mod errors;
pub mod store;
pub mod time;

pub use entities::*;
pub use errors::*;
pub use store::{load, save, DbKey, JsonFileStore, KeyValueStore, MemoryStore};
pub use time::{ManualTimeSource, SystemTimeSource, TimeSource};
