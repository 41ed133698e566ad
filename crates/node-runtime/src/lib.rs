//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `poll-node` binary in `main.rs`.
//!
//! ## Architectural Patterns
//!
//! - **Hexagonal Architecture**: Ports define contracts, Adapters implement them
//! - **Dependency Injection**: the container hands every subsystem its store,
//!   clock and ledger adapter

pub mod adapters;
pub mod container;

pub use container::{NodeConfig, SubsystemContainer};
