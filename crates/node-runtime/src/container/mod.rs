//! # Subsystem Container
//!
//! Central container holding all subsystem instances with their adapters
//! injected.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NodeConfig, StorageConfig};
pub use subsystems::SubsystemContainer;
