//! # Error Types
//!
//! Defines error types used across subsystems.

use thiserror::Error;

/// Errors from the ledger gateway (the external ledger query service).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The gateway could not be reached.
    #[error("Ledger gateway unavailable: {0}")]
    Unavailable(String),

    /// The gateway answered with a non-success status.
    #[error("Ledger gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The gateway answered with a body we could not interpret.
    #[error("Malformed ledger response: {0}")]
    MalformedResponse(String),
}

/// Errors from the key-value persistence layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(String),

    /// A stored value could not be (de)serialized.
    #[error("Store serialization error for key '{key}': {reason}")]
    Serialization { key: String, reason: String },

    /// Another process holds the store's lock file.
    #[error("Store already in use: {0}")]
    Locked(String),
}
