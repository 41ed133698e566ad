//! Cross-subsystem integration flows.

pub mod http_e2e;
pub mod persistence;
pub mod poll_lifecycle;
