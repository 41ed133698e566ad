//! Domain types for the API gateway.

pub mod config;
pub mod error;
pub mod types;
