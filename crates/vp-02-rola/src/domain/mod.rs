//! # Domain Layer
//!
//! Pure cryptographic logic with no I/O dependencies.
//! This is the inner layer of the hexagonal architecture.

pub mod acceptance;
pub mod address;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod message;
pub mod signature;
#[cfg(any(test, feature = "test-utils"))]
pub mod wallet;
