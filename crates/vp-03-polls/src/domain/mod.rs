//! # Domain Layer
//!
//! Poll entities and the pure eligibility filter.

pub mod entities;
pub mod errors;
pub mod filter;
