//! # Domain Layer
//!
//! Challenge entities; no I/O.

pub mod entities;
