//! # Verified-Poll Test Suite
//!
//! Unified test crate for flows that span more than one subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── poll_lifecycle.rs   # ROLA + polls + eligibility, services only
//!     ├── persistence.rs      # JSON file store across restarts
//!     └── http_e2e.rs         # HTTP API over a fake ledger Gateway
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vp-tests
//! cargo test -p vp-tests integration::http_e2e::
//! ```

pub mod integration;
