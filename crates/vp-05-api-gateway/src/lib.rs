//! VP-05 API Gateway - HTTP interface of the poll backend.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     API GATEWAY (vp-05)                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │  axum Router  ──  CORS → Trace                               │
//! │      │                                                       │
//! │      ├── /create-challenge ─────────► ChallengeApi  (vp-01)  │
//! │      ├── /verify-challenge ─┬───────► ChallengeApi  (vp-01)  │
//! │      │                      └───────► AuthenticationApi (02) │
//! │      ├── /vote ─────────────┬───────► ChallengeApi, ROLA     │
//! │      │                      └───────► PollApi       (vp-03)  │
//! │      └── /create-poll, /polls, /close-poll/:id ► PollApi     │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Responses
//!
//! Action endpoints answer `{success, message?}`; `message` is the failure
//! kind (`invalidSignature`, `alreadyVoted`, ...). Bodies that are not valid
//! JSON for the endpoint answer 400 with `invalidRequest`.
//!
//! # Usage
//!
//! ```ignore
//! use vp_05_api_gateway::{ApiConfig, ApiGatewayService, AppState};
//!
//! let state = AppState::new(challenges, rola, polls);
//! let mut service = ApiGatewayService::new(ApiConfig::default(), state)?;
//! let addr = service.start().await?;
//! // ...
//! service.shutdown().await;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod middleware;
pub mod router;
pub mod service;

// Re-exports for public API
pub use domain::config::{ApiConfig, ConfigError, CorsConfig, HttpConfig};
pub use domain::error::{ApiResponse, GatewayError, INVALID_CHALLENGE, INVALID_REQUEST};
pub use domain::types::{ChallengeResponse, StatusResponse, VoteRequest};
pub use router::{build_router, AppState};
pub use service::ApiGatewayService;
