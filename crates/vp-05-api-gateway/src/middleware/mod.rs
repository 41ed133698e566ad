//! Middleware for the API gateway.
//!
//! - `cors`: tower-http CORS built from `CorsConfig`
//!
//! Request tracing uses `tower_http::trace::TraceLayer` directly.

pub mod cors;

pub use cors::create_cors_layer;
