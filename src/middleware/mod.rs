//! HTTP middleware for FarmCart Core
//!
//! - `AuthContext` extractor resolving the caller from a bearer token
//! - Observability layer (request id + Prometheus metrics)

pub mod auth;
pub mod metrics;

pub use auth::AuthContext;
pub use metrics::ObservabilityLayer;
