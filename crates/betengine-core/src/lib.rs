//! Shared HTTP plumbing for BetEngine services.
//!
//! Error body rendering, health and fallback handlers, request-id middleware,
//! tracing initialisation and timestamp serializers.

pub mod error;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
