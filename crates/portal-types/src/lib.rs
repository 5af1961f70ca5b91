//! Shared types for the Order Portal client.
//!
//! This crate holds the definitions used across the client: the order wire
//! model, the session token wrapper, request/response payloads for the
//! backend contract, and TOML validation helpers for backend configuration.

/// Request and response payloads for the backend HTTP contract.
pub mod api;
/// Order wire types.
pub mod order;
/// Session context passed to backend-facing operations.
pub mod session;
/// Secure wrapper for the bearer token.
pub mod token;
/// TOML configuration validation helpers.
pub mod validation;

// Re-export all types for convenient access
pub use api::*;
pub use order::*;
pub use session::*;
pub use token::*;
pub use validation::*;
