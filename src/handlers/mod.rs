//! HTTP route handlers.
//!
//! Handlers translate authenticated requests into service calls and wrap
//! every outcome in the uniform response envelope.

/// Account endpoints
pub mod accounts;
/// Category pick-list endpoint
pub mod categories;
/// Health probe
pub mod health;
/// Transaction endpoints
pub mod transactions;
