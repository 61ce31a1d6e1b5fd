//! Business logic services.
//!
//! Services own the database work: multi-step writes, ownership scoping,
//! and mapping rows into response shapes. Handlers stay thin.

pub mod account_service;
pub mod transaction_service;
