//! External service adapters
//!
//! This module contains the adapters that connect the core services to the
//! outside world: the record store (PostgreSQL and in-memory) and the
//! translation oracle.

pub mod oracle;
pub mod postgres;
pub mod store;
