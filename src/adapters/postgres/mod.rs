//! PostgreSQL adapter
//!
//! Connection pooling, schema bootstrap, and the [`RecordStore`]
//! implementation used in production.
//!
//! [`RecordStore`]: crate::adapters::store::RecordStore

pub mod client;
pub mod store;

pub use client::PostgresClient;
pub use store::PostgresStore;
