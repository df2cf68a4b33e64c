//! Record store abstraction and in-memory implementation
//!
//! The [`RecordStore`] trait is the seam between the mutation/translation
//! services and persistence. The PostgreSQL implementation lives in
//! [`crate::adapters::postgres`]; [`MemoryStore`] backs the test suite and
//! local development.

pub mod memory;
pub mod traits;

pub use memory::MemoryStore;
pub use traits::{NewRecord, RecordPatch, RecordStore};
