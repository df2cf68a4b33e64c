//! Record mutation
//!
//! Create and version-checked update of versioned records, with draft
//! validation against the entity registry and translation fan-out triggers.

pub mod service;
pub mod validate;

pub use service::MutationService;
pub use validate::validate_draft;
