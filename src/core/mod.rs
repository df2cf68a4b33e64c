//! Core services
//!
//! The two mechanisms at the heart of Kartoteka: the record mutation
//! service (optimistic concurrency control) and the translation fan-out
//! pipeline. Both depend only on the adapter traits, never on a concrete
//! store or oracle.

pub mod mutation;
pub mod translation;

pub use mutation::MutationService;
pub use translation::{
    JobOutcome, LocaleSet, TranslationPipeline, TranslationScheduler, TranslationWorker,
};
