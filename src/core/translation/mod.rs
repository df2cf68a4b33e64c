//! Translation fan-out
//!
//! Propagates a source-locale string to the other configured locales via
//! the translation oracle. Dispatch is fire-and-forget relative to the
//! triggering mutation; execution, merging, and status bookkeeping live in
//! [`pipeline`].

pub mod locales;
pub mod pipeline;
pub mod scheduler;

pub use locales::LocaleSet;
pub use pipeline::{JobOutcome, TranslationPipeline};
pub use scheduler::{TranslationScheduler, TranslationWorker, DEFAULT_QUEUE_CAPACITY};
