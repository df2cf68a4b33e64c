//! Domain models and types for Kartoteka.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`RecordId`], [`UserId`], [`Locale`])
//! - **The entity registry** ([`EntityKind`]) — tables, required fields,
//!   translatable columns, and oracle prompt contexts
//! - **Record models** ([`VersionedRecord`], [`RecordDraft`], [`Caller`])
//! - **Translation types** ([`TranslationMap`], [`TranslationStatus`],
//!   [`TranslationJob`])
//! - **Error types** ([`KartotekaError`], [`StoreError`], [`OracleError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Kartoteka uses the newtype pattern for identifiers to prevent mixing
//! different ID types:
//!
//! ```rust
//! use kartoteka::domain::{Locale, RecordId};
//!
//! # fn example() -> Result<(), String> {
//! let id = RecordId::new(42)?;
//! let locale = Locale::new("sr-Latn")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: RecordId = locale;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, KartotekaError>`]:
//!
//! ```rust
//! use kartoteka::domain::{KartotekaError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = kartoteka::config::load_config("kartoteka.toml")?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod errors;
pub mod ids;
pub mod record;
pub mod result;
pub mod translation;

// Re-export commonly used types for convenience
pub use entity::EntityKind;
pub use errors::{FieldViolation, KartotekaError, OracleError, StoreError, ValidationError};
pub use ids::{Locale, RecordId, UserId};
pub use record::{Caller, RecordDraft, VersionedRecord};
pub use result::Result;
pub use translation::{TranslationJob, TranslationMap, TranslationStatus};
