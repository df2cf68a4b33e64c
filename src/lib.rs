// Kartoteka - Hospital Record Core
// Copyright (c) 2026 Kartoteka Contributors
// Licensed under the MIT License

//! # Kartoteka - Hospital Record Core
//!
//! Kartoteka is the server-side core of a hospital-management system:
//! versioned record mutation with optimistic concurrency control and an
//! asynchronous AI translation fan-out pipeline over PostgreSQL.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Mutating** versioned records with a compare-and-swap on a monotonic
//!   version column — concurrent edits are detected, never silently merged
//! - **Translating** human-entered text into the deployment's other locales
//!   through an external oracle, merging results non-destructively
//! - **Tracking** translation progress per record via a status surface the
//!   UI can poll (`pending → in_progress → completed | failed`)
//!
//! ## Architecture
//!
//! Kartoteka follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (mutation service, translation pipeline)
//! - [`adapters`] - External integrations (PostgreSQL, translation oracle)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kartoteka::adapters::oracle::HttpOracleClient;
//! use kartoteka::adapters::postgres::{PostgresClient, PostgresStore};
//! use kartoteka::core::{
//!     LocaleSet, MutationService, TranslationPipeline, TranslationScheduler, TranslationWorker,
//! };
//! use kartoteka::domain::{Caller, EntityKind, Locale, RecordDraft, UserId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = kartoteka::config::load_config("kartoteka.toml")?;
//!
//!     // Wire the store, the oracle, and the background worker
//!     let client = Arc::new(PostgresClient::new(config.database).await?);
//!     let store = Arc::new(PostgresStore::new(client));
//!     let oracle = Arc::new(HttpOracleClient::new(config.oracle)?);
//!     let (scheduler, rx) = TranslationScheduler::new(config.translation.queue_capacity);
//!     let pipeline = Arc::new(TranslationPipeline::new(store.clone(), oracle));
//!     let worker = TranslationWorker::spawn(pipeline, rx);
//!
//!     // Create a record; translation fan-out is scheduled automatically
//!     let locales = LocaleSet::from_codes(&config.translation.locales)?;
//!     let service = MutationService::new(store, scheduler, locales);
//!     let caller = Caller::new(UserId::random(), Locale::new("en")?);
//!     let draft = RecordDraft::from_value(serde_json::json!({
//!         "name_translations": {"en": "Surgeon"}
//!     }))?;
//!     let record = service.create(EntityKind::Profession, draft, &caller).await?;
//!     println!("Created record {} at version {}", record.id, record.version);
//!
//!     drop(service);
//!     worker.await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Optimistic Concurrency
//!
//! Updates present the version the caller last read; the store applies the
//! write only if that version is still current:
//!
//! ```rust,no_run
//! use kartoteka::domain::{EntityKind, KartotekaError, RecordDraft};
//! # use kartoteka::core::MutationService;
//! # use kartoteka::domain::{Caller, RecordId};
//!
//! # async fn example(service: &MutationService, id: RecordId, caller: &Caller, draft: RecordDraft) {
//! match service.update(EntityKind::Profession, id, 2, draft, caller).await {
//!     Ok(record) => println!("Now at version {}", record.version),
//!     Err(KartotekaError::Conflict { .. }) => {
//!         // Someone else saved first: re-read and retry with the fresh version
//!     }
//!     Err(e) => eprintln!("Update failed: {e}"),
//! }
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Kartoteka uses the [`domain::KartotekaError`] type for all errors:
//!
//! ```rust,no_run
//! use kartoteka::domain::KartotekaError;
//!
//! fn example() -> Result<(), KartotekaError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = kartoteka::config::load_config("kartoteka.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Kartoteka uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(table = "professions", record_id = 7, "Record updated");
//! warn!(record_id = 7, "Translation job failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
