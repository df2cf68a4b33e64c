//! Configuration management for Kartoteka.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Kartoteka uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`KARTOTEKA_*` prefix)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [database]
//! connection_string = "${KARTOTEKA_DATABASE_URL}"
//! max_connections = 8
//! ssl_mode = "require"
//!
//! [oracle]
//! api_key = "${OPENAI_API_KEY}"
//! model = "gpt-4o-mini"
//!
//! [translation]
//! locales = ["en", "sr-Latn", "ru"]
//! queue_capacity = 256
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use kartoteka::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("kartoteka.toml")?;
//! println!("Oracle model: {}", config.oracle.model);
//! println!("Locales: {:?}", config.translation.locales);
//! # Ok(())
//! # }
//! ```
//!
//! Secrets (the database connection string and the oracle API key) are
//! wrapped with the `secrecy` crate and never appear in debug output.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DatabaseConfig, Environment, KartotekaConfig, LoggingConfig, OracleConfig,
    TranslationConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
