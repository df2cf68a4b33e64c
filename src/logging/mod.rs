//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - JSON-formatted file logs with daily rotation
//! - Configurable log levels
//! - Console output for development
//!
//! # Example
//!
//! ```no_run
//! use kartoteka::logging::init_logging;
//! use kartoteka::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log a mutation outcome with its version transition
///
/// # Example
///
/// ```no_run
/// use kartoteka::log_mutation;
///
/// log_mutation!("professions", 7, 2);
/// ```
#[macro_export]
macro_rules! log_mutation {
    ($table:expr, $record_id:expr, $version:expr) => {
        tracing::info!(
            table = %$table,
            record_id = %$record_id,
            version = $version,
            "Record mutated"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use kartoteka::log_error_with_context;
/// use kartoteka::domain::KartotekaError;
///
/// let error = KartotekaError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
