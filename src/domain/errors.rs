//! Domain error types
//!
//! This module defines the error hierarchy for Kartoteka. All errors are
//! domain-specific and don't expose third-party types: store failures and
//! oracle failures are mapped into [`StoreError`] and [`OracleError`] at the
//! adapter boundary.

use thiserror::Error;

/// Main Kartoteka error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum KartotekaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input failed schema constraints; carries field-level violations
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// No caller identity present
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Version mismatch on a record update
    ///
    /// The record was modified by another user since the caller last read it.
    /// Recoverable: the caller must re-read the current state and retry with
    /// the fresh version.
    #[error(
        "Conflict: {entity} record {id} was modified by another user \
         (expected version {expected_version}); refresh and retry"
    )]
    Conflict {
        /// Table the record belongs to
        entity: &'static str,
        /// Record identifier
        id: i64,
        /// Version the caller presented
        expected_version: i32,
    },

    /// Underlying persistence failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Translation oracle failure
    #[error("Oracle error: {0}")]
    Oracle(#[from] OracleError),

    /// Failure within the asynchronous translation pipeline
    ///
    /// Never propagated to the triggering mutation; recorded on the record's
    /// status surface. Surfaces here only for explicit re-triggers (CLI).
    #[error("Translation error: {0}")]
    Translation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// A single field-level validation violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field that failed validation
    pub field: String,

    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    /// Creates a new field violation
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation failure carrying field-level messages
///
/// Surfaced to callers so a UI can render per-field errors; never retried
/// automatically.
#[derive(Debug, Clone, Error)]
pub struct ValidationError {
    /// Field-level violations (never empty)
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// Creates a validation error from a list of violations
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Creates a validation error for a single field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![FieldViolation::new(field, message)],
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .violations
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

/// Store-specific errors
///
/// Errors that occur when interacting with the record store. These errors
/// don't expose driver types; they are surfaced verbatim to the caller and
/// never retried by the services.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to connect to the store
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Connection pool exhausted or timed out
    #[error("Connection pool unavailable: {0}")]
    PoolUnavailable(String),

    /// Query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Constraint violation (unique, foreign key, check)
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Record not found
    #[error("Record not found: {table} id {id}")]
    RecordNotFound {
        /// Table name
        table: String,
        /// Record identifier
        id: i64,
    },

    /// Failed to deserialize a stored value
    #[error("Failed to deserialize stored value: {0}")]
    Deserialization(String),
}

/// Translation-oracle-specific errors
///
/// Errors that occur when calling the external translation service.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Failed to reach the oracle endpoint
    #[error("Failed to connect to translation oracle: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Translation request timeout: {0}")]
    Timeout(String),

    /// Server error (5xx)
    #[error("Oracle server error: {status} - {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Client error (4xx)
    #[error("Oracle client error: {status} - {message}")]
    ClientError {
        /// HTTP status code
        status: u16,
        /// Response body or status text
        message: String,
    },

    /// Response was not the structured shape the contract requires
    #[error("Invalid oracle response: {0}")]
    InvalidResponse(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for KartotekaError {
    fn from(err: std::io::Error) -> Self {
        KartotekaError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for KartotekaError {
    fn from(err: serde_json::Error) -> Self {
        KartotekaError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for KartotekaError {
    fn from(err: toml::de::Error) -> Self {
        KartotekaError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_error_display() {
        let err = KartotekaError::Conflict {
            entity: "patient_general",
            id: 42,
            expected_version: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("patient_general"));
        assert!(msg.contains("42"));
        assert!(msg.contains("modified by another user"));
        assert!(msg.contains("refresh and retry"));
    }

    #[test]
    fn test_validation_error_joins_violations() {
        let err = ValidationError::new(vec![
            FieldViolation::new("first_name", "is required"),
            FieldViolation::new("date_of_birth", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "first_name: is required; date_of_birth: is required"
        );
    }

    #[test]
    fn test_validation_error_conversion() {
        let err: KartotekaError = ValidationError::single("name", "is required").into();
        assert!(matches!(err, KartotekaError::Validation(_)));
        assert!(err.to_string().contains("name: is required"));
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = StoreError::QueryFailed("timeout".to_string());
        let err: KartotekaError = store_err.into();
        assert!(matches!(err, KartotekaError::Store(_)));
    }

    #[test]
    fn test_oracle_error_conversion() {
        let oracle_err = OracleError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        let err: KartotekaError = oracle_err.into();
        assert!(matches!(err, KartotekaError::Oracle(_)));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KartotekaError = io_err.into();
        assert!(matches!(err, KartotekaError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: KartotekaError = json_err.into();
        assert!(matches!(err, KartotekaError::Serialization(_)));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = KartotekaError::Authentication("no identity".to_string());
        let _: &dyn std::error::Error = &err;

        let err = StoreError::ConnectionFailed("refused".to_string());
        let _: &dyn std::error::Error = &err;

        let err = OracleError::Timeout("60s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
