//! Result type alias for Kartoteka
//!
//! This module provides a convenient Result type alias that uses KartotekaError
//! as the error type.

use super::errors::KartotekaError;

/// Result type alias for Kartoteka operations
///
/// This is a convenience type alias that uses `KartotekaError` as the error type.
/// Use this throughout the codebase for fallible operations.
///
/// # Examples
///
/// ```
/// use kartoteka::domain::result::Result;
/// use kartoteka::domain::errors::KartotekaError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(KartotekaError::Configuration("missing section".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, KartotekaError>;
