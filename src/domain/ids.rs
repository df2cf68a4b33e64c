//! Domain identifier types with validation
//!
//! This module provides newtype wrappers for record identifiers, caller
//! identities, and locale codes. Each type ensures type safety and provides
//! validation at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Record identifier newtype wrapper
///
/// Stable identity of a versioned record within its table. Assigned by the
/// store on insert.
///
/// # Examples
///
/// ```
/// use kartoteka::domain::ids::RecordId;
///
/// let id = RecordId::new(42).unwrap();
/// assert_eq!(id.value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Creates a new RecordId
    ///
    /// # Errors
    ///
    /// Returns an error if the id is not positive.
    pub fn new(id: i64) -> Result<Self, String> {
        if id <= 0 {
            return Err(format!("Record id must be positive, got {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the inner value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id: i64 = s
            .parse()
            .map_err(|_| format!("Invalid record id: {s}"))?;
        Self::new(id)
    }
}

/// Caller identity newtype wrapper
///
/// An opaque identity reference; the record store persists it into the
/// `created_by` / `updated_by` audit columns. Authentication mechanics are
/// out of scope, only the presence of an identity matters here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a UserId from an existing UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generates a fresh random UserId
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid user id: {e}"))
    }
}

/// Locale code newtype wrapper
///
/// A free-form BCP 47-style locale code such as `"en"`, `"sr-Latn"`, or
/// `"ru"`. Validation is deliberately shallow: non-empty, ASCII alphanumeric
/// subtags separated by hyphens, no leading or trailing hyphen.
///
/// # Examples
///
/// ```
/// use kartoteka::domain::ids::Locale;
///
/// let locale = Locale::new("sr-Latn").unwrap();
/// assert_eq!(locale.as_str(), "sr-Latn");
/// assert!(Locale::new("").is_err());
/// assert!(Locale::new("-en").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Creates a new Locale from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or not a hyphen-separated
    /// sequence of ASCII alphanumeric subtags.
    pub fn new(code: impl Into<String>) -> Result<Self, String> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err("Locale code cannot be empty".to_string());
        }
        let valid = !code.starts_with('-')
            && !code.ends_with('-')
            && code
                .split('-')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric()));
        if !valid {
            return Err(format!("Invalid locale code: {code}"));
        }
        Ok(Self(code))
    }

    /// Returns the locale code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_creation() {
        let id = RecordId::new(7).unwrap();
        assert_eq!(id.value(), 7);
        assert_eq!(format!("{id}"), "7");
    }

    #[test]
    fn test_record_id_rejects_non_positive() {
        assert!(RecordId::new(0).is_err());
        assert!(RecordId::new(-3).is_err());
    }

    #[test]
    fn test_record_id_from_str() {
        let id: RecordId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert!("abc".parse::<RecordId>().is_err());
    }

    #[test]
    fn test_user_id_roundtrip() {
        let id = UserId::random();
        let parsed: UserId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_user_id_invalid() {
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }

    #[test]
    fn test_locale_valid_codes() {
        assert!(Locale::new("en").is_ok());
        assert!(Locale::new("sr-Latn").is_ok());
        assert!(Locale::new("ru").is_ok());
        assert!(Locale::new("zh-Hans-CN").is_ok());
    }

    #[test]
    fn test_locale_invalid_codes() {
        assert!(Locale::new("").is_err());
        assert!(Locale::new("   ").is_err());
        assert!(Locale::new("-en").is_err());
        assert!(Locale::new("en-").is_err());
        assert!(Locale::new("en--GB").is_err());
        assert!(Locale::new("en_US").is_err());
    }

    #[test]
    fn test_locale_serialization() {
        let locale = Locale::new("sr-Latn").unwrap();
        let json = serde_json::to_string(&locale).unwrap();
        assert_eq!(json, "\"sr-Latn\"");
        let back: Locale = serde_json::from_str(&json).unwrap();
        assert_eq!(locale, back);
    }
}
