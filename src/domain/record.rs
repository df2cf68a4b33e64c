//! Versioned record model and mutation drafts
//!
//! A [`VersionedRecord`] is any entity guarded by the monotonic version
//! counter: created at version 1, mutated only through the version-checked
//! update path, never hard-deleted. [`RecordDraft`] carries the domain fields
//! of a pending create/update as submitted by a caller.

use crate::domain::errors::KartotekaError;
use crate::domain::ids::{Locale, RecordId, UserId};
use crate::domain::translation::{TranslationMap, TranslationStatus};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// A record guarded by optimistic concurrency control
///
/// `version` strictly increases by exactly 1 on every successful update; a
/// write succeeds only if the caller's supplied version equals the row's
/// current version at write time.
#[derive(Debug, Clone)]
pub struct VersionedRecord {
    /// Stable identity, assigned by the store
    pub id: RecordId,

    /// Monotonic version counter, 1 on creation
    pub version: i32,

    /// Identity that created the record
    pub created_by: Option<UserId>,

    /// Identity of the last successful update
    pub updated_by: Option<UserId>,

    /// Store-assigned creation timestamp
    pub created_at: Option<DateTime<Utc>>,

    /// Store-assigned timestamp of the last update
    pub updated_at: Option<DateTime<Utc>>,

    /// Translation fan-out status surface (None when no job was ever scheduled)
    pub translation_status: Option<TranslationStatus>,

    /// Truncated failure message of the last failed job
    pub translation_error: Option<String>,

    /// Domain fields, including any translatable columns
    pub fields: Map<String, Value>,
}

impl VersionedRecord {
    /// Reads a domain field
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Parses a translatable column into a [`TranslationMap`]
    ///
    /// Returns `Ok(None)` when the column is absent or null.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not a valid locale map.
    pub fn translations(&self, column: &str) -> Result<Option<TranslationMap>, KartotekaError> {
        match self.fields.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => TranslationMap::from_json(value)
                .map(Some)
                .map_err(KartotekaError::Serialization),
        }
    }
}

/// Domain fields of a pending create or update, as submitted by a caller
///
/// Drafts are free of identity and version bookkeeping; the mutation service
/// validates them against the entity registry and normalises empty-string
/// form values to null before persistence.
#[derive(Debug, Clone, Default)]
pub struct RecordDraft {
    fields: Map<String, Value>,
}

impl RecordDraft {
    /// Creates an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a draft from a JSON value
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, KartotekaError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(KartotekaError::Serialization(format!(
                "Record draft must be a JSON object, got {other}"
            ))),
        }
    }

    /// Sets a field, builder-style
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Sets a field
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    /// Reads a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the draft carries the given field
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Replaces empty-string values with null
    ///
    /// Optional form inputs arrive as empty strings; the store represents
    /// "no value" as null.
    pub fn normalized(mut self) -> Self {
        for value in self.fields.values_mut() {
            if matches!(value, Value::String(s) if s.is_empty()) {
                *value = Value::Null;
            }
        }
        self
    }

    /// Parses a translatable column of the draft
    ///
    /// Returns `Ok(None)` when the column is absent or null.
    pub fn translations(&self, column: &str) -> Result<Option<TranslationMap>, KartotekaError> {
        match self.fields.get(column) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => TranslationMap::from_json(value)
                .map(Some)
                .map_err(KartotekaError::Serialization),
        }
    }

    /// Replaces a translatable column with the given map
    pub fn set_translations(&mut self, column: &str, map: &TranslationMap) {
        self.fields.insert(column.to_string(), map.to_json());
    }

    /// Consumes the draft and returns the raw field map
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Borrows the raw field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Authenticated caller identity and locale
///
/// Every mutation is attributed to a caller; the caller's locale is the
/// source locale for translation change detection.
#[derive(Debug, Clone)]
pub struct Caller {
    /// Opaque authenticated identity
    pub user_id: UserId,

    /// Locale the caller is working in
    pub locale: Locale,
}

impl Caller {
    /// Creates a caller from a resolved identity
    pub fn new(user_id: UserId, locale: Locale) -> Self {
        Self { user_id, locale }
    }

    /// Creates a caller from an optional identity
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationError` when no identity is present. Mutations
    /// are fatal without one; the caller must re-authenticate.
    pub fn try_new(user_id: Option<UserId>, locale: Locale) -> Result<Self, KartotekaError> {
        match user_id {
            Some(user_id) => Ok(Self { user_id, locale }),
            None => Err(KartotekaError::Authentication(
                "User not authenticated".to_string(),
            )),
        }
    }
}
