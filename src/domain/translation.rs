//! Translation domain types
//!
//! A translatable column holds a single JSON object mapping locale code to
//! translated string ([`TranslationMap`]). Translation fan-out is tracked per
//! record through [`TranslationStatus`]; one fan-out request is described by
//! a [`TranslationJob`].

use crate::domain::entity::EntityKind;
use crate::domain::ids::{Locale, RecordId};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A per-locale string map persisted as one column value
///
/// Invariants: at most one value per locale key, values are non-empty
/// strings, and absence of a key means "not yet translated into that
/// locale" rather than an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationMap(BTreeMap<Locale, String>);

impl TranslationMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a map from a stored JSON value
    ///
    /// The value must be a JSON object; keys are validated as locale codes
    /// at this boundary. Entries with non-string or empty values are
    /// rejected.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first offending entry.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| format!("Expected JSON object for translation map, got {value}"))?;

        let mut map = BTreeMap::new();
        for (key, entry) in object {
            let locale = Locale::new(key.clone())?;
            let text = entry
                .as_str()
                .ok_or_else(|| format!("Translation for {key} must be a string"))?;
            if text.is_empty() {
                return Err(format!("Translation for {key} must not be empty"));
            }
            map.insert(locale, text.to_string());
        }
        Ok(Self(map))
    }

    /// Serializes the map to the JSON object stored in the column
    pub fn to_json(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(locale, text)| (locale.as_str().to_string(), Value::String(text.clone())))
                .collect(),
        )
    }

    /// Inserts or replaces the entry for a locale
    ///
    /// Empty strings are ignored: absence of a key is the representation of
    /// "not translated", never an empty string.
    pub fn insert(&mut self, locale: Locale, text: impl Into<String>) {
        let text = text.into();
        if !text.is_empty() {
            self.0.insert(locale, text);
        }
    }

    /// Returns the entry for a locale, if present
    pub fn get(&self, locale: &Locale) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    /// Returns a new map with `newer` merged over `self`
    ///
    /// Non-destructive: entries of `self` for locales absent from `newer`
    /// are preserved; `newer` wins where both carry a locale.
    pub fn merged_with(&self, newer: &TranslationMap) -> TranslationMap {
        let mut merged = self.0.clone();
        for (locale, text) in &newer.0 {
            merged.insert(locale.clone(), text.clone());
        }
        TranslationMap(merged)
    }

    /// Locales present in the map
    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.0.keys()
    }

    /// Whether the map carries no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Per-record translation fan-out status, exposed for UI polling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    /// A job was scheduled but has not started yet
    Pending,
    /// The worker is executing the job
    InProgress,
    /// Terminal: the last job finished (possibly with nothing to do)
    Completed,
    /// Terminal: the last job failed; `ai_translation_error` carries details
    Failed,
}

impl TranslationStatus {
    /// Stored string form of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStatus::Pending => "pending",
            TranslationStatus::InProgress => "in_progress",
            TranslationStatus::Completed => "completed",
            TranslationStatus::Failed => "failed",
        }
    }

    /// Whether the status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TranslationStatus::Completed | TranslationStatus::Failed
        )
    }
}

impl fmt::Display for TranslationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TranslationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TranslationStatus::Pending),
            "in_progress" => Ok(TranslationStatus::InProgress),
            "completed" => Ok(TranslationStatus::Completed),
            "failed" => Ok(TranslationStatus::Failed),
            other => Err(format!("Unknown translation status: {other}")),
        }
    }
}

/// One translation fan-out request
///
/// Created when a mutation changes the source-locale value of a translatable
/// column, or explicitly re-triggered. The job itself is not persisted; its
/// progress is tracked on the record's status surface.
#[derive(Debug, Clone)]
pub struct TranslationJob {
    /// Entity whose column is translated
    pub entity: EntityKind,

    /// Record the column belongs to
    pub record_id: RecordId,

    /// Translatable column name
    pub column: String,

    /// Locale of the human-authored original text
    pub source_locale: Locale,

    /// Locales to translate into (the caller computes the full set minus the
    /// source; the pipeline filters defensively anyway)
    pub target_locales: Vec<Locale>,

    /// Domain hint injected into the oracle prompt
    pub context: String,
}

impl TranslationJob {
    /// Target locales with the source locale filtered out
    ///
    /// Idempotent even if the caller passed the source locale in error.
    pub fn effective_targets(&self) -> Vec<Locale> {
        self.target_locales
            .iter()
            .filter(|l| **l != self.source_locale)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn locale(code: &str) -> Locale {
        Locale::new(code).unwrap()
    }

    #[test]
    fn test_from_json_valid() {
        let map =
            TranslationMap::from_json(&json!({"en": "Cardiology", "ru": "Кардиология"})).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&locale("en")), Some("Cardiology"));
    }

    #[test]
    fn test_from_json_rejects_non_object() {
        assert!(TranslationMap::from_json(&json!("Cardiology")).is_err());
        assert!(TranslationMap::from_json(&json!(["en"])).is_err());
    }

    #[test]
    fn test_from_json_rejects_bad_entries() {
        assert!(TranslationMap::from_json(&json!({"en": 42})).is_err());
        assert!(TranslationMap::from_json(&json!({"en": ""})).is_err());
        assert!(TranslationMap::from_json(&json!({"": "x"})).is_err());
    }

    #[test]
    fn test_insert_ignores_empty() {
        let mut map = TranslationMap::new();
        map.insert(locale("en"), "");
        assert!(map.is_empty());
        map.insert(locale("en"), "Surgeon");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_merge_preserves_existing_locales() {
        let existing = TranslationMap::from_json(&json!({"en": "Cardiology"})).unwrap();
        let mut newer = TranslationMap::new();
        newer.insert(locale("sr-Latn"), "Kardiologija");

        let merged = existing.merged_with(&newer);
        assert_eq!(merged.get(&locale("en")), Some("Cardiology"));
        assert_eq!(merged.get(&locale("sr-Latn")), Some("Kardiologija"));
    }

    #[test]
    fn test_merge_newer_wins_per_locale() {
        let existing = TranslationMap::from_json(&json!({"en": "Old", "ru": "Старый"})).unwrap();
        let mut newer = TranslationMap::new();
        newer.insert(locale("en"), "New");

        let merged = existing.merged_with(&newer);
        assert_eq!(merged.get(&locale("en")), Some("New"));
        assert_eq!(merged.get(&locale("ru")), Some("Старый"));
    }

    #[test]
    fn test_to_json_roundtrip() {
        let value = json!({"en": "Surgeon", "ru": "Хирург"});
        let map = TranslationMap::from_json(&value).unwrap();
        assert_eq!(map.to_json(), value);
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            TranslationStatus::Pending,
            TranslationStatus::InProgress,
            TranslationStatus::Completed,
            TranslationStatus::Failed,
        ] {
            let parsed: TranslationStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("done".parse::<TranslationStatus>().is_err());
    }

    #[test]
    fn test_status_terminality() {
        assert!(!TranslationStatus::Pending.is_terminal());
        assert!(!TranslationStatus::InProgress.is_terminal());
        assert!(TranslationStatus::Completed.is_terminal());
        assert!(TranslationStatus::Failed.is_terminal());
    }

    #[test]
    fn test_effective_targets_filters_source() {
        let job = TranslationJob {
            entity: EntityKind::Profession,
            record_id: RecordId::new(7).unwrap(),
            column: "name_translations".to_string(),
            source_locale: locale("en"),
            target_locales: vec![locale("en"), locale("ru"), locale("sr-Latn")],
            context: String::new(),
        };
        assert_eq!(job.effective_targets(), vec![locale("ru"), locale("sr-Latn")]);
    }
}
