//! Draft validation against the entity registry
//!
//! Validation runs before any store I/O and reports every violation at
//! once, so a UI can render per-field messages in a single round trip.

use crate::domain::{EntityKind, FieldViolation, Locale, RecordDraft, ValidationError};
use serde_json::Value;

/// Validates a normalised draft for the given entity
///
/// Checks that every required field is present and non-null, that every
/// populated translatable column is a well-formed locale map, and that a
/// required translatable column carries the caller's source-locale entry.
///
/// # Errors
///
/// Returns a [`ValidationError`] carrying one violation per offending field.
pub fn validate_draft(
    entity: EntityKind,
    draft: &RecordDraft,
    source_locale: &Locale,
) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    for field in entity.required_fields() {
        match draft.get(field) {
            None | Some(Value::Null) => {
                violations.push(FieldViolation::new(*field, "is required"));
            }
            Some(_) if entity.translatable_columns().contains(field) => {
                // Checked below together with the optional translatable
                // columns; only the source-locale presence is required here
                match draft.translations(field) {
                    Ok(Some(map)) => {
                        if map.get(source_locale).is_none() {
                            violations.push(FieldViolation::new(
                                *field,
                                format!("must carry a {source_locale} entry"),
                            ));
                        }
                    }
                    Ok(None) => {
                        violations.push(FieldViolation::new(*field, "is required"));
                    }
                    // Shape violation reported by the loop below
                    Err(_) => {}
                }
            }
            Some(_) => {}
        }
    }

    for column in entity.translatable_columns() {
        if draft.get(column).is_some() && draft.translations(column).is_err() {
            violations.push(FieldViolation::new(
                *column,
                "must be an object of locale code to non-empty string",
            ));
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}
