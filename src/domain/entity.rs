//! Entity registry
//!
//! This module is the single source of truth for the entities the hospital
//! dashboard manages: their table names, required fields, translatable
//! columns, and the domain hint injected into the translation oracle prompt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default oracle prompt context used when an entity has no dedicated one
pub const DEFAULT_CONTEXT: &str = "You are translating text for a business/healthcare \
     application. Maintain formal tone and accuracy.";

/// Entities subject to versioned mutation and, where marked, AI translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Patient general information (name, date of birth, residence)
    PatientGeneral,
    /// Company records
    Company,
    /// Professions / occupations
    Profession,
    /// Cities and place names
    City,
    /// Administrative document types
    DocumentType,
    /// Medical document types
    MedicalDocumentType,
    /// Medical services and procedures
    Service,
    /// Insurance providers
    InsuranceProvider,
    /// Insurance plans
    InsurancePlan,
    /// Medical examination types
    ExaminationType,
}

impl EntityKind {
    /// All registered entities
    pub const ALL: [EntityKind; 10] = [
        EntityKind::PatientGeneral,
        EntityKind::Company,
        EntityKind::Profession,
        EntityKind::City,
        EntityKind::DocumentType,
        EntityKind::MedicalDocumentType,
        EntityKind::Service,
        EntityKind::InsuranceProvider,
        EntityKind::InsurancePlan,
        EntityKind::ExaminationType,
    ];

    /// Table name backing this entity
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::PatientGeneral => "patient_general",
            EntityKind::Company => "companies",
            EntityKind::Profession => "professions",
            EntityKind::City => "cities",
            EntityKind::DocumentType => "document_types",
            EntityKind::MedicalDocumentType => "medical_document_types",
            EntityKind::Service => "services",
            EntityKind::InsuranceProvider => "insurance_providers",
            EntityKind::InsurancePlan => "insurance_plans",
            EntityKind::ExaminationType => "examination_types",
        }
    }

    /// Domain fields that must be present and non-empty on create and update
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::PatientGeneral => &["first_name", "last_name", "date_of_birth"],
            EntityKind::Company => &["name"],
            EntityKind::InsuranceProvider => &["name_translations"],
            EntityKind::InsurancePlan => &["name_translations"],
            EntityKind::ExaminationType => &["name_translations"],
            EntityKind::Profession
            | EntityKind::City
            | EntityKind::DocumentType
            | EntityKind::MedicalDocumentType
            | EntityKind::Service => &["name_translations"],
        }
    }

    /// Columns holding per-locale string maps subject to translation fan-out
    pub fn translatable_columns(&self) -> &'static [&'static str] {
        match self {
            EntityKind::PatientGeneral | EntityKind::Company => &[],
            EntityKind::Profession
            | EntityKind::City
            | EntityKind::DocumentType
            | EntityKind::MedicalDocumentType
            | EntityKind::Service
            | EntityKind::InsuranceProvider => &["name_translations"],
            EntityKind::InsurancePlan => &["name_translations", "description_translations"],
            EntityKind::ExaminationType => &["name_translations", "preparation_translations"],
        }
    }

    /// Whether any column of this entity is subject to translation
    pub fn is_translatable(&self) -> bool {
        !self.translatable_columns().is_empty()
    }

    /// Domain hint injected into the oracle system prompt for this entity
    ///
    /// These provide entity-aware guidance for more accurate translations.
    pub fn context(&self) -> &'static str {
        match self {
            EntityKind::Profession => {
                "You are translating job titles and professional occupations. \
                 Use formal, standardized terms appropriate for official documents \
                 and medical records. Preserve the professional meaning accurately \
                 across languages."
            }
            EntityKind::City => {
                "You are translating city/place names. Use the official or commonly \
                 accepted name in each target language. Some cities have established \
                 translations (e.g., Moscow/\u{041c}\u{043e}\u{0441}\u{043a}\u{0432}\u{0430}/Moskva), use those when applicable."
            }
            EntityKind::DocumentType => {
                "You are translating document type names for administrative use. \
                 Use precise, official terminology appropriate for business contexts."
            }
            EntityKind::MedicalDocumentType => {
                "You are translating names of medical document types. Use standard \
                 medical/healthcare terminology appropriate for clinical documentation."
            }
            EntityKind::Service => {
                "You are translating names of medical services and procedures. Use \
                 standard medical terminology appropriate for healthcare documentation."
            }
            EntityKind::InsuranceProvider | EntityKind::InsurancePlan => {
                "You are translating insurance-related terms. Use standard insurance \
                 industry terminology."
            }
            EntityKind::ExaminationType => {
                "You are translating medical examination type information for a \
                 healthcare clinic application. Use accurate medical terminology. Keep \
                 translations professional and clear for both patients and medical \
                 staff. For preparation instructions, ensure clarity so patients \
                 understand requirements like fasting."
            }
            EntityKind::PatientGeneral | EntityKind::Company => DEFAULT_CONTEXT,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .find(|e| e.table() == s)
            .copied()
            .ok_or_else(|| format!("Unknown entity table: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_are_unique() {
        let mut tables: Vec<_> = EntityKind::ALL.iter().map(|e| e.table()).collect();
        tables.sort_unstable();
        tables.dedup();
        assert_eq!(tables.len(), EntityKind::ALL.len());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for entity in EntityKind::ALL {
            let parsed: EntityKind = entity.table().parse().unwrap();
            assert_eq!(parsed, entity);
        }
        assert!("no_such_table".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_translatable_entities_have_context() {
        for entity in EntityKind::ALL {
            if entity.is_translatable() {
                assert_ne!(entity.context(), "", "{entity} should carry a context");
            }
        }
    }

    #[test]
    fn test_patient_general_is_not_translatable() {
        assert!(!EntityKind::PatientGeneral.is_translatable());
        assert!(EntityKind::PatientGeneral
            .required_fields()
            .contains(&"first_name"));
    }

    #[test]
    fn test_examination_type_columns() {
        assert_eq!(
            EntityKind::ExaminationType.translatable_columns(),
            &["name_translations", "preparation_translations"]
        );
    }

    #[test]
    fn test_serde_rename() {
        let json = serde_json::to_string(&EntityKind::ExaminationType).unwrap();
        assert_eq!(json, "\"examination_type\"");
    }
}
