//! Translate command implementation
//!
//! This module implements the `translate` command, the explicit re-trigger
//! path for translation fan-out: it runs one job synchronously against the
//! configured store and oracle and reports the outcome.

use crate::adapters::oracle::HttpOracleClient;
use crate::adapters::postgres::{PostgresClient, PostgresStore};
use crate::config::load_config;
use crate::core::translation::{JobOutcome, LocaleSet, TranslationPipeline};
use crate::domain::{EntityKind, Locale, RecordId, TranslationJob};
use clap::Args;
use std::sync::Arc;

/// Arguments for the translate command
#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Entity table name (e.g. professions, cities)
    #[arg(long)]
    pub entity: String,

    /// Record identifier
    #[arg(long)]
    pub id: i64,

    /// Translatable column (defaults to the entity's first translatable column)
    #[arg(long)]
    pub column: Option<String>,

    /// Source locale of the human-authored text
    #[arg(long, default_value = "en")]
    pub source_locale: String,
}

impl TranslateArgs {
    /// Execute the translate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let entity: EntityKind = match self.entity.parse() {
            Ok(e) => e,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let column = match self.resolve_column(entity) {
            Ok(c) => c,
            Err(message) => {
                println!("❌ {message}");
                return Ok(2);
            }
        };

        let record_id = match RecordId::new(self.id) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let source_locale = match Locale::new(self.source_locale.as_str()) {
            Ok(l) => l,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        println!(
            "🌐 Translating {entity} record {record_id}, column {column}, from {source_locale}"
        );
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        let locales = match LocaleSet::from_codes(&config.translation.locales) {
            Ok(l) => l,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let client = match PostgresClient::new(config.database).await {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to create database client");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };
        let store = Arc::new(PostgresStore::new(Arc::new(client)));

        let oracle = match HttpOracleClient::new(config.oracle) {
            Ok(o) => o,
            Err(e) => {
                println!("❌ Failed to create oracle client");
                println!("   Error: {e}");
                return Ok(4);
            }
        };

        let pipeline = TranslationPipeline::new(store, Arc::new(oracle));
        let job = TranslationJob {
            entity,
            record_id,
            column,
            target_locales: locales.targets_excluding(&source_locale),
            source_locale,
            context: entity.context().to_string(),
        };

        match pipeline.execute(&job).await {
            Ok(JobOutcome::Updated(locales)) => {
                let codes: Vec<&str> = locales.iter().map(Locale::as_str).collect();
                println!("✅ Translated into: {}", codes.join(", "));
                Ok(0)
            }
            Ok(JobOutcome::NothingToTranslate) => {
                println!("✅ Nothing to translate; record marked completed");
                Ok(0)
            }
            Ok(JobOutcome::NoNewTranslations) => {
                println!("✅ Oracle produced no usable translations; record marked completed");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Translation failed (recorded on the record)");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn resolve_column(&self, entity: EntityKind) -> Result<String, String> {
        let columns = entity.translatable_columns();
        match &self.column {
            Some(column) if columns.contains(&column.as_str()) => Ok(column.clone()),
            Some(column) => Err(format!(
                "Column '{column}' is not translatable for {entity}; expected one of: {}",
                columns.join(", ")
            )),
            None => columns
                .first()
                .map(|c| c.to_string())
                .ok_or_else(|| format!("Entity {entity} has no translatable columns")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(entity: &str, column: Option<&str>) -> TranslateArgs {
        TranslateArgs {
            entity: entity.to_string(),
            id: 7,
            column: column.map(String::from),
            source_locale: "en".to_string(),
        }
    }

    #[test]
    fn test_resolve_column_defaults_to_first() {
        let column = args("professions", None)
            .resolve_column(EntityKind::Profession)
            .unwrap();
        assert_eq!(column, "name_translations");
    }

    #[test]
    fn test_resolve_column_rejects_unknown() {
        assert!(args("professions", Some("nope"))
            .resolve_column(EntityKind::Profession)
            .is_err());
    }

    #[test]
    fn test_resolve_column_rejects_untranslatable_entity() {
        assert!(args("companies", None)
            .resolve_column(EntityKind::Company)
            .is_err());
    }

    #[tokio::test]
    async fn test_unknown_entity_is_config_error() {
        let mut a = args("unknown_table", None);
        a.entity = "unknown_table".to_string();
        let code = a.execute("definitely-missing.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
