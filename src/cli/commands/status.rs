//! Status command implementation
//!
//! This module implements the `status` command for inspecting a record's
//! version and translation status surface.

use crate::adapters::postgres::{PostgresClient, PostgresStore};
use crate::adapters::store::RecordStore;
use crate::config::load_config;
use crate::domain::{EntityKind, Locale, RecordId};
use clap::Args;
use std::sync::Arc;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Entity table name (e.g. professions, cities)
    #[arg(long)]
    pub entity: String,

    /// Record identifier
    #[arg(long)]
    pub id: i64,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let entity: EntityKind = match self.entity.parse() {
            Ok(e) => e,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let record_id = match RecordId::new(self.id) {
            Ok(id) => id,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        println!("📊 Record Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
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
        let store = PostgresStore::new(Arc::new(client));

        let record = match store.fetch(entity, record_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                println!("Record not found: {entity} id {record_id}");
                return Ok(0);
            }
            Err(e) => {
                println!("❌ Failed to fetch record");
                println!("   Error: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!("  Entity: {entity}");
        println!("  Id: {}", record.id);
        println!("  Version: {}", record.version);
        if let Some(updated_at) = record.updated_at {
            println!("  Updated At: {updated_at}");
        }
        println!(
            "  Translation Status: {}",
            record
                .translation_status
                .map(|s| s.to_string())
                .unwrap_or_else(|| "never scheduled".to_string())
        );
        if let Some(error) = &record.translation_error {
            println!("  Translation Error: {error}");
        }

        for column in entity.translatable_columns() {
            match record.translations(column) {
                Ok(Some(map)) => {
                    let codes: Vec<&str> = map.locales().map(Locale::as_str).collect();
                    println!("  {column}: {}", codes.join(", "));
                }
                Ok(None) => println!("  {column}: (empty)"),
                Err(e) => println!("  {column}: malformed ({e})"),
            }
        }
        println!();
        Ok(0)
    }
}
