//! Migrate command implementation
//!
//! This module implements the `migrate` command, which applies the bundled
//! schema migration to the configured PostgreSQL database.

use crate::adapters::postgres::PostgresClient;
use crate::config::load_config;
use clap::Args;

/// Arguments for the migrate command
#[derive(Args, Debug)]
pub struct MigrateArgs {}

impl MigrateArgs {
    /// Execute the migrate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Applying database schema");

        println!("🗄️  Applying Kartoteka schema");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
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

        if let Err(e) = client.test_connection().await {
            println!("❌ Failed to connect to {}", client.connection_string_safe());
            println!("   Error: {e}");
            return Ok(4);
        }

        match client.ensure_schema_exists().await {
            Ok(_) => {
                println!("✅ Schema applied to {}", client.connection_string_safe());
                Ok(0)
            }
            Err(e) => {
                println!("❌ Migration failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
