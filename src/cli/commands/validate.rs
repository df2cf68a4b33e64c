//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Kartoteka configuration file.

use crate::config::load_config;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates on load
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  PostgreSQL: {}",
            config
                .database
                .connection_string
                .expose_secret()
                .as_ref()
                .split('@')
                .next_back()
                .unwrap_or("***")
        );
        println!("  Max Connections: {}", config.database.max_connections);
        println!("  SSL Mode: {}", config.database.ssl_mode);
        println!("  Oracle Endpoint: {}", config.oracle.endpoint_url);
        println!("  Oracle Model: {}", config.oracle.model);
        println!("  Locales: {:?}", config.translation.locales);
        println!("  Queue Capacity: {}", config.translation.queue_capacity);
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_file_is_config_error() {
        let args = ValidateArgs {};
        let code = args.execute("definitely-missing.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
