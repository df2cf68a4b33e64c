//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Kartoteka using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Kartoteka - Hospital Record Core
#[derive(Parser, Debug)]
#[command(name = "kartoteka")]
#[command(version, about, long_about = None)]
#[command(author = "Kartoteka Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "kartoteka.toml", env = "KARTOTEKA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "KARTOTEKA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Apply the bundled database schema
    Migrate(commands::migrate::MigrateArgs),

    /// Re-trigger translation fan-out for a record
    Translate(commands::translate::TranslateArgs),

    /// Show a record's version and translation status
    Status(commands::status::StatusArgs),
}
