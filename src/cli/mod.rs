//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for esindex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// esindex - Elasticsearch index settings reconciler
#[derive(Parser, Debug)]
#[command(name = "esindex")]
#[command(version, about, long_about = None)]
#[command(author = "esindex Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "esindex.toml", env = "ESINDEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ESINDEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read and reconcile every index matching the target
    Read(commands::read::ReadArgs),

    /// Reconcile the settings of a single index
    Settings(commands::settings::SettingsArgs),

    /// Verify the setting key registry against the settings record
    CheckRegistry(commands::check_registry::CheckRegistryArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Commands {
    /// Whether the command needs a loadable configuration file
    pub fn needs_config(&self) -> bool {
        !matches!(self, Commands::CheckRegistry(_) | Commands::Init(_))
    }
}
