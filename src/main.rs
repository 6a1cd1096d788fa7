// esindex - Elasticsearch index settings reconciler
// Copyright (c) 2025 esindex Contributors
// Licensed under the MIT License

use clap::Parser;
use esindex::cli::commands::EXIT_FATAL;
use esindex::cli::{Cli, Commands};
use esindex::config::{load_config, LoggingConfig};
use esindex::logging::init_logging;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands that load the config also get its logging section; a config that
    // fails to load is reported by the command itself
    let (config_level, logging_config) = if cli.command.needs_config() {
        match load_config(&cli.config) {
            Ok(config) => (Some(config.application.log_level), config.logging),
            Err(_) => (None, LoggingConfig::default()),
        }
    } else {
        (None, LoggingConfig::default())
    };

    let log_level = cli
        .log_level
        .clone()
        .or(config_level)
        .unwrap_or_else(|| "info".to_string());

    let logging_guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "esindex - Elasticsearch index settings reconciler"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors; flush file logs first
    drop(logging_guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Read(args) => args.execute(&cli.config).await,
        Commands::Settings(args) => args.execute(&cli.config).await,
        Commands::CheckRegistry(args) => args.execute().await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
