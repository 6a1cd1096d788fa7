//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the esindex configuration file.

use super::{EXIT_CONFIG, EXIT_SUCCESS};
use crate::config::{load_config, EsIndexConfig};
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

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(EXIT_CONFIG)
            }
        }
    }
}

/// Summary lines for a loaded configuration, secrets redacted
pub fn summary_lines(config: &EsIndexConfig) -> Vec<String> {
    let es = &config.elasticsearch;
    let mut lines = vec![
        format!("Log Level: {}", config.application.log_level),
        format!("Elasticsearch Endpoint: {}", es.endpoint),
        format!("Authentication: {}", es.auth_scheme()),
    ];

    if let Some(username) = &es.username {
        lines.push(format!("Username: {username}"));
    }
    if let Some(password) = &es.password {
        lines.push(format!("Password: {}", password.expose_secret().redacted()));
    }
    if let Some(api_key) = &es.api_key {
        lines.push(format!("API Key: {}", api_key.expose_secret().redacted()));
    }

    lines.extend([
        format!("TLS Verify: {}", es.tls_verify),
        format!("Timeout: {}s", es.timeout_seconds),
        format!("Max Retries: {}", es.retry.max_retries),
        format!("Target: {}", config.indices.target),
        format!("Include Hidden: {}", config.indices.include_hidden),
        format!("On Error: {}", config.indices.on_error),
    ]);

    if config.logging.local_enabled {
        lines.push(format!(
            "File Logging: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    } else {
        lines.push("File Logging: disabled".to_string());
    }

    lines
}

fn print_summary(config: &EsIndexConfig) {
    println!("Configuration Summary:");
    for line in summary_lines(config) {
        println!("  {line}");
    }
}
