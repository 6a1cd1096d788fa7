//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_SUCCESS};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "esindex.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing esindex configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your cluster endpoint", self.output);
                println!("  2. Put credentials in a .env file:");
                println!("     - ESINDEX_ELASTICSEARCH_USERNAME and ESINDEX_ELASTICSEARCH_PASSWORD");
                println!("     - or ESINDEX_ELASTICSEARCH_API_KEY");
                println!("  3. Validate configuration: esindex validate-config");
                println!("  4. Read indices: esindex read --pretty");
                println!();
                Ok(EXIT_SUCCESS)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# esindex Configuration File
# Elasticsearch index settings reconciler

[application]
log_level = "info"

[elasticsearch]
endpoint = "http://localhost:9200"
tls_verify = true
timeout_seconds = 60

[indices]
target = "*"
include_hidden = false
on_error = "abort"

[logging]
local_enabled = false
local_path = "/var/log/esindex"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# esindex Configuration File
# Elasticsearch index settings reconciler
#
# Values of the form ${VAR_NAME} are replaced with environment variables.
# Any option can also be overridden with ESINDEX_<SECTION>_<KEY>, for example
# ESINDEX_INDICES_TARGET or ESINDEX_ELASTICSEARCH_PASSWORD.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Elasticsearch Cluster
# ============================================================================
[elasticsearch]
# Cluster URL (http or https)
endpoint = "https://localhost:9200"

# Basic authentication
# username = "elastic"
# password = "${ESINDEX_ELASTIC_PASSWORD}"

# API key authentication (instead of basic)
# api_key = "${ESINDEX_ELASTIC_API_KEY}"

# Verify TLS certificates (disable only for local clusters)
tls_verify = true

# Request timeout in seconds
timeout_seconds = 60

[elasticsearch.retry]
# Retries for connection failures, timeouts and 5xx responses
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Index Selection
# ============================================================================
[indices]
# Index name, comma-separated list or wildcard pattern
target = "*"

# Include hidden and dot-prefixed indices
include_hidden = false

# What to do when one index fails to reconcile (abort or skip)
on_error = "abort"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to the console
local_enabled = false

# Directory for log files
local_path = "/var/log/esindex"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::config::OnError;
    use tempfile::TempDir;

    #[test]
    fn test_generate_minimal_config_parses() {
        let _guard = crate::config::loader::tests::ENV_LOCK.lock().unwrap();
        let config = parse_config(&InitArgs::generate_minimal_config()).unwrap();
        assert_eq!(config.indices.on_error, OnError::Abort);
        assert!(!config.logging.local_enabled);
    }

    #[test]
    fn test_generate_config_with_examples_parses() {
        let _guard = crate::config::loader::tests::ENV_LOCK.lock().unwrap();
        let content = InitArgs::generate_config_with_examples();
        assert!(content.contains("[elasticsearch.retry]"));

        let config = parse_config(&content).unwrap();
        assert_eq!(config.elasticsearch.retry.max_retries, 3);
        assert_eq!(config.elasticsearch.auth_scheme(), "none");
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("esindex.toml");
        fs::write(&output, "existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), EXIT_CONFIG);
        assert_eq!(fs::read_to_string(&output).unwrap(), "existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), EXIT_SUCCESS);
        assert!(fs::read_to_string(&output).unwrap().contains("[indices]"));
    }
}
