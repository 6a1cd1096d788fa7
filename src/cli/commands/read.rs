//! Read command implementation
//!
//! Runs the indices data source against the configured cluster and prints
//! the reconciled index models as JSON on stdout.

use super::{exit_code_for, EXIT_SUCCESS};
use crate::adapters::elasticsearch::ElasticsearchClient;
use crate::config::{load_config, OnError};
use crate::core::indices::{IndicesDataSource, IndicesReadOutcome};
use crate::domain::Result;
use clap::Args;
use std::sync::Arc;

/// Arguments for the read command
#[derive(Args, Debug, Default)]
pub struct ReadArgs {
    /// Index name, comma-separated list or wildcard pattern (overrides config)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Include hidden and dot-prefixed indices
    #[arg(long)]
    pub include_hidden: bool,

    /// Skip indices that fail to reconcile instead of aborting
    #[arg(long)]
    pub skip_errors: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl ReadArgs {
    /// Execute the read command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting read command");

        let outcome = match self.run(config_path).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "Read failed");
                eprintln!("❌ Read failed");
                eprintln!("   Error: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&outcome)?
        } else {
            serde_json::to_string(&outcome)?
        };
        println!("{json}");

        if !outcome.skipped.is_empty() {
            eprintln!(
                "⚠️  {} of {} indices skipped",
                outcome.summary.skipped, outcome.summary.matched
            );
        }

        Ok(EXIT_SUCCESS)
    }

    async fn run(&self, config_path: &str) -> Result<IndicesReadOutcome> {
        let config = load_config(config_path)?;

        let mut indices = config.indices;
        if self.include_hidden {
            indices.include_hidden = true;
        }
        if self.skip_errors {
            tracing::info!("Skipping indices that fail to reconcile");
            indices.on_error = OnError::Skip;
        }

        let client = ElasticsearchClient::new(config.elasticsearch)?;
        let data_source = IndicesDataSource::new(Arc::new(client), indices)?;
        data_source.read(self.target.as_deref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::EXIT_CONFIG;

    #[tokio::test]
    async fn test_read_missing_config_is_config_error() {
        let args = ReadArgs::default();
        let code = args.execute("/nonexistent/esindex.toml").await.unwrap();
        assert_eq!(code, EXIT_CONFIG);
    }
}
