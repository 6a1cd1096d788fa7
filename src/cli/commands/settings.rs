//! Settings command implementation
//!
//! Fetches and reconciles a single index and prints its settings record.

use super::{report_failure, EXIT_CONFIG, EXIT_SUCCESS};
use crate::adapters::elasticsearch::ElasticsearchClient;
use crate::config::load_config;
use crate::core::indices::IndicesDataSource;
use crate::core::reconcile::{IndexSettings, SettingsRecord};
use crate::domain::{IndexName, Result};
use clap::Args;
use std::sync::Arc;

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Index or single-index alias to reconcile
    pub index: String,

    /// Print only the raw settings passthrough
    #[arg(long)]
    pub raw_only: bool,
}

impl SettingsArgs {
    /// Execute the settings command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let index = match IndexName::new(self.index.as_str()) {
            Ok(index) => index,
            Err(e) => {
                eprintln!("❌ Invalid index name '{}': {e}", self.index);
                return Ok(EXIT_CONFIG);
            }
        };

        tracing::info!(index = %index, "Reconciling index settings");

        let settings = match self.run(config_path, &index).await {
            Ok(settings) => settings,
            Err(e) => return Ok(report_failure("Reconcile", &e)),
        };

        if self.raw_only {
            println!("{}", settings.raw().unwrap_or("{}"));
        } else {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }

        Ok(EXIT_SUCCESS)
    }

    async fn run(&self, config_path: &str, index: &IndexName) -> Result<IndexSettings> {
        let config = load_config(config_path)?;
        let client = ElasticsearchClient::new(config.elasticsearch)?;
        let data_source = IndicesDataSource::new(Arc::new(client), config.indices)?;
        data_source.read_one(index).await
    }
}
