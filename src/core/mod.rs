//! Core business logic for esindex.
//!
//! # Modules
//!
//! - [`registry`] - The catalogue of reconciled setting keys and its self-check
//! - [`reconcile`] - The engine turning untyped settings maps into typed records
//! - [`indices`] - The data source driving the engine once per index
//!
//! # Read Workflow
//!
//! 1. **Verify**: Check the registry against the settings record at startup
//! 2. **Fetch**: Get every index matching the target with flat settings
//! 3. **Reconcile**: Run the engine independently for each index
//! 4. **Apply policy**: Abort on the first failure, or skip and record it
//! 5. **Report**: Log and return the read summary
//!
//! # Example
//!
//! ```rust,no_run
//! use esindex::adapters::elasticsearch::ElasticsearchClient;
//! use esindex::config::load_config;
//! use esindex::core::indices::IndicesDataSource;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("esindex.toml")?;
//! let client = ElasticsearchClient::new(config.elasticsearch)?;
//! let data_source = IndicesDataSource::new(Arc::new(client), config.indices)?;
//!
//! let outcome = data_source.read(Some("logs-*")).await?;
//! println!("Reconciled: {}", outcome.summary.reconciled);
//! println!("Skipped: {}", outcome.summary.skipped);
//! # Ok(())
//! # }
//! ```

pub mod indices;
pub mod reconcile;
pub mod registry;
