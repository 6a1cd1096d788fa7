// esindex - Elasticsearch index settings reconciler
// Copyright (c) 2025 esindex Contributors
// Licensed under the MIT License

//! # esindex - Elasticsearch index settings reconciler
//!
//! esindex reads the flat settings map Elasticsearch reports for an index and
//! reconciles it into a strongly-typed settings record, keeping the complete
//! untyped payload alongside as normalized JSON.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Registering** the static and dynamic index setting keys that get typed fields
//! - **Coercing** each reported value into its field's declared type
//! - **Preserving** every reported key, known or not, in the raw payload
//! - **Reading** every index matching a target with a configurable failure policy
//!
//! ## Architecture
//!
//! esindex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (registry, reconciliation engine, indices data source)
//! - [`adapters`] - External integrations (Elasticsearch REST API)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use esindex::core::reconcile::reconcile_index_settings;
//! use esindex::domain::{IndexName, SettingValue, SettingsMap};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let index = IndexName::new("logs")?;
//! let mut settings = SettingsMap::new();
//! settings.insert("index.number_of_shards".into(), SettingValue::from("3"));
//! settings.insert("index.blocks.write".into(), SettingValue::Bool(false));
//!
//! let record = reconcile_index_settings(&index, &settings)?;
//! assert_eq!(record.number_of_shards, Some(3));
//! assert_eq!(record.blocks_write, Some(false));
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading a Cluster
//!
//! ```rust,no_run
//! use esindex::adapters::elasticsearch::ElasticsearchClient;
//! use esindex::config::load_config;
//! use esindex::core::indices::IndicesDataSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("esindex.toml")?;
//!     let client = ElasticsearchClient::new(config.elasticsearch)?;
//!     let data_source = IndicesDataSource::new(Arc::new(client), config.indices)?;
//!
//!     let outcome = data_source.read(Some("logs-*")).await?;
//!     println!("Reconciled {} indices", outcome.summary.reconciled);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::EsIndexError`]; the engine itself
//! returns [`domain::ReconcileError`], which names the index and, where there
//! is one, the offending field.
//!
//! ## Logging
//!
//! esindex uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! tracing::info!(index = "logs", "Reading index");
//! tracing::warn!(index = "logs", field = "codec", "Skipping index");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
