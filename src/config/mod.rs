//! Configuration management for esindex.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! esindex uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`ESINDEX_<SECTION>_<KEY>`)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use esindex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("esindex.toml")?;
//!
//! println!("Cluster: {}", config.elasticsearch.endpoint);
//! println!("Target: {}", config.indices.target);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`ElasticsearchConfig`] - Cluster endpoint, authentication, TLS and retries
//! - [`IndicesConfig`] - Which indices to read and the failure policy
//! - [`LoggingConfig`] - Optional JSON file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [elasticsearch]
//! endpoint = "https://localhost:9200"
//! username = "elastic"
//! password = "${ESINDEX_ELASTIC_PASSWORD}"
//!
//! [indices]
//! target = "logs-*"
//! on_error = "skip"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, ElasticsearchConfig, EsIndexConfig, IndicesConfig, LoggingConfig, OnError,
    RetryConfig,
};
pub use secret::{discard_empty, secret_string, SecretString, SecretValue};
