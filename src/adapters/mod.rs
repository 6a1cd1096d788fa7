//! External system integrations for esindex.
//!
//! - [`elasticsearch`] - Elasticsearch REST API integration
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind a trait
//! ([`elasticsearch::SettingsSource`]) so the data source can be tested with an
//! in-memory implementation.
//!
//! ```rust,no_run
//! use esindex::adapters::elasticsearch::{ElasticsearchClient, SettingsSource};
//! use esindex::config::{secret_string, ElasticsearchConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ElasticsearchConfig {
//!     endpoint: "https://localhost:9200".to_string(),
//!     username: Some("elastic".to_string()),
//!     password: Some(secret_string("changeme".to_string())),
//!     ..Default::default()
//! };
//!
//! let client = ElasticsearchClient::new(config)?;
//! let indices = client.get_indices("*", false).await?;
//! # Ok(())
//! # }
//! ```

pub mod elasticsearch;
