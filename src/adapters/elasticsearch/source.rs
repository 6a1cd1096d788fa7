//! Settings source trait
//!
//! The seam between the indices data source and the cluster. The HTTP client
//! implements it; tests substitute an in-memory source.

use super::models::IndexDocument;
use crate::domain::{IndexName, Result, SettingsMap};
use async_trait::async_trait;

/// Anything that can report index settings
///
/// # Example
///
/// ```no_run
/// use esindex::adapters::elasticsearch::{ElasticsearchClient, SettingsSource};
/// use esindex::config::ElasticsearchConfig;
/// use esindex::domain::IndexName;
///
/// # async fn example() -> esindex::domain::Result<()> {
/// let client = ElasticsearchClient::new(ElasticsearchConfig::default())?;
/// let index = IndexName::new("logs").unwrap();
///
/// let settings = client.fetch_settings(&index).await?;
/// println!("{} settings reported", settings.len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait SettingsSource: Send + Sync {
    /// Fetch the flat settings map of one index
    ///
    /// # Errors
    ///
    /// Returns an error if the index does not exist or the cluster cannot be reached.
    async fn fetch_settings(&self, index: &IndexName) -> Result<SettingsMap>;

    /// Fetch every index matching `target` with its aliases, mappings and settings
    ///
    /// `target` is an index name, a comma-separated list or a wildcard pattern.
    /// A pattern matching nothing yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster cannot be reached or rejects the request.
    async fn get_indices(&self, target: &str, include_hidden: bool) -> Result<Vec<IndexDocument>>;

    /// Where the settings come from, for logs
    fn endpoint(&self) -> &str;
}
