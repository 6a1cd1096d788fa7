//! Indices data source
//!
//! Reads every index matching a target from a [`SettingsSource`] and
//! reconciles each one with an independent engine invocation.

use super::model::IndexModel;
use super::summary::{ReadSummary, SkippedIndex};
use crate::adapters::elasticsearch::SettingsSource;
use crate::config::{IndicesConfig, OnError};
use crate::core::reconcile::{reconcile_index_settings, IndexSettings};
use crate::core::registry::{verify_registry, INDEX_SETTING_KEYS};
use crate::domain::{IndexName, Result};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Result of reading a target
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicesReadOutcome {
    /// Reconciled indices, sorted by name
    pub indices: Vec<IndexModel>,

    /// Indices left out under the skip policy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedIndex>,

    /// Counts and timing
    pub summary: ReadSummary,
}

/// The indices data source
///
/// # Example
///
/// ```rust,no_run
/// use esindex::adapters::elasticsearch::ElasticsearchClient;
/// use esindex::config::load_config;
/// use esindex::core::indices::IndicesDataSource;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config("esindex.toml")?;
/// let client = ElasticsearchClient::new(config.elasticsearch)?;
///
/// let data_source = IndicesDataSource::new(Arc::new(client), config.indices)?;
/// let outcome = data_source.read(None).await?;
/// println!("{} indices", outcome.indices.len());
/// # Ok(())
/// # }
/// ```
pub struct IndicesDataSource {
    source: Arc<dyn SettingsSource>,
    config: IndicesConfig,
}

impl IndicesDataSource {
    /// Create a data source, verifying the setting key registry first
    ///
    /// # Errors
    ///
    /// Returns a `Registry` error if the registry and the settings record have
    /// drifted apart.
    pub fn new(source: Arc<dyn SettingsSource>, config: IndicesConfig) -> Result<Self> {
        verify_registry::<IndexSettings>(&INDEX_SETTING_KEYS)?;
        Ok(Self { source, config })
    }

    /// Read and reconcile every index matching `target`
    ///
    /// Falls back to the configured target when `target` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cluster request fails, or on the first index
    /// that fails to reconcile when the policy is [`OnError::Abort`].
    pub async fn read(&self, target: Option<&str>) -> Result<IndicesReadOutcome> {
        let started = Instant::now();
        let target = target.unwrap_or(self.config.target.as_str());

        tracing::info!(
            target_pattern = %target,
            endpoint = %self.source.endpoint(),
            include_hidden = self.config.include_hidden,
            "Reading indices"
        );

        let mut documents = self
            .source
            .get_indices(target, self.config.include_hidden)
            .await?;
        documents.sort_by(|a, b| a.name.cmp(&b.name));

        let mut summary = ReadSummary::started(documents.len());
        let mut indices = Vec::with_capacity(documents.len());
        let mut skipped = Vec::new();

        for document in &documents {
            match IndexModel::from_document(document) {
                Ok(model) => {
                    summary.reconciled += 1;
                    indices.push(model);
                }
                Err(e) => match self.config.on_error {
                    OnError::Abort => {
                        tracing::error!(
                            index = %document.name,
                            field = e.field().unwrap_or_default(),
                            error = %e,
                            "Index failed to reconcile, aborting read"
                        );
                        return Err(e.into());
                    }
                    OnError::Skip => {
                        tracing::warn!(
                            index = %document.name,
                            field = e.field().unwrap_or_default(),
                            error = %e,
                            "Skipping index that failed to reconcile"
                        );
                        summary.skipped += 1;
                        skipped.push(SkippedIndex::new(document.name.clone(), &e));
                    }
                },
            }
        }

        let summary = summary.with_duration(started.elapsed());
        summary.log_summary();

        Ok(IndicesReadOutcome {
            indices,
            skipped,
            summary,
        })
    }

    /// Fetch and reconcile the settings of a single index
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the settings do not reconcile.
    pub async fn read_one(&self, index: &IndexName) -> Result<IndexSettings> {
        let settings = self.source.fetch_settings(index).await?;
        Ok(reconcile_index_settings(index, &settings)?)
    }
}
