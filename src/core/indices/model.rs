//! Per-index output model

use crate::adapters::elasticsearch::IndexDocument;
use crate::core::reconcile::{reconcile_index_settings, IndexSettings};
use crate::domain::{IndexName, ReconcileError};
use serde::Serialize;
use std::collections::BTreeSet;

/// One index as exposed by the data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexModel {
    /// Stable identifier, the concrete index name
    pub id: String,

    /// Concrete index name
    pub name: IndexName,

    /// Alias names pointing at this index
    pub aliases: BTreeSet<String>,

    /// Mappings as normalized JSON, absent when the index has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mappings: Option<String>,

    /// Typed settings with the raw passthrough
    pub settings: IndexSettings,
}

impl IndexModel {
    /// Reconcile a fetched index document into a model
    ///
    /// # Errors
    ///
    /// Returns the [`ReconcileError`] of the settings reconciliation, or a
    /// `Serialization` error if the mappings cannot be normalized.
    pub fn from_document(document: &IndexDocument) -> Result<Self, ReconcileError> {
        let settings = reconcile_index_settings(&document.name, &document.settings)?;
        let mappings = normalize_mappings(&document.mappings).map_err(|e| {
            ReconcileError::Serialization {
                index: document.name.to_string(),
                message: format!("failed to serialize mappings: {e}"),
            }
        })?;

        Ok(Self {
            id: document.name.to_string(),
            name: document.name.clone(),
            aliases: document.aliases.keys().cloned().collect(),
            mappings,
            settings,
        })
    }
}

/// Compact JSON for non-empty mappings
fn normalize_mappings(mappings: &serde_json::Value) -> serde_json::Result<Option<String>> {
    match mappings {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) if map.is_empty() => Ok(None),
        other => serde_json::to_string(other).map(Some),
    }
}
