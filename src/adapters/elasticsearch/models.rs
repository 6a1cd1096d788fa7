//! Elasticsearch API models
//!
//! Wire formats of the index APIs, kept apart from the domain types. All
//! requests ask for `flat_settings=true`, so settings arrive as one level of
//! dotted keys.

use crate::domain::{ElasticsearchError, IndexName, SettingsMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a `GET /{index}/_settings` response
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsEntry {
    #[serde(default)]
    pub settings: SettingsMap,
}

/// Response of `GET /{index}/_settings`, keyed by concrete index name
pub type SettingsResponse = BTreeMap<String, SettingsEntry>;

/// One entry of a `GET /{target}` response
#[derive(Debug, Clone, Deserialize)]
pub struct IndexEntry {
    #[serde(default)]
    pub aliases: BTreeMap<String, serde_json::Value>,

    #[serde(default)]
    pub mappings: serde_json::Value,

    #[serde(default)]
    pub settings: SettingsMap,
}

/// Response of `GET /{target}`, keyed by concrete index name
pub type GetIndexResponse = BTreeMap<String, IndexEntry>;

/// One index as reported by the cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexDocument {
    /// Concrete index name
    pub name: IndexName,

    /// Alias name to alias definition
    pub aliases: BTreeMap<String, serde_json::Value>,

    /// Index mappings as returned by the cluster
    pub mappings: serde_json::Value,

    /// Flat settings map
    pub settings: SettingsMap,
}

impl IndexDocument {
    /// Build a document for `name` with only settings
    pub fn with_settings(name: IndexName, settings: SettingsMap) -> Self {
        Self {
            name,
            aliases: BTreeMap::new(),
            mappings: serde_json::Value::Null,
            settings,
        }
    }
}

/// Convert a get-index response into documents sorted by index name
///
/// # Errors
///
/// Returns [`ElasticsearchError::InvalidResponse`] if the cluster reports a
/// name that is not a valid index name.
pub fn into_documents(
    response: GetIndexResponse,
) -> Result<Vec<IndexDocument>, ElasticsearchError> {
    response
        .into_iter()
        .map(|(name, entry)| {
            let name = IndexName::new(name.as_str()).map_err(|e| {
                ElasticsearchError::InvalidResponse(format!("index name '{name}': {e}"))
            })?;
            Ok(IndexDocument {
                name,
                aliases: entry.aliases,
                mappings: entry.mappings,
                settings: entry.settings,
            })
        })
        .collect()
}

/// Pick the settings for `index` out of a settings response
///
/// The response is keyed by concrete index name; when `index` is an alias
/// resolving to a single index, that single entry is used.
///
/// # Errors
///
/// - [`ElasticsearchError::IndexNotFound`] if the response is empty
/// - [`ElasticsearchError::InvalidResponse`] if `index` resolved to several indices
pub fn settings_for(
    index: &IndexName,
    mut response: SettingsResponse,
) -> Result<SettingsMap, ElasticsearchError> {
    if let Some(entry) = response.remove(index.as_str()) {
        return Ok(entry.settings);
    }

    let mut entries = response.into_iter();
    match (entries.next(), entries.next()) {
        (Some((_, entry)), None) => Ok(entry.settings),
        (None, _) => Err(ElasticsearchError::IndexNotFound(index.to_string())),
        (Some(_), Some(_)) => Err(ElasticsearchError::InvalidResponse(format!(
            "'{index}' resolved to more than one index"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SettingValue;
    use serde_json::json;

    fn name(s: &str) -> IndexName {
        IndexName::new(s).unwrap()
    }

    #[test]
    fn test_parse_settings_response() {
        let response: SettingsResponse = serde_json::from_value(json!({
            "logs": {
                "settings": {
                    "index.number_of_shards": "1",
                    "index.sort.field": ["timestamp"]
                }
            }
        }))
        .unwrap();

        let settings = settings_for(&name("logs"), response).unwrap();
        assert_eq!(
            settings.get("index.number_of_shards"),
            Some(&SettingValue::from("1"))
        );
        assert_eq!(settings.len(), 2);
    }

    #[test]
    fn test_settings_for_alias_with_single_index() {
        let response: SettingsResponse = serde_json::from_value(json!({
            "logs-000001": {"settings": {"index.codec": "default"}}
        }))
        .unwrap();

        let settings = settings_for(&name("logs"), response).unwrap();
        assert!(settings.contains_key("index.codec"));
    }

    #[test]
    fn test_settings_for_ambiguous_alias() {
        let response: SettingsResponse = serde_json::from_value(json!({
            "logs-000001": {"settings": {}},
            "logs-000002": {"settings": {}}
        }))
        .unwrap();

        let err = settings_for(&name("logs"), response).unwrap_err();
        assert!(matches!(err, ElasticsearchError::InvalidResponse(_)));
    }

    #[test]
    fn test_settings_for_empty_response() {
        let err = settings_for(&name("logs"), SettingsResponse::new()).unwrap_err();
        assert!(matches!(err, ElasticsearchError::IndexNotFound(_)));
    }

    #[test]
    fn test_into_documents_sorted() {
        let response: GetIndexResponse = serde_json::from_value(json!({
            "metrics": {"settings": {"index.codec": "default"}},
            "logs": {
                "aliases": {"current": {"is_write_index": true}},
                "mappings": {"properties": {"host": {"type": "keyword"}}},
                "settings": {"index.number_of_replicas": "0"}
            }
        }))
        .unwrap();

        let documents = into_documents(response).unwrap();
        assert_eq!(documents.len(), 2);
        assert_eq!(documents[0].name.as_str(), "logs");
        assert!(documents[0].aliases.contains_key("current"));
        assert_eq!(documents[1].name.as_str(), "metrics");
        assert_eq!(documents[1].mappings, serde_json::Value::Null);
    }

    #[test]
    fn test_into_documents_rejects_invalid_name() {
        let response: GetIndexResponse =
            serde_json::from_value(json!({"Bad Name": {"settings": {}}})).unwrap();
        assert!(into_documents(response).is_err());
    }
}
