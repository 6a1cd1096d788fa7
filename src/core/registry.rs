//! Setting key registry
//!
//! The fixed catalogue of index settings the engine reconciles, split into
//! static settings (fixed at index creation) and dynamic settings (updatable
//! on a live index). The split is for cataloguing only; both categories are
//! coerced the same way. Keys are stored without the `index.` prefix.

use crate::core::reconcile::naming::field_identifier;
use crate::core::reconcile::record::SettingsRecord;
use crate::domain::StructuralError;
use serde::Serialize;
use std::collections::HashSet;

/// Settings that can only be set at index creation
pub const STATIC_SETTING_KEYS: &[&str] = &[
    "number_of_shards",
    "number_of_routing_shards",
    "codec",
    "routing_partition_size",
    "load_fixed_bitset_filters_eagerly",
    "shard.check_on_startup",
    "sort.field",
    "sort.order",
    "mapping.coerce",
];

/// Settings that can be updated on a live index
pub const DYNAMIC_SETTING_KEYS: &[&str] = &[
    "number_of_replicas",
    "auto_expand_replicas",
    "refresh_interval",
    "search.idle.after",
    "max_result_window",
    "max_inner_result_window",
    "max_rescore_window",
    "max_docvalue_fields_search",
    "max_script_fields",
    "max_ngram_diff",
    "max_shingle_diff",
    "blocks.read_only",
    "blocks.read_only_allow_delete",
    "blocks.read",
    "blocks.write",
    "blocks.metadata",
    "max_refresh_listeners",
    "analyze.max_token_count",
    "highlight.max_analyzed_offset",
    "max_terms_count",
    "max_regex_length",
    "query.default_field",
    "routing.allocation.enable",
    "routing.rebalance.enable",
    "gc_deletes",
    "default_pipeline",
    "final_pipeline",
    "unassigned.node_left.delayed_timeout",
    "search.slowlog.threshold.query.warn",
    "search.slowlog.threshold.query.info",
    "search.slowlog.threshold.query.debug",
    "search.slowlog.threshold.query.trace",
    "search.slowlog.threshold.fetch.warn",
    "search.slowlog.threshold.fetch.info",
    "search.slowlog.threshold.fetch.debug",
    "search.slowlog.threshold.fetch.trace",
    "search.slowlog.level",
    "indexing.slowlog.threshold.index.warn",
    "indexing.slowlog.threshold.index.info",
    "indexing.slowlog.threshold.index.debug",
    "indexing.slowlog.threshold.index.trace",
    "indexing.slowlog.level",
    "indexing.slowlog.source",
];

/// The registry of index-level settings
pub const INDEX_SETTING_KEYS: SettingKeyRegistry =
    SettingKeyRegistry::new(STATIC_SETTING_KEYS, DYNAMIC_SETTING_KEYS);

/// Whether a setting is fixed at creation or updatable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingCategory {
    Static,
    Dynamic,
}

/// Two ordered, disjoint sets of dotted setting keys
///
/// Immutable process-wide data; the engine only ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingKeyRegistry {
    static_keys: &'static [&'static str],
    dynamic_keys: &'static [&'static str],
}

impl SettingKeyRegistry {
    /// Create a registry from its static and dynamic key lists
    pub const fn new(
        static_keys: &'static [&'static str],
        dynamic_keys: &'static [&'static str],
    ) -> Self {
        Self {
            static_keys,
            dynamic_keys,
        }
    }

    /// Keys fixed at index creation
    pub fn static_keys(&self) -> &'static [&'static str] {
        self.static_keys
    }

    /// Keys updatable on a live index
    pub fn dynamic_keys(&self) -> &'static [&'static str] {
        self.dynamic_keys
    }

    /// Static keys followed by dynamic keys, in declaration order
    pub fn all_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.static_keys
            .iter()
            .chain(self.dynamic_keys.iter())
            .copied()
    }

    /// Total number of registered keys
    pub fn len(&self) -> usize {
        self.static_keys.len() + self.dynamic_keys.len()
    }

    /// Whether the registry has no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which category a key belongs to, if it is registered
    pub fn category(&self, key: &str) -> Option<SettingCategory> {
        if self.static_keys.contains(&key) {
            Some(SettingCategory::Static)
        } else if self.dynamic_keys.contains(&key) {
            Some(SettingCategory::Dynamic)
        } else {
            None
        }
    }

    /// Check that this registry and the record `R` describe the same fields
    ///
    /// Every key must be registered once, map to exactly one declared field,
    /// and every declared field must be reached by exactly one key.
    ///
    /// # Errors
    ///
    /// Returns the first [`StructuralError`] found.
    pub fn verify<R: SettingsRecord>(&self) -> Result<(), StructuralError> {
        let mut keys = HashSet::new();
        let mut fields = HashSet::new();

        for key in self.all_keys() {
            if !keys.insert(key) {
                return Err(StructuralError::DuplicateKey {
                    key: key.to_string(),
                });
            }

            let field = field_identifier(key);
            if R::descriptor(&field).is_none() {
                return Err(StructuralError::MissingField {
                    key: key.to_string(),
                    field,
                });
            }

            // Two distinct keys can collapse to one identifier ("a.b" and "a_b")
            if !fields.insert(field) {
                return Err(StructuralError::DuplicateKey {
                    key: key.to_string(),
                });
            }
        }

        match R::FIELDS.iter().find(|d| !fields.contains(d.name)) {
            Some(unreached) => Err(StructuralError::UnregisteredField {
                field: unreached.name.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Check `registry` against the declared fields of `R`
///
/// Run once at startup so drift fails loudly before any cluster data is read.
///
/// # Errors
///
/// Returns the first [`StructuralError`] found.
pub fn verify_registry<R: SettingsRecord>(
    registry: &SettingKeyRegistry,
) -> Result<(), StructuralError> {
    registry.verify::<R>()?;
    tracing::debug!(
        static_keys = registry.static_keys().len(),
        dynamic_keys = registry.dynamic_keys().len(),
        "Setting key registry verified"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reconcile::IndexSettings;
    use crate::core::reconcile::record::settings_record;
    use serde::Deserialize;

    settings_record! {
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        struct Pair {
            alpha_one: Option<String> => String,
            beta: Option<i64> => Int,
        }
        raw: raw
    }

    #[test]
    fn test_all_keys_static_then_dynamic() {
        let keys: Vec<_> = INDEX_SETTING_KEYS.all_keys().collect();
        assert_eq!(keys.len(), INDEX_SETTING_KEYS.len());
        assert_eq!(keys[0], "number_of_shards");
        assert_eq!(keys[STATIC_SETTING_KEYS.len()], "number_of_replicas");
        assert_eq!(keys.last(), Some(&"indexing.slowlog.source"));
        assert!(!INDEX_SETTING_KEYS.is_empty());
    }

    #[test]
    fn test_static_and_dynamic_are_disjoint() {
        for key in STATIC_SETTING_KEYS {
            assert!(
                !DYNAMIC_SETTING_KEYS.contains(key),
                "{key} is both static and dynamic"
            );
        }
    }

    #[test]
    fn test_category() {
        assert_eq!(
            INDEX_SETTING_KEYS.category("sort.field"),
            Some(SettingCategory::Static)
        );
        assert_eq!(
            INDEX_SETTING_KEYS.category("blocks.write"),
            Some(SettingCategory::Dynamic)
        );
        assert_eq!(INDEX_SETTING_KEYS.category("index.blocks.write"), None);
    }

    #[test]
    fn test_index_registry_matches_index_settings() {
        assert_eq!(INDEX_SETTING_KEYS.verify::<IndexSettings>(), Ok(()));
        assert_eq!(IndexSettings::FIELDS.len(), INDEX_SETTING_KEYS.len());
        assert_eq!(verify_registry::<IndexSettings>(&INDEX_SETTING_KEYS), Ok(()));
    }

    #[test]
    fn test_verify_accepts_matching_pair() {
        const REGISTRY: SettingKeyRegistry = SettingKeyRegistry::new(&["alpha.one"], &["beta"]);
        assert_eq!(REGISTRY.verify::<Pair>(), Ok(()));
    }

    #[test]
    fn test_verify_missing_field() {
        const REGISTRY: SettingKeyRegistry =
            SettingKeyRegistry::new(&["alpha.one"], &["beta", "gamma"]);
        assert_eq!(
            REGISTRY.verify::<Pair>(),
            Err(StructuralError::MissingField {
                key: "gamma".to_string(),
                field: "gamma".to_string(),
            })
        );
    }

    #[test]
    fn test_verify_unregistered_field() {
        const REGISTRY: SettingKeyRegistry = SettingKeyRegistry::new(&["alpha.one"], &[]);
        assert_eq!(
            REGISTRY.verify::<Pair>(),
            Err(StructuralError::UnregisteredField {
                field: "beta".to_string(),
            })
        );
    }

    #[test]
    fn test_verify_duplicate_key_across_categories() {
        const REGISTRY: SettingKeyRegistry =
            SettingKeyRegistry::new(&["alpha.one", "beta"], &["beta"]);
        assert_eq!(
            REGISTRY.verify::<Pair>(),
            Err(StructuralError::DuplicateKey {
                key: "beta".to_string(),
            })
        );
    }

    #[test]
    fn test_verify_colliding_identifiers() {
        const REGISTRY: SettingKeyRegistry =
            SettingKeyRegistry::new(&["alpha.one", "alpha_one"], &["beta"]);
        assert_eq!(
            REGISTRY.verify::<Pair>(),
            Err(StructuralError::DuplicateKey {
                key: "alpha_one".to_string(),
            })
        );
    }
}
