//! Typed index settings record
//!
//! One optional field per key in
//! [`INDEX_SETTING_KEYS`](crate::core::registry::INDEX_SETTING_KEYS), named by
//! the key with dots replaced by underscores, plus `settings_raw`.

use super::record::settings_record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

settings_record! {
    /// Index settings as reported by the cluster, typed
    ///
    /// A field is `None` when the cluster did not report that setting.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct IndexSettings {
        // Static
        number_of_shards: Option<i64> => Int,
        number_of_routing_shards: Option<i64> => Int,
        codec: Option<String> => String,
        routing_partition_size: Option<i64> => Int,
        load_fixed_bitset_filters_eagerly: Option<bool> => Bool,
        shard_check_on_startup: Option<String> => String,
        sort_field: Option<Vec<String>> => OrderedList,
        sort_order: Option<Vec<String>> => OrderedList,
        mapping_coerce: Option<bool> => Bool,

        // Dynamic
        number_of_replicas: Option<i64> => Int,
        auto_expand_replicas: Option<String> => String,
        refresh_interval: Option<String> => String,
        search_idle_after: Option<String> => String,
        max_result_window: Option<i64> => Int,
        max_inner_result_window: Option<i64> => Int,
        max_rescore_window: Option<i64> => Int,
        max_docvalue_fields_search: Option<i64> => Int,
        max_script_fields: Option<i64> => Int,
        max_ngram_diff: Option<i64> => Int,
        max_shingle_diff: Option<i64> => Int,
        blocks_read_only: Option<bool> => Bool,
        blocks_read_only_allow_delete: Option<bool> => Bool,
        blocks_read: Option<bool> => Bool,
        blocks_write: Option<bool> => Bool,
        blocks_metadata: Option<bool> => Bool,
        max_refresh_listeners: Option<i64> => Int,
        analyze_max_token_count: Option<i64> => Int,
        highlight_max_analyzed_offset: Option<i64> => Int,
        max_terms_count: Option<i64> => Int,
        max_regex_length: Option<i64> => Int,
        query_default_field: Option<BTreeSet<String>> => UnorderedSet,
        routing_allocation_enable: Option<String> => String,
        routing_rebalance_enable: Option<String> => String,
        gc_deletes: Option<String> => String,
        default_pipeline: Option<String> => String,
        final_pipeline: Option<String> => String,
        unassigned_node_left_delayed_timeout: Option<String> => String,
        search_slowlog_threshold_query_warn: Option<String> => String,
        search_slowlog_threshold_query_info: Option<String> => String,
        search_slowlog_threshold_query_debug: Option<String> => String,
        search_slowlog_threshold_query_trace: Option<String> => String,
        search_slowlog_threshold_fetch_warn: Option<String> => String,
        search_slowlog_threshold_fetch_info: Option<String> => String,
        search_slowlog_threshold_fetch_debug: Option<String> => String,
        search_slowlog_threshold_fetch_trace: Option<String> => String,
        search_slowlog_level: Option<String> => String,
        indexing_slowlog_threshold_index_warn: Option<String> => String,
        indexing_slowlog_threshold_index_info: Option<String> => String,
        indexing_slowlog_threshold_index_debug: Option<String> => String,
        indexing_slowlog_threshold_index_trace: Option<String> => String,
        indexing_slowlog_level: Option<String> => String,
        indexing_slowlog_source: Option<String> => String,
    }
    raw: settings_raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reconcile::record::SettingsRecord;
    use crate::domain::SettingKind;

    #[test]
    fn test_declared_kinds() {
        let kind = |field| IndexSettings::descriptor(field).map(|d| d.kind);
        assert_eq!(kind("number_of_shards"), Some(SettingKind::Int));
        assert_eq!(kind("blocks_write"), Some(SettingKind::Bool));
        assert_eq!(kind("sort_field"), Some(SettingKind::OrderedList));
        assert_eq!(kind("query_default_field"), Some(SettingKind::UnorderedSet));
        assert_eq!(kind("refresh_interval"), Some(SettingKind::String));
        assert_eq!(kind("settings_raw"), None);
    }

    #[test]
    fn test_default_is_empty() {
        let settings = IndexSettings::default();
        assert_eq!(settings.raw(), None);
        assert_eq!(serde_json::to_string(&settings).unwrap(), "{}");
    }
}
