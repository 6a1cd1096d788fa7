//! Integration tests for the reconciliation engine through the public API

use esindex::core::reconcile::naming::{field_identifier, payload_key, registry_key};
use esindex::core::reconcile::{
    reconcile_index_settings, unregistered_keys, IndexSettings, SettingsRecord,
};
use esindex::core::registry::{SettingCategory, INDEX_SETTING_KEYS};
use esindex::domain::{
    CoercionError, IndexName, ReconcileError, SettingKind, SettingValue, SettingsMap,
};
use serde_json::json;
use std::collections::{BTreeMap, BTreeSet};

fn index() -> IndexName {
    IndexName::new("logs-000001").unwrap()
}

fn settings(value: serde_json::Value) -> SettingsMap {
    serde_json::from_value(value).unwrap()
}

/// A settings map as a 8.x cluster reports it with flat_settings=true
fn cluster_settings() -> SettingsMap {
    settings(json!({
        "index.number_of_shards": "3",
        "index.number_of_replicas": "1",
        "index.codec": "best_compression",
        "index.refresh_interval": "30s",
        "index.max_result_window": "15000",
        "index.sort.field": ["timestamp", "host"],
        "index.sort.order": ["desc", "asc"],
        "index.query.default_field": ["message", "host", "message"],
        "index.blocks.write": true,
        "index.routing.allocation.enable": "all",
        "index.search.slowlog.threshold.query.warn": "10s",
        "index.uuid": "aBcD1234",
        "index.creation_date": "1700000000000",
        "index.provided_name": "logs-000001",
        "index.version.created": "8110099"
    }))
}

#[test]
fn test_registry_record_parity() {
    let keys: BTreeSet<String> = INDEX_SETTING_KEYS.all_keys().map(field_identifier).collect();
    let fields: BTreeSet<String> = IndexSettings::FIELDS
        .iter()
        .map(|f| f.name.to_string())
        .collect();

    assert_eq!(keys.len(), INDEX_SETTING_KEYS.len());
    assert_eq!(fields.len(), IndexSettings::FIELDS.len());
    assert_eq!(keys, fields);
    assert!(INDEX_SETTING_KEYS.verify::<IndexSettings>().is_ok());
}

#[test]
fn test_registry_categories() {
    assert_eq!(
        INDEX_SETTING_KEYS.category("number_of_shards"),
        Some(SettingCategory::Static)
    );
    assert_eq!(
        INDEX_SETTING_KEYS.category("number_of_replicas"),
        Some(SettingCategory::Dynamic)
    );
    assert_eq!(INDEX_SETTING_KEYS.category("uuid"), None);
    assert_eq!(
        INDEX_SETTING_KEYS.static_keys().len() + INDEX_SETTING_KEYS.dynamic_keys().len(),
        INDEX_SETTING_KEYS.len()
    );
}

#[test]
fn test_reconcile_cluster_settings() {
    let record = reconcile_index_settings(&index(), &cluster_settings()).unwrap();

    assert_eq!(record.number_of_shards, Some(3));
    assert_eq!(record.number_of_replicas, Some(1));
    assert_eq!(record.codec.as_deref(), Some("best_compression"));
    assert_eq!(record.max_result_window, Some(15000));
    assert_eq!(
        record.sort_field,
        Some(vec!["timestamp".to_string(), "host".to_string()])
    );
    assert_eq!(
        record.query_default_field,
        Some(BTreeSet::from(["host".to_string(), "message".to_string()]))
    );
    assert_eq!(record.blocks_write, Some(true));
    assert_eq!(
        record.search_slowlog_threshold_query_warn.as_deref(),
        Some("10s")
    );
    assert_eq!(record.blocks_read, None);
    assert_eq!(record.default_pipeline, None);
}

#[test]
fn test_idempotence() {
    let input = cluster_settings();
    let first = reconcile_index_settings(&index(), &input).unwrap();
    let second = reconcile_index_settings(&index(), &input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.raw(), second.raw());
}

/// Populated record fields as JSON, without the raw payload
fn typed_fields(record: &IndexSettings) -> serde_json::Map<String, serde_json::Value> {
    let serde_json::Value::Object(mut fields) = serde_json::to_value(record).unwrap() else {
        panic!("record did not serialize to an object");
    };
    fields.remove("settings_raw");
    fields
}

#[test]
fn test_absence_is_safe_for_every_key() {
    let input = cluster_settings();
    let complete = typed_fields(&reconcile_index_settings(&index(), &input).unwrap());

    for key in input.keys() {
        let mut reduced = input.clone();
        reduced.remove(key);

        let record = reconcile_index_settings(&index(), &reduced)
            .unwrap_or_else(|e| panic!("removing {key} broke reconciliation: {e}"));

        let mut expected = complete.clone();
        if let Some(registered) = registry_key(key) {
            if INDEX_SETTING_KEYS.category(registered).is_some() {
                expected.remove(&field_identifier(registered));
            }
        }
        assert_eq!(typed_fields(&record), expected, "after removing {key}");
    }
}

#[test]
fn test_raw_payload_round_trip() {
    let input = cluster_settings();
    let record = reconcile_index_settings(&index(), &input).unwrap();

    let raw = record.raw().unwrap();
    let decoded: SettingsMap = serde_json::from_str(raw).unwrap();
    assert_eq!(decoded, input);
}

#[test]
fn test_raw_payload_keeps_other_shapes() {
    let input = settings(json!({
        "index.number_of_shards": "1",
        "index.some.ratio": 0.75,
        "index.some.object": {"nested": [1, 2]},
        "index.some.null": null
    }));
    let record = reconcile_index_settings(&index(), &input).unwrap();

    let decoded: serde_json::Value = serde_json::from_str(record.raw().unwrap()).unwrap();
    assert_eq!(decoded["index.some.ratio"], json!(0.75));
    assert_eq!(decoded["index.some.object"], json!({"nested": [1, 2]}));
    assert!(decoded["index.some.null"].is_null());
}

#[test]
fn test_bool_for_int_field_fails_fast() {
    let mut input = cluster_settings();
    input.insert(
        "index.number_of_replicas".to_string(),
        SettingValue::Bool(true),
    );

    let err = reconcile_index_settings(&index(), &input).unwrap_err();
    assert_eq!(err.index(), "logs-000001");
    assert_eq!(err.field(), Some("number_of_replicas"));
    match err {
        ReconcileError::Coercion {
            source:
                CoercionError::TypeMismatch {
                    expected, actual, ..
                },
            ..
        } => {
            assert_eq!(expected, SettingKind::Int);
            assert_eq!(actual, SettingValue::Bool(true));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_unparseable_integer_names_field_and_value() {
    let input = settings(json!({"index.max_result_window": "lots"}));
    let err = reconcile_index_settings(&index(), &input).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("logs-000001"));
    assert!(message.contains("max_result_window"));
    assert!(message.contains("lots"));
}

#[test]
fn test_non_string_list_element_rejected() {
    let input = settings(json!({"index.sort.field": ["timestamp", 7]}));
    let err = reconcile_index_settings(&index(), &input).unwrap_err();
    assert!(matches!(
        err,
        ReconcileError::Coercion {
            source: CoercionError::ElementMismatch { position: 1, .. },
            ..
        }
    ));
}

#[test]
fn test_numeric_as_string() {
    let input = settings(json!({"index.max_result_window": "15000"}));
    let record = reconcile_index_settings(&index(), &input).unwrap();
    assert_eq!(record.max_result_window, Some(15000));
}

#[test]
fn test_native_integer_accepted() {
    let input = settings(json!({"index.max_result_window": 15000}));
    let record = reconcile_index_settings(&index(), &input).unwrap();
    assert_eq!(record.max_result_window, Some(15000));
}

#[test]
fn test_ordered_list_preserves_order() {
    let input = settings(json!({"index.sort.field": ["timestamp", "host"]}));
    let record = reconcile_index_settings(&index(), &input).unwrap();
    assert_eq!(
        record.sort_field,
        Some(vec!["timestamp".to_string(), "host".to_string()])
    );
}

#[test]
fn test_unknown_key_only_in_raw_payload() {
    let input = settings(json!({"index.some.future.setting": "x"}));
    let record = reconcile_index_settings(&index(), &input).unwrap();
    assert_eq!(
        unregistered_keys(&input, &INDEX_SETTING_KEYS).collect::<Vec<_>>(),
        ["index.some.future.setting"]
    );

    assert_eq!(
        IndexSettings {
            settings_raw: None,
            ..record.clone()
        },
        IndexSettings::default()
    );
    let raw: BTreeMap<String, String> = serde_json::from_str(record.raw().unwrap()).unwrap();
    assert_eq!(
        raw.get("index.some.future.setting").map(String::as_str),
        Some("x")
    );
}

#[test]
fn test_missing_prefix_is_not_reconciled() {
    let input = settings(json!({"max_result_window": "15000"}));
    let record = reconcile_index_settings(&index(), &input).unwrap();

    assert_eq!(record.max_result_window, None);
    assert!(record.raw().unwrap().contains("max_result_window"));
    assert_eq!(payload_key("max_result_window"), "index.max_result_window");
    assert_eq!(registry_key("max_result_window"), None);
}

#[test]
fn test_empty_settings() {
    let record = reconcile_index_settings(&index(), &SettingsMap::new()).unwrap();
    assert_eq!(record.raw(), Some("{}"));
    assert_eq!(record.number_of_shards, None);
}
