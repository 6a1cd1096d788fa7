//! Settings reconciliation engine
//!
//! Turns the untyped settings map the cluster reports for one index into a
//! statically typed [`SettingsRecord`]. The engine is pure and synchronous:
//! no I/O, no shared mutable state, no retries. Reconciling many indices is a
//! matter of calling [`reconcile`] once per index.
//!
//! # Modules
//!
//! - [`naming`] - Registry key to field identifier transform
//! - [`record`] - Settings records, field descriptors and the field locator
//! - [`coerce`] - Type-directed coercion of untyped values
//! - [`raw`] - Raw payload preservation
//! - [`index_settings`] - The typed index settings record
//!
//! # Example
//!
//! ```rust
//! use esindex::core::reconcile::reconcile_index_settings;
//! use esindex::domain::{IndexName, SettingsMap};
//! use serde_json::json;
//!
//! let index = IndexName::new("logs-2025").unwrap();
//! let settings: SettingsMap = serde_json::from_value(json!({
//!     "index.number_of_shards": "3",
//!     "index.sort.field": ["timestamp", "host"],
//! }))
//! .unwrap();
//!
//! let record = reconcile_index_settings(&index, &settings).unwrap();
//! assert_eq!(record.number_of_shards, Some(3));
//! assert_eq!(
//!     record.sort_field,
//!     Some(vec!["timestamp".to_string(), "host".to_string()])
//! );
//! ```

pub mod coerce;
pub mod index_settings;
pub mod naming;
pub mod raw;
pub mod record;

pub use index_settings::IndexSettings;
pub use record::SettingsRecord;

use crate::core::registry::{SettingKeyRegistry, INDEX_SETTING_KEYS};
use crate::domain::{IndexName, ReconcileError, SettingsMap};

/// Reconcile one index's settings map into a record of type `R`
///
/// Walks `registry` in order. A key the map does not report is skipped and
/// its field stays unset. Keys in the map that lack the `index.` prefix are
/// never matched. The first failure aborts the whole call and no record is
/// returned. On success the complete map is stored on the record as
/// normalized JSON.
///
/// # Errors
///
/// - [`ReconcileError::Structural`] if a registry key has no field on `R`,
///   or a coerced value does not fit its slot
/// - [`ReconcileError::Coercion`] if a value does not fit its field's type
/// - [`ReconcileError::Serialization`] if the raw payload cannot be serialized
pub fn reconcile<R: SettingsRecord>(
    index: &IndexName,
    settings: &SettingsMap,
    registry: &SettingKeyRegistry,
) -> Result<R, ReconcileError> {
    let mut record = R::default();
    let mut populated = 0usize;

    for key in registry.all_keys() {
        let Some(value) = settings.get(&naming::payload_key(key)) else {
            tracing::trace!(index = %index, key = key, "Setting not reported, skipping");
            continue;
        };

        let field = naming::field_identifier(key);
        let slot = record::locate(&mut record, key, &field).map_err(|source| {
            ReconcileError::Structural {
                index: index.to_string(),
                source,
            }
        })?;

        let typed = coerce::coerce(&field, value, slot.kind()).map_err(|source| {
            ReconcileError::Coercion {
                index: index.to_string(),
                source,
            }
        })?;

        slot.write(&field, typed)
            .map_err(|source| ReconcileError::Structural {
                index: index.to_string(),
                source,
            })?;
        populated += 1;
    }

    let raw = raw::preserve_raw(settings).map_err(|e| ReconcileError::Serialization {
        index: index.to_string(),
        message: e.to_string(),
    })?;
    record.set_raw(raw);

    tracing::debug!(
        index = %index,
        reported = settings.len(),
        populated = populated,
        raw_only = unregistered_keys(settings, registry).count(),
        "Reconciled index settings"
    );

    Ok(record)
}

/// Keys in `settings` that no registry entry reconciles
///
/// These reach the record only through the raw payload: keys without the
/// `index.` prefix, and prefixed keys the registry does not list.
pub fn unregistered_keys<'a>(
    settings: &'a SettingsMap,
    registry: &'a SettingKeyRegistry,
) -> impl Iterator<Item = &'a str> + 'a {
    settings
        .keys()
        .map(String::as_str)
        .filter(|key| naming::registry_key(key).map_or(true, |k| registry.category(k).is_none()))
}

/// Reconcile one index's settings map into [`IndexSettings`]
///
/// # Errors
///
/// See [`reconcile`].
pub fn reconcile_index_settings(
    index: &IndexName,
    settings: &SettingsMap,
) -> Result<IndexSettings, ReconcileError> {
    reconcile(index, settings, &INDEX_SETTING_KEYS)
}
