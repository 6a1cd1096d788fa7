//! Raw payload preservation
//!
//! The complete settings map is kept alongside the typed fields as normalized
//! JSON, so keys the registry does not know about (newer cluster versions,
//! plugin settings, unprefixed keys) survive a read untouched.

use crate::domain::SettingsMap;

/// Serialize the complete settings map to normalized JSON
///
/// Normalized means compact output with keys in sorted order, which the
/// `BTreeMap` behind [`SettingsMap`] guarantees; equal maps always produce
/// byte-identical strings.
///
/// # Examples
///
/// ```
/// use esindex::core::reconcile::raw::preserve_raw;
/// use esindex::domain::{SettingValue, SettingsMap};
///
/// let mut settings = SettingsMap::new();
/// settings.insert("index.refresh_interval".to_string(), SettingValue::from("1s"));
/// settings.insert("index.codec".to_string(), SettingValue::from("default"));
///
/// let raw = preserve_raw(&settings).unwrap();
/// assert_eq!(raw, r#"{"index.codec":"default","index.refresh_interval":"1s"}"#);
/// ```
pub fn preserve_raw(settings: &SettingsMap) -> Result<String, serde_json::Error> {
    serde_json::to_string(settings)
}
