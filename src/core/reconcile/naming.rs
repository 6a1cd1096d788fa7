//! Key name transform
//!
//! Registry keys are stored without the `index.` prefix the REST payload
//! carries (`search.slowlog.level`), and map onto record field identifiers by
//! replacing every `.` with `_` (`search_slowlog_level`).

/// Prefix every index-level setting carries in the REST payload
pub const INDEX_PREFIX: &str = "index.";

/// Convert a dotted setting key to a record field identifier
///
/// Pure and total: any dotted string yields an identifier string.
///
/// # Examples
///
/// ```
/// use esindex::core::reconcile::naming::field_identifier;
///
/// assert_eq!(
///     field_identifier("search.slowlog.threshold.query.warn"),
///     "search_slowlog_threshold_query_warn"
/// );
/// ```
pub fn field_identifier(key: &str) -> String {
    key.replace('.', "_")
}

/// The REST payload key for a registry key
pub fn payload_key(key: &str) -> String {
    format!("{INDEX_PREFIX}{key}")
}

/// The registry form of a REST payload key, if it carries the `index.` prefix
///
/// Keys without the prefix are never reconciled.
pub fn registry_key(payload_key: &str) -> Option<&str> {
    payload_key.strip_prefix(INDEX_PREFIX)
}
