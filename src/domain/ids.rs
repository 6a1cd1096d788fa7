//! Domain identifier types with validation
//!
//! This module provides the newtype wrapper for Elasticsearch index names.
//! Index names are validated against the naming rules the cluster enforces,
//! so a typo on the command line fails before any request is sent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Characters Elasticsearch rejects anywhere in an index name
const FORBIDDEN_CHARS: [char; 12] = ['\\', '/', '*', '?', '"', '<', '>', '|', ' ', ',', '#', ':'];

/// Maximum index name length in bytes
const MAX_INDEX_NAME_BYTES: usize = 255;

/// Index name newtype wrapper
///
/// Represents the concrete name of a single Elasticsearch index. Wildcard
/// patterns are not index names; they are passed around as plain targets.
///
/// # Examples
///
/// ```
/// use esindex::domain::ids::IndexName;
/// use std::str::FromStr;
///
/// let index = IndexName::from_str("logs-2024.06").unwrap();
/// assert_eq!(index.as_str(), "logs-2024.06");
/// assert!(IndexName::from_str("Logs").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IndexName(String);

impl IndexName {
    /// Creates a new IndexName from a string
    ///
    /// # Arguments
    ///
    /// * `name` - The index name
    ///
    /// # Returns
    ///
    /// Returns `Ok(IndexName)` if the name is valid, `Err` otherwise
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Index name cannot be empty".to_string());
        }

        if name.len() > MAX_INDEX_NAME_BYTES {
            return Err(format!(
                "Index name must be at most {MAX_INDEX_NAME_BYTES} bytes, got {}",
                name.len()
            ));
        }

        if name == "." || name == ".." {
            return Err(format!("Index name cannot be '{name}'"));
        }

        if name.starts_with(['-', '_', '+']) {
            return Err(format!(
                "Index name cannot start with '-', '_' or '+', got: {name}"
            ));
        }

        if let Some(c) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
            return Err(format!("Index name contains forbidden character '{c}': {name}"));
        }

        if name.chars().any(char::is_uppercase) {
            return Err(format!("Index name must be lowercase, got: {name}"));
        }

        Ok(Self(name))
    }

    /// Returns the index name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is a hidden/system index (leading dot)
    pub fn is_dot_prefixed(&self) -> bool {
        self.0.starts_with('.')
    }
}

impl fmt::Display for IndexName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IndexName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for IndexName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IndexName> for String {
    fn from(name: IndexName) -> Self {
        name.0
    }
}

impl AsRef<str> for IndexName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
