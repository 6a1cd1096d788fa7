//! Domain error types
//!
//! This module defines the error hierarchy for esindex. The reconciliation
//! engine has its own taxonomy ([`StructuralError`], [`CoercionError`],
//! [`ReconcileError`]) that the crate-wide [`EsIndexError`] wraps.
//! No error type exposes third-party HTTP client types.

use super::value::{SettingKind, SettingValue};
use thiserror::Error;

/// Main esindex error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum EsIndexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Elasticsearch-related errors
    #[error("Elasticsearch error: {0}")]
    Elasticsearch(#[from] ElasticsearchError),

    /// Settings reconciliation errors
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] ReconcileError),

    /// Setting key registry does not match the settings record
    #[error("Registry error: {0}")]
    Registry(#[from] StructuralError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Elasticsearch-specific errors
///
/// Errors that occur when talking to the cluster's REST API.
#[derive(Debug, Error)]
pub enum ElasticsearchError {
    /// Failed to connect to the cluster
    #[error("Failed to connect to Elasticsearch: {0}")]
    ConnectionFailed(String),

    /// Authentication or authorization failed (401/403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Target index does not exist (404)
    #[error("Index not found: {0}")]
    IndexNotFound(String),

    /// Response body could not be decoded
    #[error("Invalid response from cluster: {0}")]
    InvalidResponse(String),

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Timeout
    #[error("Request timeout: {0}")]
    Timeout(String),
}

impl ElasticsearchError {
    /// Whether retrying the same request could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::ServerError { .. } | Self::Timeout(_)
        )
    }
}

/// Registry/record drift
///
/// These indicate a defect in the static configuration of the engine, not bad
/// input data. They are fatal to the reconciliation that hits them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A registry key has no matching field on the settings record
    #[error("setting '{key}' has no field '{field}' on the settings record")]
    MissingField { key: String, field: String },

    /// A settings record field is not reached by any registry key
    #[error("settings record field '{field}' has no registry key")]
    UnregisteredField { field: String },

    /// A key is registered more than once
    #[error("setting '{key}' is registered more than once")]
    DuplicateKey { key: String },

    /// A coerced value was written into a slot of a different kind
    #[error("field '{field}' is declared {declared} but was offered a {offered} value")]
    SlotMismatch {
        field: String,
        declared: SettingKind,
        offered: SettingKind,
    },
}

/// A value's runtime shape does not fit its field's declared type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    /// The value has the wrong shape for the field
    #[error("field '{field}': expected {expected}, got {} {actual}", .actual.shape())]
    TypeMismatch {
        field: String,
        expected: SettingKind,
        actual: SettingValue,
    },

    /// The value is a string that does not parse as a base-10 integer
    #[error("field '{field}': expected int, could not parse {value:?} as a base-10 integer")]
    IntegerParse { field: String, value: String },

    /// A list element is not a string
    #[error(
        "field '{field}': expected {expected}, element {position} is {} {actual}",
        .actual.shape()
    )]
    ElementMismatch {
        field: String,
        expected: SettingKind,
        position: usize,
        actual: SettingValue,
    },
}

impl CoercionError {
    /// The field identifier the failure belongs to
    pub fn field(&self) -> &str {
        match self {
            Self::TypeMismatch { field, .. }
            | Self::IntegerParse { field, .. }
            | Self::ElementMismatch { field, .. } => field,
        }
    }
}

/// A reconciliation of one index's settings failed
///
/// Every variant names the index so an operator can map the failure back to
/// a specific cluster setting without reproducing it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReconcileError {
    /// Registry/record drift
    #[error("index {index}: {source}")]
    Structural {
        index: String,
        #[source]
        source: StructuralError,
    },

    /// A value did not coerce into its field's type
    #[error("index {index}: {source}")]
    Coercion {
        index: String,
        #[source]
        source: CoercionError,
    },

    /// The raw settings payload could not be serialized
    #[error("index {index}: failed to serialize raw settings: {message}")]
    Serialization { index: String, message: String },
}

impl ReconcileError {
    /// The index the failure belongs to
    pub fn index(&self) -> &str {
        match self {
            Self::Structural { index, .. }
            | Self::Coercion { index, .. }
            | Self::Serialization { index, .. } => index,
        }
    }

    /// The field identifier involved, if the failure is tied to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Coercion { source, .. } => Some(source.field()),
            Self::Structural { source, .. } => match source {
                StructuralError::MissingField { field, .. }
                | StructuralError::UnregisteredField { field }
                | StructuralError::SlotMismatch { field, .. } => Some(field),
                StructuralError::DuplicateKey { .. } => None,
            },
            Self::Serialization { .. } => None,
        }
    }

    /// Whether this is registry/record drift rather than bad cluster data
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for EsIndexError {
    fn from(err: std::io::Error) -> Self {
        EsIndexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for EsIndexError {
    fn from(err: serde_json::Error) -> Self {
        EsIndexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for EsIndexError {
    fn from(err: toml::de::Error) -> Self {
        EsIndexError::Configuration(format!("TOML parse error: {err}"))
    }
}
