//! Configuration schema types
//!
//! This module defines the configuration structure for esindex.

use crate::config::{discard_empty, SecretString};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// What a multi-index read does when one index fails to reconcile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Abort the whole read on the first failing index
    #[default]
    Abort,
    /// Log the failure, record it and continue with the remaining indices
    Skip,
}

impl std::str::FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "Invalid on_error '{other}'. Must be one of: abort, skip"
            )),
        }
    }
}

impl std::fmt::Display for OnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Main esindex configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EsIndexConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Elasticsearch cluster connection
    pub elasticsearch: ElasticsearchConfig,

    /// Which indices to read and how to treat failures
    #[serde(default)]
    pub indices: IndicesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EsIndexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.elasticsearch.validate()?;
        self.indices.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    /// Validates this section
    pub fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// Validates this section
    pub fn validate(&self) -> Result<(), String> {
        if self.max_retries > 10 {
            return Err("elasticsearch.retry.max_retries must be <= 10".to_string());
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err(
                "elasticsearch.retry.initial_delay_ms must be <= max_delay_ms".to_string(),
            );
        }
        if self.backoff_multiplier < 1.0 {
            return Err("elasticsearch.retry.backoff_multiplier must be >= 1.0".to_string());
        }
        Ok(())
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

/// Elasticsearch cluster configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticsearchConfig {
    /// Base URL of the cluster, e.g. `https://localhost:9200`
    pub endpoint: String,

    /// Username for basic authentication (optional)
    #[serde(default)]
    pub username: Option<String>,

    /// Password for basic authentication (optional)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Encoded API key, sent as `Authorization: ApiKey <key>` (optional)
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// TLS certificate verification enabled
    ///
    /// Only disable this against a local development cluster with a
    /// self-signed certificate.
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Retry configuration
    #[serde(default)]
    pub retry: RetryConfig,
}

impl ElasticsearchConfig {
    /// Validates this section
    pub fn validate(&self) -> Result<(), String> {
        if self.endpoint.is_empty() {
            return Err("elasticsearch.endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("elasticsearch.endpoint must start with http:// or https://".to_string());
        }

        let has_username = self.username.as_ref().is_some_and(|s| !s.is_empty());
        let has_password = self
            .password
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty());
        if has_username != has_password {
            return Err(
                "elasticsearch.username and elasticsearch.password must be set together"
                    .to_string(),
            );
        }

        if self.api_key().is_some() && self.basic_credentials().is_some() {
            return Err(
                "elasticsearch.api_key cannot be combined with username/password".to_string(),
            );
        }

        if self.timeout_seconds == 0 {
            return Err("elasticsearch.timeout_seconds must be > 0".to_string());
        }

        self.retry.validate()?;
        Ok(())
    }

    /// Treat empty credentials as unset
    ///
    /// An empty variable substituted into `api_key` or `password` leaves the
    /// field present with no content.
    pub fn drop_empty_credentials(&mut self) {
        self.username = self.username.take().filter(|u| !u.is_empty());
        self.password = discard_empty(self.password.take());
        self.api_key = discard_empty(self.api_key.take());
    }

    /// The API key, if one with content is configured
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key
            .as_ref()
            .filter(|key| !key.expose_secret().is_empty())
    }

    /// Username and password, if both have content
    pub fn basic_credentials(&self) -> Option<(&str, &SecretString)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password))
                if !username.is_empty() && !password.expose_secret().is_empty() =>
            {
                Some((username.as_str(), password))
            }
            _ => None,
        }
    }

    /// Which authentication scheme the configuration selects
    pub fn auth_scheme(&self) -> &'static str {
        if self.api_key().is_some() {
            "api_key"
        } else if self.basic_credentials().is_some() {
            "basic"
        } else {
            "none"
        }
    }
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9200".to_string(),
            username: None,
            password: None,
            api_key: None,
            tls_verify: true,
            timeout_seconds: default_timeout_seconds(),
            retry: RetryConfig::default(),
        }
    }
}

/// Index selection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicesConfig {
    /// Index name, comma-separated list or wildcard pattern
    #[serde(default = "default_target")]
    pub target: String,

    /// Include hidden and dot-prefixed indices in wildcard matches
    #[serde(default)]
    pub include_hidden: bool,

    /// Failure policy for multi-index reads
    #[serde(default)]
    pub on_error: OnError,
}

impl IndicesConfig {
    /// Validates this section
    pub fn validate(&self) -> Result<(), String> {
        if self.target.trim().is_empty() {
            return Err("indices.target cannot be empty".to_string());
        }
        if self.target.split(',').any(|part| part.trim().is_empty()) {
            return Err(format!(
                "indices.target '{}' contains an empty entry",
                self.target
            ));
        }
        Ok(())
    }
}

impl Default for IndicesConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            include_hidden: false,
            on_error: OnError::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    /// Validates this section
    pub fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_target() -> String {
    "*".to_string()
}

fn default_local_path() -> String {
    "/var/log/esindex".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
