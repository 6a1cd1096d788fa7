//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EsIndexConfig;
use super::secret::secret_string;
use crate::domain::errors::EsIndexError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "ESINDEX";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into EsIndexConfig
/// 4. Applies environment variable overrides (ESINDEX_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use esindex::config::loader::load_config;
///
/// let config = load_config("esindex.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<EsIndexConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EsIndexError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EsIndexError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text
///
/// Applies the same substitution, overrides and validation as [`load_config`].
///
/// # Errors
///
/// Returns a `Configuration` error for any parse, substitution or validation failure.
pub fn parse_config(contents: &str) -> Result<EsIndexConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: EsIndexConfig = toml::from_str(&contents)
        .map_err(|e| EsIndexError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    config.elasticsearch.drop_empty_credentials();

    config.validate().map_err(|e| {
        EsIndexError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error naming every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EsIndexError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Reads `ESINDEX_<name>` if set
fn env_override(name: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Reads and parses `ESINDEX_<name>` if set
fn parsed_override<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_override(name)
        .map(|val| {
            val.parse::<T>().map_err(|e| {
                EsIndexError::Configuration(format!(
                    "Invalid value '{val}' for {ENV_PREFIX}_{name}: {e}"
                ))
            })
        })
        .transpose()
}

/// Applies environment variable overrides using ESINDEX_* prefix
///
/// Environment variables follow the pattern: ESINDEX_<SECTION>_<KEY>
/// For example: ESINDEX_ELASTICSEARCH_ENDPOINT, ESINDEX_INDICES_TARGET
///
/// # Errors
///
/// Returns an error if an override cannot be parsed into its field's type
fn apply_env_overrides(config: &mut EsIndexConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env_override("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Elasticsearch overrides
    let es = &mut config.elasticsearch;
    if let Some(val) = env_override("ELASTICSEARCH_ENDPOINT") {
        es.endpoint = val;
    }
    if let Some(val) = env_override("ELASTICSEARCH_USERNAME") {
        es.username = Some(val);
    }
    if let Some(val) = env_override("ELASTICSEARCH_PASSWORD") {
        es.password = Some(secret_string(val));
    }
    if let Some(val) = env_override("ELASTICSEARCH_API_KEY") {
        es.api_key = Some(secret_string(val));
    }
    if let Some(val) = parsed_override("ELASTICSEARCH_TLS_VERIFY")? {
        es.tls_verify = val;
    }
    if let Some(val) = parsed_override("ELASTICSEARCH_TIMEOUT_SECONDS")? {
        es.timeout_seconds = val;
    }
    if let Some(val) = parsed_override("ELASTICSEARCH_RETRY_MAX_RETRIES")? {
        es.retry.max_retries = val;
    }

    // Indices overrides
    if let Some(val) = env_override("INDICES_TARGET") {
        config.indices.target = val;
    }
    if let Some(val) = parsed_override("INDICES_INCLUDE_HIDDEN")? {
        config.indices.include_hidden = val;
    }
    if let Some(val) = parsed_override("INDICES_ON_ERROR")? {
        config.indices.on_error = val;
    }

    // Logging overrides
    if let Some(val) = parsed_override("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env_override("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::OnError;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests that mutate or depend on the process environment
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    const MINIMAL: &str = r#"
[elasticsearch]
endpoint = "http://localhost:9200"
"#;

    #[test]
    fn test_substitute_env_vars() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ESINDEX_TEST_SUB_VAR", "test_value");
        let input = "password = \"${ESINDEX_TEST_SUB_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("ESINDEX_TEST_SUB_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing_lists_all() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("ESINDEX_TEST_MISSING_A");
        std::env::remove_var("ESINDEX_TEST_MISSING_B");
        let input = "a = \"${ESINDEX_TEST_MISSING_A}\"\nb = \"${ESINDEX_TEST_MISSING_B}\"";
        let err = substitute_env_vars(input).unwrap_err().to_string();
        assert!(err.contains("ESINDEX_TEST_MISSING_A"));
        assert!(err.contains("ESINDEX_TEST_MISSING_B"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::remove_var("ESINDEX_TEST_COMMENTED");
        let input = "  # password = \"${ESINDEX_TEST_COMMENTED}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${ESINDEX_TEST_COMMENTED}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("nonexistent.toml").unwrap_err();
        assert!(matches!(err, EsIndexError::Configuration(_)));
    }

    #[test]
    fn test_load_config_valid() {
        let _guard = ENV_LOCK.lock().unwrap();
        let toml_content = r#"
[application]
log_level = "debug"

[elasticsearch]
endpoint = "https://es.example.com:9200"
api_key = "a2V5OnNlY3JldA=="

[indices]
target = "logs-*"
include_hidden = true
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.elasticsearch.endpoint, "https://es.example.com:9200");
        assert_eq!(
            config.elasticsearch.api_key.as_ref().unwrap().expose_secret(),
            "a2V5OnNlY3JldA=="
        );
        assert_eq!(config.indices.target, "logs-*");
        assert!(config.indices.include_hidden);
    }

    #[test]
    fn test_env_overrides_applied() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ESINDEX_INDICES_TARGET", "metrics-*");
        std::env::set_var("ESINDEX_INDICES_ON_ERROR", "skip");
        std::env::set_var("ESINDEX_ELASTICSEARCH_PASSWORD", "s3cret");
        std::env::set_var("ESINDEX_ELASTICSEARCH_USERNAME", "elastic");

        let config = parse_config(MINIMAL);

        std::env::remove_var("ESINDEX_INDICES_TARGET");
        std::env::remove_var("ESINDEX_INDICES_ON_ERROR");
        std::env::remove_var("ESINDEX_ELASTICSEARCH_PASSWORD");
        std::env::remove_var("ESINDEX_ELASTICSEARCH_USERNAME");

        let config = config.unwrap();
        assert_eq!(config.indices.target, "metrics-*");
        assert_eq!(config.indices.on_error, OnError::Skip);
        assert_eq!(config.elasticsearch.auth_scheme(), "basic");
    }

    #[test]
    fn test_empty_api_key_does_not_replace_basic_auth() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ESINDEX_TEST_EMPTY_API_KEY", "");

        let config = parse_config(
            r#"
[elasticsearch]
endpoint = "http://localhost:9200"
username = "elastic"
password = "changeme"
api_key = "${ESINDEX_TEST_EMPTY_API_KEY}"
"#,
        );
        std::env::remove_var("ESINDEX_TEST_EMPTY_API_KEY");

        let config = config.unwrap();
        assert!(config.elasticsearch.api_key.is_none());
        assert_eq!(config.elasticsearch.auth_scheme(), "basic");
    }

    #[test]
    fn test_invalid_env_override_is_configuration_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        std::env::set_var("ESINDEX_ELASTICSEARCH_TIMEOUT_SECONDS", "soon");
        let result = parse_config(MINIMAL);
        std::env::remove_var("ESINDEX_ELASTICSEARCH_TIMEOUT_SECONDS");

        let err = result.unwrap_err().to_string();
        assert!(err.contains("ESINDEX_ELASTICSEARCH_TIMEOUT_SECONDS"));
    }

    #[test]
    fn test_validation_failure_is_reported() {
        let _guard = ENV_LOCK.lock().unwrap();
        let err = parse_config("[elasticsearch]\nendpoint = \"ftp://es\"\n").unwrap_err();
        assert!(err.to_string().contains("Configuration validation failed"));
    }
}
