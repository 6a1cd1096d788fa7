//! Integration tests for logging functionality
//!
//! A process can install only one global subscriber, so a single test here
//! initializes logging.

use esindex::config::LoggingConfig;
use esindex::logging::{init_logging, parse_log_level};
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, "/var/log/esindex");
    assert_eq!(config.local_rotation, "daily");
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_log_level_rejects_unknown() {
    assert!(parse_log_level("verbose").is_err());
    assert!(parse_log_level("WARN").is_ok());
}

#[test]
fn test_file_logging_writes_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).unwrap();
    assert!(guard.has_file_output());
    assert!(log_path.is_dir());

    tracing::info!(target: "esindex::indices", index = "logs-000001", "Reconciled index settings");

    // Dropping the guard flushes the non-blocking writer
    drop(guard);

    let entries: Vec<_> = std::fs::read_dir(&log_path)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);

    let contents = std::fs::read_to_string(&entries[0]).unwrap();
    let line = contents
        .lines()
        .find(|l| l.contains("logs-000001"))
        .expect("log line written");
    let value: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(value["level"], "INFO");
    assert_eq!(value["fields"]["index"], "logs-000001");
}
