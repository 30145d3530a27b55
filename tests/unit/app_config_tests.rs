/*!
 * Tests for application configuration functionality
 */

use notesum::app_config::{CacheBackend, Config, LogLevel};

use crate::common;

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert!(config.cache.enabled);
    assert_eq!(config.cache.backend, CacheBackend::Sqlite);
    assert!(config.cache.database_path.is_none());
    assert!(config.summary.clean_output);
    assert_eq!(config.summary.file_extensions, vec!["txt".to_string(), "md".to_string()]);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test that a saved configuration loads back identically
#[test]
fn test_config_saveThenLoad_shouldRoundTrip() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("settings").join("conf.json");

    let mut config = Config::default();
    config.cache.backend = CacheBackend::Memory;
    config.summary.clean_output = false;
    config.summary.file_extensions = vec!["note".to_string()];
    config.log_level = LogLevel::Debug;
    config.save(&path).unwrap();

    assert_eq!(Config::load(&path).unwrap(), config);
}

/// Test the JSON layout written to disk
#[test]
fn test_config_serialize_shouldUseLowercaseEnums() {
    let json = serde_json::to_value(Config::default()).unwrap();

    assert_eq!(json["cache"]["backend"], "sqlite");
    assert_eq!(json["cache"]["enabled"], true);
    assert_eq!(json["log_level"], "info");
    assert_eq!(json["summary"]["file_extensions"][1], "md");
}

/// Test that load_or_create leaves an existing file alone
#[test]
fn test_loadOrCreate_withExistingFile_shouldNotOverwrite() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        temp_dir.path(),
        "conf.json",
        r#"{"cache": {"enabled": false}, "log_level": "warn"}"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert!(!config.cache.enabled);
    assert_eq!(config.log_level, LogLevel::Warn);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"warn\""));
}

/// Test that invalid values are rejected on load
#[test]
fn test_load_withInvalidValues_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();

    let bad_backend = common::create_test_file(
        temp_dir.path(),
        "backend.json",
        r#"{"cache": {"backend": "redis"}}"#,
    )
    .unwrap();
    assert!(Config::load(&bad_backend).is_err());

    let no_extensions = common::create_test_file(
        temp_dir.path(),
        "extensions.json",
        r#"{"summary": {"file_extensions": []}}"#,
    )
    .unwrap();
    assert!(Config::load(&no_extensions).is_err());
}

/// Test that a missing file is an error for plain load
#[test]
fn test_load_withMissingFile_shouldFail() {
    let temp_dir = common::create_temp_dir().unwrap();
    assert!(Config::load(temp_dir.path().join("absent.json")).is_err());
}
