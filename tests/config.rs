//! Configuration system tests
//!
//! Tests for config paths and loading / saving the composer config.

use std::path::PathBuf;

use relay_compose::config::{ComposerConfig, DEFAULT_API_BASE_URL};
use relay_compose::config_paths;
use relay_compose::measure::FontSpec;
use relay_compose::overlay::PositionConfig;

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_config_dir_contains_app_name() {
    let dir = config_paths::config_dir().unwrap();
    assert!(dir.to_string_lossy().contains("relay-compose"));
}

#[test]
fn test_config_file_ends_with_yaml() {
    let path = config_paths::config_file().unwrap();
    assert!(path.to_string_lossy().ends_with("config.yaml"));
}

#[test]
fn test_logs_dir_under_config_dir() {
    let logs = config_paths::logs_dir().unwrap();
    assert!(logs.starts_with(config_paths::config_dir().unwrap()));
}

// ========================================================================
// Composer Config Tests
// ========================================================================

#[test]
fn test_defaults() {
    let config = ComposerConfig::default();
    assert_eq!(config.positioning, PositionConfig::default());
    assert_eq!(config.positioning.line_height, 24.0);
    assert_eq!(config.positioning.padding, 12.0);
    assert_eq!(config.positioning.feedback_panel_width, 750.0);
    assert_eq!(config.font.spec, FontSpec::default());
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ComposerConfig::load_from(&dir.path().join("nope.yaml"));
    assert_eq!(config, ComposerConfig::default());
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let mut config = ComposerConfig::default();
    config.positioning.feedback_panel_width = 640.0;
    config.font.spec = FontSpec::new("Georgia", 18.0, 700);
    config.font.path = Some(PathBuf::from("/fonts/Georgia.ttf"));
    config.api_base_url = "https://api.relay.example".to_string();

    config.save_to(&path).unwrap();
    assert!(path.exists());

    assert_eq!(ComposerConfig::load_from(&path), config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        "positioning:\n  lift: 40.0\nfont:\n  size: 14.0\n",
    )
    .unwrap();

    let config = ComposerConfig::load_from(&path);

    assert_eq!(config.positioning.lift, 40.0);
    assert_eq!(config.positioning.line_height, 24.0);
    assert_eq!(config.font.spec.size, 14.0);
    assert_eq!(config.font.spec.family, "Inter");
    assert_eq!(config.font.path, None);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_invalid_yaml_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "positioning: [not, a, map\n").unwrap();

    assert_eq!(ComposerConfig::load_from(&path), ComposerConfig::default());
}

#[test]
fn test_env_overrides_api_base() {
    std::env::set_var("RELAY_API_BASE_URL", "https://staging.relay.example");
    let config = ComposerConfig::default().with_env_overrides();
    std::env::remove_var("RELAY_API_BASE_URL");

    assert_eq!(config.api_base_url, "https://staging.relay.example");
}
