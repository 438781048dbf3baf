//! Tests for loading configuration files from disk.

mod common;

use common::{app::write_config, fixtures, TestApp};
use cospal::error::AppError;
use cospal::models::AppConfig;
use pretty_assertions::assert_eq;
use std::path::Path;

#[test]
fn test_load_presets_from_file() {
    let app = TestApp::from_yaml(&fixtures::presets_yaml());
    let config = app.service.config();

    assert_eq!(config.default_steps, 7);
    assert_eq!(config.cache_capacity, 8);
    assert_eq!(
        config.share_base_url.as_deref(),
        Some(fixtures::SHARE_BASE_URL)
    );
    assert_eq!(
        config.preset_names(),
        vec!["broken", "dim-rainbow", "rainbow", "sunset"]
    );
}

#[test]
fn test_file_replaces_builtin_presets() {
    let file = write_config("presets: {}\n");
    let config = AppConfig::load(Some(file.path()));
    assert!(config.presets.is_empty());
    assert_eq!(config.default_steps, 5);
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = AppConfig::load(Some(Path::new("/nonexistent/cospal.yaml")));
    assert_eq!(config.default_steps, 5);
    assert!(config.get_preset("rainbow").is_some());
}

#[test]
fn test_invalid_yaml_falls_back_to_defaults() {
    let file = write_config("default_steps: [not, a, number]\n");
    let config = AppConfig::load(Some(file.path()));
    assert_eq!(config.default_steps, 5);
    assert!(config.get_preset("rainbow").is_some());
}

#[test]
fn test_load_from_file_reports_yaml_errors() {
    let file = write_config("default_steps: [not, a, number]\n");
    let err = AppConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, AppError::Config(_)), "got {err:?}");
}

#[test]
fn test_load_from_file_reports_io_errors() {
    let err = AppConfig::load_from_file(Path::new("/nonexistent/cospal.yaml")).unwrap_err();
    assert!(matches!(err, AppError::Io(_)), "got {err:?}");
}

#[test]
fn test_broken_preset_fails_at_use_not_at_load() {
    let app = TestApp::from_yaml(&fixtures::presets_yaml());

    // Loading succeeded with the broken preset present
    assert!(app.service.config().get_preset("broken").is_some());

    let err = app.service.resolve("broken").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid preset 'broken': expected 4 coefficient vectors, got 2"
    );
}
