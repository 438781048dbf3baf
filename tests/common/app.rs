//! Service construction helpers.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;

use cospal::models::AppConfig;
use cospal::services::PaletteService;

/// A palette service loaded from a real config file on disk
pub struct TestApp {
    pub service: PaletteService,
    /// Keeps the config file alive for the duration of the test
    config_file: NamedTempFile,
}

impl TestApp {
    /// Write `yaml` to a temp file and load it through `AppConfig::load`
    pub fn from_yaml(yaml: &str) -> Self {
        let config_file = write_config(yaml);
        let config = AppConfig::load(Some(config_file.path()));
        Self {
            service: PaletteService::new(Arc::new(config)),
            config_file,
        }
    }

    /// Service with the built-in default configuration
    pub fn with_defaults() -> PaletteService {
        PaletteService::new(Arc::new(AppConfig::default()))
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_file.path().to_path_buf()
    }
}

/// Write a YAML config to a named temp file
pub fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(yaml.as_bytes()).expect("write temp config");
    file
}
