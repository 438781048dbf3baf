use cosine_palette::{CosineCoeffs, GlobalModifiers};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::AppError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Number of colors sampled when the caller doesn't say
    #[serde(default = "default_steps")]
    pub default_steps: usize,

    /// Maximum number of entries in the seed cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Base URL that seeds are appended to when sharing
    #[serde(default)]
    pub share_base_url: Option<String>,

    /// Fitter settings
    #[serde(default)]
    pub fit: FitConfig,

    /// Named palettes
    #[serde(default)]
    pub presets: HashMap<String, PresetConfig>,
}

fn default_steps() -> usize {
    5
}

fn default_cache_capacity() -> usize {
    256
}

/// Fitter settings
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FitConfig {
    /// Refine the best grid frequency with a local search
    #[serde(default)]
    pub refine: bool,
}

/// A named palette, given either as a seed or as raw coefficients
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PresetConfig {
    /// Seed string (takes precedence over `coeffs`)
    #[serde(default)]
    pub seed: Option<String>,

    /// Four `[r, g, b, alpha]` rows: offset, amplitude, frequency, phase
    #[serde(default)]
    pub coeffs: Option<Vec<Vec<f64>>>,

    /// Exposure, contrast, frequency scale, phase shift (identity if omitted)
    #[serde(default)]
    pub globals: Option<Vec<f64>>,

    /// Free-form description shown in listings
    #[serde(default)]
    pub description: Option<String>,
}

impl PresetConfig {
    /// Resolve to coefficients and globals, validating shapes and seeds.
    pub fn resolve(&self, name: &str) -> Result<(CosineCoeffs, GlobalModifiers), AppError> {
        if let Some(seed) = &self.seed {
            return Ok(cosine_palette::deserialize(seed)?);
        }

        let Some(rows) = &self.coeffs else {
            return Err(AppError::InvalidPreset {
                name: name.to_string(),
                reason: "neither seed nor coeffs given".to_string(),
            });
        };

        let invalid = |e: cosine_palette::ValidationError| AppError::InvalidPreset {
            name: name.to_string(),
            reason: e.to_string(),
        };
        let coeffs = CosineCoeffs::try_from_rows(rows).map_err(invalid)?;
        let globals = match &self.globals {
            Some(values) => GlobalModifiers::try_from_slice(values).map_err(invalid)?,
            None => GlobalModifiers::IDENTITY,
        };
        Ok((coeffs, globals))
    }
}

impl AppConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self, AppError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match Self::load_from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    presets = config.presets.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Get a preset by name (case-insensitive)
    pub fn get_preset(&self, name: &str) -> Option<&PresetConfig> {
        self.presets.get(name).or_else(|| {
            self.presets
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, preset)| preset)
        })
    }

    /// Preset names in sorted order
    pub fn preset_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut presets = HashMap::new();
        presets.insert(
            "rainbow".to_string(),
            PresetConfig {
                coeffs: Some(
                    CosineCoeffs::default()
                        .to_rows()
                        .iter()
                        .map(|row| row.to_vec())
                        .collect(),
                ),
                description: Some("Classic full-spectrum cosine palette".to_string()),
                ..Default::default()
            },
        );

        Self {
            default_steps: default_steps(),
            cache_capacity: default_cache_capacity(),
            share_base_url: None,
            fit: FitConfig::default(),
            presets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.default_steps, 5);
        assert_eq!(config.cache_capacity, 256);
        assert!(config.share_base_url.is_none());
        assert!(!config.fit.refine);
        assert!(config.presets.contains_key("rainbow"));

        let (coeffs, globals) = config.presets["rainbow"].resolve("rainbow").unwrap();
        assert_eq!(coeffs, CosineCoeffs::default());
        assert_eq!(globals, GlobalModifiers::IDENTITY);
    }

    #[test]
    fn test_default_functions() {
        assert_eq!(default_steps(), 5);
        assert_eq!(default_cache_capacity(), 256);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
default_steps: 8
cache_capacity: 16
share_base_url: "https://example.org/p"
fit:
  refine: true
presets:
  warm:
    coeffs:
      - [0.5, 0.4, 0.3, 1]
      - [0.4, 0.3, 0.2, 1]
      - [1, 1, 1, 1]
      - [0, 0.1, 0.2, 1]
    globals: [0.1, 1.2, 1, 0]
    description: "Warm tones"
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.default_steps, 8);
        assert_eq!(config.cache_capacity, 16);
        assert_eq!(config.share_base_url.as_deref(), Some("https://example.org/p"));
        assert!(config.fit.refine);

        let warm = config.get_preset("warm").unwrap();
        assert_eq!(warm.description.as_deref(), Some("Warm tones"));

        let (coeffs, globals) = warm.resolve("warm").unwrap();
        assert_eq!(coeffs.offset.g, 0.4);
        assert_eq!(globals.contrast, 1.2);
    }

    #[test]
    fn test_empty_yaml_uses_field_defaults() {
        let config = AppConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config.default_steps, 5);
        assert_eq!(config.cache_capacity, 256);
        assert!(config.presets.is_empty());
    }

    #[test]
    fn test_get_preset_case_insensitive() {
        let config = AppConfig::default();
        assert!(config.get_preset("Rainbow").is_some());
        assert!(config.get_preset("missing").is_none());
    }

    #[test]
    fn test_preset_with_seed() {
        let seed = cosine_palette::serialize(
            &CosineCoeffs::default(),
            &GlobalModifiers::new(0.2, 1.0, 1.0, 0.0),
        )
        .unwrap();
        let preset = PresetConfig {
            seed: Some(seed),
            ..Default::default()
        };
        let (_, globals) = preset.resolve("seeded").unwrap();
        assert!((globals.exposure - 0.2).abs() < 1e-3);
    }

    #[test]
    fn test_preset_without_data_is_invalid() {
        let preset = PresetConfig::default();
        assert!(matches!(
            preset.resolve("empty"),
            Err(AppError::InvalidPreset { .. })
        ));
    }

    #[test]
    fn test_preset_bad_shape_is_invalid() {
        let preset = PresetConfig {
            coeffs: Some(vec![vec![0.5; 4]; 3]),
            ..Default::default()
        };
        let err = preset.resolve("short").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid preset 'short': expected 4 coefficient vectors, got 3"
        );
    }

    #[test]
    fn test_preset_names_sorted() {
        let mut config = AppConfig::default();
        config
            .presets
            .insert("aurora".to_string(), PresetConfig::default());
        assert_eq!(config.preset_names(), vec!["aurora", "rainbow"]);
    }

    #[test]
    fn test_load_without_path_is_default() {
        let config = AppConfig::load(None);
        assert!(config.presets.contains_key("rainbow"));
    }
}
