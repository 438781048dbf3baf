use cosine_palette::{
    apply_globals, average_brightness, deserialize, fingerprint, fit_with, inspect, sample_hex,
    serialize, tare, tare_all, validate_fit, CosineCoeffs, FitOptions, FitReport,
    GlobalModifiers, Rgb, SimilarityKey, Slot,
};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Serialize;
use std::sync::Arc;

use crate::error::AppError;
use crate::models::AppConfig;
use crate::services::seed_cache::{CachedSeed, SeedCache};

/// Characters escaped when a seed becomes a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// A decoded seed with everything a caller may want to show
#[derive(Debug, Clone, Serialize)]
pub struct DecodedPalette {
    pub seed: String,
    pub coeffs: CosineCoeffs,
    pub globals: GlobalModifiers,
    /// 12 or 16
    pub token_count: usize,
    pub legacy_phase: bool,
    pub fingerprint: SimilarityKey,
    /// Colors at the configured default step count, globals applied
    pub colors: Vec<String>,
}

/// Result of fitting a palette to target colors
#[derive(Debug, Clone, Serialize)]
pub struct FitOutcome {
    pub seed: String,
    pub coeffs: CosineCoeffs,
    pub report: FitReport,
}

/// One configured preset, as listed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct PresetSummary {
    pub name: String,
    pub description: Option<String>,
    /// Seed of the preset, or the reason it fails to resolve
    pub seed: Result<String, String>,
}

/// Palette operations on top of the configuration and seed cache.
///
/// Sources are either a preset name from the configuration or a seed string;
/// presets win when both would match.
pub struct PaletteService {
    config: Arc<AppConfig>,
    cache: SeedCache,
}

impl PaletteService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let cache = SeedCache::new(config.cache_capacity);
        Self { config, cache }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn cache(&self) -> &SeedCache {
        &self.cache
    }

    /// Look up a preset by name
    pub fn preset(&self, name: &str) -> Result<(CosineCoeffs, GlobalModifiers), AppError> {
        self.config
            .get_preset(name)
            .ok_or_else(|| AppError::UnknownPreset(name.to_string()))?
            .resolve(name)
    }

    /// Resolve a preset name or seed string to a palette
    pub fn resolve(&self, source: &str) -> Result<(CosineCoeffs, GlobalModifiers), AppError> {
        if let Some(preset) = self.config.get_preset(source) {
            tracing::debug!(preset = source, "Resolved preset");
            return preset.resolve(source);
        }
        Ok(deserialize(source)?)
    }

    fn encode_cached(
        &self,
        coeffs: &CosineCoeffs,
        globals: &GlobalModifiers,
    ) -> Result<CachedSeed, AppError> {
        self.cache.get_or_insert_with(coeffs, globals, || {
            Ok(CachedSeed {
                seed: serialize(coeffs, globals)?,
                fingerprint: fingerprint(coeffs),
            })
        })
    }

    /// Encode a palette into a seed
    pub fn encode(
        &self,
        coeffs: &CosineCoeffs,
        globals: &GlobalModifiers,
    ) -> Result<String, AppError> {
        Ok(self.encode_cached(coeffs, globals)?.seed)
    }

    /// Encode loosely-shaped rows (as read from JSON or YAML)
    pub fn encode_rows<R: AsRef<[f64]>>(
        &self,
        rows: &[R],
        globals: &[f64],
    ) -> Result<String, AppError> {
        let coeffs = CosineCoeffs::try_from_rows(rows)?;
        let globals = GlobalModifiers::try_from_slice(globals)?;
        self.encode(&coeffs, &globals)
    }

    /// Decode a seed and sample it
    pub fn decode(&self, seed: &str) -> Result<DecodedPalette, AppError> {
        let decoded = inspect(seed)?;
        if decoded.legacy_phase {
            tracing::info!(seed, "Seed uses the legacy radian phase shift");
        }

        let applied = apply_globals(&decoded.coeffs, &decoded.globals);
        Ok(DecodedPalette {
            seed: seed.to_string(),
            coeffs: decoded.coeffs,
            globals: decoded.globals,
            token_count: decoded.token_count,
            legacy_phase: decoded.legacy_phase,
            fingerprint: fingerprint(&decoded.coeffs),
            colors: sample_hex(self.config.default_steps, &applied),
        })
    }

    /// Sample `steps` colors (default from config), optionally with globals applied
    pub fn sample(
        &self,
        source: &str,
        steps: Option<usize>,
        with_globals: bool,
    ) -> Result<Vec<String>, AppError> {
        let (coeffs, globals) = self.resolve(source)?;
        let steps = steps.unwrap_or(self.config.default_steps);
        let coeffs = if with_globals {
            apply_globals(&coeffs, &globals)
        } else {
            coeffs
        };
        Ok(sample_hex(steps, &coeffs))
    }

    /// Mean luma of the sampled colors, globals applied
    pub fn brightness(&self, source: &str, steps: Option<usize>) -> Result<f64, AppError> {
        let colors = self.sample(source, steps, true)?;
        Ok(average_brightness(&colors))
    }

    /// Fit a palette to hex colors; `refine` overrides the configured default
    pub fn fit<S: AsRef<str>>(
        &self,
        colors: &[S],
        refine: Option<bool>,
    ) -> Result<FitOutcome, AppError> {
        if colors.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one color is required".to_string(),
            ));
        }

        let targets = colors
            .iter()
            .map(|c| c.as_ref().parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        let options = FitOptions::new().refine(refine.unwrap_or(self.config.fit.refine));

        let coeffs = fit_with(&targets, &options);
        let report = validate_fit(&coeffs, &targets);
        tracing::debug!(
            colors = targets.len(),
            max_error = report.max_error,
            refine = options.refine,
            "Fitted palette"
        );

        Ok(FitOutcome {
            seed: self.encode(&coeffs, &GlobalModifiers::IDENTITY)?,
            coeffs,
            report,
        })
    }

    /// Fold one global into the base coefficients; returns the new seed
    pub fn tare(&self, source: &str, slot: Slot) -> Result<String, AppError> {
        let (coeffs, globals) = self.resolve(source)?;
        let (coeffs, globals) = tare(&coeffs, &globals, slot, slot.identity());
        self.encode(&coeffs, &globals)
    }

    /// Fold every global into the base coefficients; returns the new seed
    pub fn tare_all(&self, source: &str) -> Result<String, AppError> {
        let (coeffs, globals) = self.resolve(source)?;
        let (coeffs, globals) = tare_all(&coeffs, &globals);
        self.encode(&coeffs, &globals)
    }

    /// Similarity key of the base coefficients
    pub fn fingerprint(&self, source: &str) -> Result<SimilarityKey, AppError> {
        let (coeffs, globals) = self.resolve(source)?;
        Ok(self.encode_cached(&coeffs, &globals)?.fingerprint)
    }

    /// `share_base_url/<seed>`, with the seed escaped as a path segment
    pub fn share_url(&self, seed: &str) -> Result<String, AppError> {
        let base = self
            .config
            .share_base_url
            .as_deref()
            .ok_or(AppError::MissingShareUrl)?;
        let segment = utf8_percent_encode(seed, PATH_SEGMENT);
        Ok(format!("{}/{}", base.trim_end_matches('/'), segment))
    }

    /// All configured presets in name order
    pub fn presets(&self) -> Vec<PresetSummary> {
        self.config
            .preset_names()
            .into_iter()
            .map(|name| {
                let preset = &self.config.presets[name];
                let seed = preset
                    .resolve(name)
                    .and_then(|(coeffs, globals)| self.encode(&coeffs, &globals))
                    .map_err(|e| e.to_string());
                PresetSummary {
                    name: name.to_string(),
                    description: preset.description.clone(),
                    seed,
                }
            })
            .collect()
    }
}
