//! Test fixtures and constants.

use cosine_palette::{CoeffVector, CosineCoeffs, GlobalModifiers};

/// Share URL used by configs that enable sharing
pub const SHARE_BASE_URL: &str = "https://palettes.example.org/p";

/// Warm palette with on-grid frequencies
pub fn warm_coeffs() -> CosineCoeffs {
    CosineCoeffs::new(
        CoeffVector::new(0.6, 0.45, 0.3),
        CoeffVector::new(0.35, 0.3, 0.25),
        CoeffVector::new(1.0, 1.0, 1.0),
        CoeffVector::new(0.0, 0.1, 0.2),
    )
}

/// Non-identity globals that survive seed rounding exactly
pub fn shifted_globals() -> GlobalModifiers {
    GlobalModifiers::new(0.1, 1.25, 1.5, 0.25)
}

/// Seed of the warm palette with shifted globals
pub fn warm_seed() -> String {
    cosine_palette::serialize(&warm_coeffs(), &shifted_globals()).unwrap()
}

/// A config with one preset per supported form (seed, coeffs, coeffs+globals)
/// and one broken preset.
pub fn presets_yaml() -> String {
    format!(
        r#"
default_steps: 7
cache_capacity: 8
share_base_url: "{SHARE_BASE_URL}"
presets:
  sunset:
    seed: "{seed}"
    description: "Warm evening tones"
  rainbow:
    coeffs: [[.5,.5,.5,1],[.5,.5,.5,1],[1,1,1,1],[0,.333,.667,1]]
  dim-rainbow:
    coeffs: [[.5,.5,.5,1],[.5,.5,.5,1],[1,1,1,1],[0,.333,.667,1]]
    globals: [-0.2, 0.5, 1, 0]
  broken:
    coeffs: [[.5,.5,.5,1],[.5,.5,.5,1]]
"#,
        seed = warm_seed()
    )
}
