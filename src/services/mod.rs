pub mod palette_service;
pub mod seed_cache;

pub use palette_service::{DecodedPalette, FitOutcome, PaletteService, PresetSummary};
pub use seed_cache::{CachedSeed, SeedCache};
