//! cosine-palette: procedural cosine gradient palettes
//!
//! This library evaluates, fits, encodes and fingerprints palettes built on
//! the four-parameter cosine model:
//!
//! ```text
//! color(t) = a + b * cos(2π * (c * t + d))      per R, G, B channel, t in [0, 1]
//! ```
//!
//! where `a` is the offset, `b` the amplitude, `c` the frequency and `d` the
//! phase. Four global modifiers (exposure, contrast, frequency scale, phase
//! shift) adjust all channels at once without touching the base
//! coefficients.
//!
//! # Quick Start
//!
//! ```
//! use cosine_palette::{apply_globals, sample, serialize, CosineCoeffs, GlobalModifiers};
//!
//! let coeffs = CosineCoeffs::default();
//! let globals = GlobalModifiers::new(0.1, 1.0, 1.0, 0.0);
//!
//! let colors = sample(5, &apply_globals(&coeffs, &globals));
//! assert_eq!(colors.len(), 5);
//!
//! let seed = serialize(&coeffs, &globals).unwrap();
//! assert!(cosine_palette::is_valid_seed(&seed));
//! ```
//!
//! # Components
//!
//! | Module          | Purpose |
//! |-----------------|---------|
//! | [`model`]       | Fixed-shape [`CosineCoeffs`] and [`GlobalModifiers`] value types |
//! | [`sampler`]     | Forward evaluation into clamped [`Rgb`] samples |
//! | [`modifiers`]   | Applying, inverting and taring global modifiers |
//! | [`fit`]         | Least-squares recovery of coefficients from target colors |
//! | [`seed`]        | Reversible, URL-safe text encoding |
//! | [`fingerprint`] | Lossy similarity keys for grouping near duplicates |
//!
//! # Fitting
//!
//! The only nonlinear parameter of the model is the frequency. For a fixed
//! frequency `c` the model expands to
//!
//! ```text
//! a + b·cos(2π(ct + d)) = A + B·cos(2πct) + C·sin(2πct)
//! ```
//!
//! which is linear in `(A, B, C)`. The fitter scans a fixed 23-point
//! frequency grid, solves the 3x3 normal equations for each point with
//! Cramer's rule and keeps the candidate with the lowest squared error.
//! `b = √(B² + C²)` and `d = atan2(-C, B) / 2π` recover the original
//! parameters. Near-singular systems fall back to a flat fit at the mean,
//! which simply loses the error comparison.
//!
//! # Taring
//!
//! Taring folds a global into the base coefficients and resets the global,
//! without changing a single rendered color. For additive slots the base
//! becomes `old + current - default`, for multiplicative slots
//! `old * current / default`.
//!
//! # Purity
//!
//! Every function here is a pure computation over `Copy` value types. No
//! function mutates its input, so everything is safe to call from any
//! thread without synchronization.

pub mod color;
pub mod error;
pub mod fingerprint;
pub mod fit;
pub mod model;
pub mod modifiers;
pub mod sampler;
pub mod seed;


pub use color::{average_brightness, hex_to_rgb, rgb_to_hex, ParseColorError, Rgb};
pub use error::PaletteError;
pub use fingerprint::{fingerprint, SimilarityKey};
pub use fit::{fit, fit_hex, fit_hex_with, fit_with, validate_fit, ColorError, FitOptions, FitReport};
pub use model::{Channel, CoeffVector, CosineCoeffs, GlobalModifiers, Slot, ValidationError};
pub use modifiers::{
    apply_globals, invert_global, normalize_to_defaults, tare, tare_all, update_slot_with_inverse,
};
pub use sampler::{evaluate, sample, sample_hex, sample_rows};
pub use seed::{
    deserialize, inspect, is_valid_seed, serialize, serialize_rows, DecodedSeed, InvalidSeedError,
};
