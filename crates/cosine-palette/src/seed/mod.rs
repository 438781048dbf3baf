//! Seed codec
//!
//! A seed is a compact, reversible, URL-safe text form of a palette and its
//! global modifiers.
//!
//! # Format
//!
//! ```text
//! payload = a.r,a.g,a.b, b.r,b.g,b.b, c.r,c.g,c.b, d.r,d.g,d.b [,exposure,contrast,freq_scale,phase_shift]
//! seed    = lz_uri_compress(payload)
//! ```
//!
//! - Numbers carry [`PRECISION`] decimals; values in (-1, 1) drop the
//!   leading zero (`.5`, `-.25`) and zero is written as `0`.
//! - The four globals are left out when they are all within [`EPSILON`] of
//!   the identity `(0, 1, 1, 0)`, giving a 12-value payload. Decoding a
//!   12-value payload yields exactly [`GlobalModifiers::IDENTITY`].
//! - Alpha is not stored; decoded vectors always have alpha 1.
//! - Compression uses the LZ "encoded URI component" alphabet
//!   (`A-Z a-z 0-9 + - $`), which is safe inside a URL path segment.
//!
//! ## Legacy phase range
//!
//! Early seeds stored the phase shift in radians (`-π..π`). A decoded phase
//! shift with `|phase_shift| > 1.001` is taken to be one of those and
//! divided by π. Values in `(1.0, 1.001]` are therefore read as-is.
//!
//! # Example
//!
//! ```
//! use cosine_palette::{deserialize, serialize, CosineCoeffs, GlobalModifiers};
//!
//! let coeffs = CosineCoeffs::default();
//! let seed = serialize(&coeffs, &GlobalModifiers::IDENTITY).unwrap();
//!
//! let (decoded, globals) = deserialize(&seed).unwrap();
//! assert_eq!(decoded, coeffs);
//! assert_eq!(globals, GlobalModifiers::IDENTITY);
//! ```

mod error;
mod number;

pub use error::InvalidSeedError;
pub use number::{format_compact, parse_compact};

use std::f64::consts::PI;

use crate::model::{CosineCoeffs, GlobalModifiers, ValidationError};

/// Decimal places kept for every value.
pub const PRECISION: usize = 3;

/// Globals closer than this to the identity are not stored.
pub const EPSILON: f64 = 1e-3;

/// Phase shifts beyond this magnitude are legacy radian values.
pub const LEGACY_PHASE_THRESHOLD: f64 = 1.001;

/// Payload length without globals.
pub const SHORT_TOKEN_COUNT: usize = 12;

/// Payload length with globals.
pub const FULL_TOKEN_COUNT: usize = 16;

/// Everything recovered from a seed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodedSeed {
    pub coeffs: CosineCoeffs,
    pub globals: GlobalModifiers,
    /// Number of values in the payload (12 or 16)
    pub token_count: usize,
    /// The phase shift was stored in the legacy radian range
    pub legacy_phase: bool,
}

/// Encode a palette and its globals into a seed.
///
/// Fails with [`ValidationError::NonFinite`] if any color value or global is
/// NaN or infinite. A phase shift outside `[-1, 1]` is stored modulo 1, which
/// renders identically.
pub fn serialize(
    coeffs: &CosineCoeffs,
    globals: &GlobalModifiers,
) -> Result<String, ValidationError> {
    let values = coeffs.color_values();
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(ValidationError::NonFinite {
            what: "coefficient",
            index,
        });
    }
    if let Some(index) = globals.to_array().iter().position(|v| !v.is_finite()) {
        return Err(ValidationError::NonFinite {
            what: "global",
            index,
        });
    }

    // Larger shifts would decode as legacy radians; phase has period 1.
    let mut globals = *globals;
    if globals.phase_shift.abs() > 1.0 {
        let wrapped = globals.phase_shift.rem_euclid(1.0);
        tracing::debug!(
            phase_shift = globals.phase_shift,
            wrapped,
            "wrapping phase shift into one period"
        );
        globals.phase_shift = wrapped;
    }
    let global_values = globals.to_array();

    let include_globals = !globals.is_identity_within(EPSILON);
    let mut tokens: Vec<String> = values
        .iter()
        .map(|&v| format_compact(v, PRECISION))
        .collect();
    if include_globals {
        tokens.extend(global_values.iter().map(|&v| format_compact(v, PRECISION)));
    }
    tracing::trace!(include_globals, tokens = tokens.len(), "serializing seed");

    let payload = tokens.join(",");
    Ok(lz_str::compress_to_encoded_uri_component(payload.as_str()))
}

/// Encode dynamically shaped rows and globals, validating their shape first.
pub fn serialize_rows<R: AsRef<[f64]>>(
    rows: &[R],
    globals: &[f64],
) -> Result<String, ValidationError> {
    let coeffs = CosineCoeffs::try_from_rows(rows)?;
    let globals = GlobalModifiers::try_from_slice(globals)?;
    serialize(&coeffs, &globals)
}

/// Decompress a seed into its comma-separated payload.
pub fn decompress_payload(seed: &str) -> Result<String, InvalidSeedError> {
    // '+' often arrives as a space after passing through a query string
    let seed = seed.replace(' ', "+");
    let wide = lz_str::decompress_from_encoded_uri_component(seed.as_str())
        .ok_or(InvalidSeedError::Decompress)?;
    let payload = String::from_utf16(&wide).map_err(|_| InvalidSeedError::Decompress)?;
    if payload.is_empty() {
        return Err(InvalidSeedError::Empty);
    }
    Ok(payload)
}

/// Decode a seed, keeping the payload details.
pub fn inspect(seed: &str) -> Result<DecodedSeed, InvalidSeedError> {
    let payload = decompress_payload(seed)?;
    let tokens: Vec<&str> = payload.split(',').collect();
    let token_count = tokens.len();
    if token_count != SHORT_TOKEN_COUNT && token_count != FULL_TOKEN_COUNT {
        return Err(InvalidSeedError::TokenCount(token_count));
    }

    let mut values = Vec::with_capacity(token_count);
    for (index, token) in tokens.iter().enumerate() {
        let value = parse_compact(token).ok_or_else(|| InvalidSeedError::InvalidToken {
            index,
            token: token.to_string(),
        })?;
        if !value.is_finite() {
            return Err(InvalidSeedError::NonFinite { index });
        }
        values.push(value);
    }

    let mut color = [0.0; SHORT_TOKEN_COUNT];
    color.copy_from_slice(&values[..SHORT_TOKEN_COUNT]);
    let coeffs = CosineCoeffs::from_color_values(color);

    let mut legacy_phase = false;
    let globals = if token_count == FULL_TOKEN_COUNT {
        let mut g = [0.0; 4];
        g.copy_from_slice(&values[SHORT_TOKEN_COUNT..]);
        let mut globals = GlobalModifiers::from_array(g);
        if globals.phase_shift.abs() > LEGACY_PHASE_THRESHOLD {
            tracing::debug!(
                phase_shift = globals.phase_shift,
                "converting legacy radian phase shift"
            );
            globals.phase_shift /= PI;
            legacy_phase = true;
        }
        globals
    } else {
        GlobalModifiers::IDENTITY
    };

    Ok(DecodedSeed {
        coeffs,
        globals,
        token_count,
        legacy_phase,
    })
}

/// Decode a seed into a palette and its globals.
pub fn deserialize(seed: &str) -> Result<(CosineCoeffs, GlobalModifiers), InvalidSeedError> {
    inspect(seed).map(|d| (d.coeffs, d.globals))
}

/// Check whether `seed` decodes, without raising.
pub fn is_valid_seed(seed: &str) -> bool {
    inspect(seed).is_ok()
}
