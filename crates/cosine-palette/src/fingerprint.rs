//! Similarity fingerprints for near-duplicate detection.
//!
//! A fingerprint rounds the twelve color parameters to two decimals and
//! joins them. Palettes whose parameters round the same way share a key, so
//! differences below ~0.005 per value usually collapse while differences of
//! 0.02 or more always separate. Values straddling a rounding boundary
//! (x.xx5) can split even when very close; that gray zone is accepted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::CosineCoeffs;

/// Separator between the twelve rounded values.
pub const DELIMITER: char = ',';

/// Decimal places kept in a fingerprint.
pub const DECIMALS: i32 = 2;

/// Opaque equality key for grouping near-identical palettes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityKey(String);

impl SimilarityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SimilarityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SimilarityKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Round half up (toward +∞), so `-0.125` becomes `-0.12`, not `-0.13`.
/// Keys already stored elsewhere were produced with this rule.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (value * scale + 0.5).floor() / scale;
    // Fold -0 into 0 so it prints the same
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Fingerprint a palette. Alpha is ignored.
///
/// # Example
///
/// ```
/// use cosine_palette::{fingerprint, CosineCoeffs};
///
/// let key = fingerprint(&CosineCoeffs::default());
/// assert_eq!(key.as_str(), "0.5,0.5,0.5,0.5,0.5,0.5,1,1,1,0,0.33,0.67");
/// ```
pub fn fingerprint(coeffs: &CosineCoeffs) -> SimilarityKey {
    let parts: Vec<String> = coeffs
        .color_values()
        .iter()
        .map(|&v| round_to(v, DECIMALS).to_string())
        .collect();
    SimilarityKey(parts.join(&DELIMITER.to_string()))
}
